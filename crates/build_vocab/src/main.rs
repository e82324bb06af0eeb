use anyhow::Context;
use clap::{ArgAction, Parser};
use env_logger::Env;
use log::LevelFilter;
use std::path::PathBuf;
use wordvocab::tokenizers::{RegexTokenizer, Tokenizer, WhitespaceTokenizer};
use wordvocab::vocab::specials::default_special_tokens;
use wordvocab::{VocabBuilderOptions, VocabFormat};

/// Generate a word vocabulary from monolingual corpora.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Source text files.
    pub data: Vec<PathBuf>,

    /// Build from a saved vocabulary (see also --from_format).
    #[arg(long = "from_vocab")]
    pub from_vocab: Option<PathBuf>,

    /// The format of the saved vocabulary: "default" or "sentencepiece".
    #[arg(long = "from_format", default_value = "default")]
    pub from_format: String,

    /// Output vocabulary file.
    #[arg(long = "save_vocab")]
    pub save_vocab: PathBuf,

    /// The format of the output vocabulary: "default" or "sentencepiece".
    #[arg(long = "save_format", default_value = "default")]
    pub save_format: String,

    /// Minimum word frequency.
    #[arg(long = "min_frequency", default_value = "1", allow_negative_numbers = true)]
    pub min_frequency: i64,

    /// Maximum vocabulary size. If = 0, do not limit vocabulary.
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub size: i64,

    /// Ensure that the vocabulary size + 1 is a multiple of this value
    /// (+ 1 represents the <unk> token that will be added during the training).
    #[arg(long = "size_multiple", default_value = "1", allow_negative_numbers = true)]
    pub size_multiple: i64,

    /// If set, do not add special sequence tokens (start, end) in the vocabulary.
    #[arg(long = "without_sequence_tokens", default_value = "false")]
    pub without_sequence_tokens: bool,

    /// If set, write the default format without frequency counts.
    #[arg(long = "tokens_only", default_value = "false")]
    pub tokens_only: bool,

    /// Tokenize with this regex (one token per match) instead of splitting on whitespace.
    #[arg(long = "tokenizer_pattern")]
    pub tokenizer_pattern: Option<String>,

    /// Fail a line when --tokenizer_pattern backtracks more than this many steps.
    #[arg(long = "backtrack_limit", requires = "tokenizer_pattern")]
    pub backtrack_limit: Option<usize>,

    /// Increase verbosity (-v, -vv).
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Decrease verbosity (-q, -qq).
    #[arg(short = 'q', long, action = ArgAction::Count)]
    pub quiet: u8,
}

impl Args {
    /// Translate the arguments into builder options.
    pub fn builder_options(&self) -> anyhow::Result<VocabBuilderOptions> {
        let from_format: VocabFormat = self.from_format.parse()?;
        let save_format: VocabFormat = self.save_format.parse()?;

        let options = VocabBuilderOptions::default()
            .with_special_tokens(default_special_tokens(!self.without_sequence_tokens))
            .with_from_vocab(self.from_vocab.clone(), from_format)
            .with_save_format(save_format)
            .with_min_frequency(self.min_frequency)
            .with_max_size(self.size)
            .with_size_multiple(self.size_multiple)
            .with_num_oov_buckets(1)
            .with_frequencies(!self.tokens_only);

        options.validate()?;
        Ok(options)
    }

    /// The tokenizer selected by the arguments.
    pub fn tokenizer(&self) -> anyhow::Result<Box<dyn Tokenizer>> {
        let Some(pattern) = &self.tokenizer_pattern else {
            return Ok(Box::new(WhitespaceTokenizer));
        };

        let mut tokenizer = RegexTokenizer::new(pattern)?;
        if let Some(limit) = self.backtrack_limit {
            tokenizer = tokenizer.with_backtrack_limit(limit)?;
        }
        Ok(Box::new(tokenizer))
    }
}

fn init_logging(
    verbose: u8,
    quiet: u8,
) {
    let level = match (quiet, verbose) {
        (0, 0) => LevelFilter::Info,
        (0, 1) => LevelFilter::Debug,
        (0, _) => LevelFilter::Trace,
        (1, _) => LevelFilter::Warn,
        _ => LevelFilter::Error,
    };

    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    builder.format_timestamp_millis();
    builder.filter_level(level);
    let _ = builder.try_init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);
    log::debug!("{:#?}", args);

    let options = args.builder_options()?;

    let tokenizer = args.tokenizer()?;

    let vocab = options
        .try_build_and_save(
            args.data.as_slice(),
            |line: &str| tokenizer.tokenize(line),
            &args.save_vocab,
        )
        .with_context(|| format!("failed to build {}", args.save_vocab.display()))?;

    log::info!(
        "Wrote {} tokens to {}",
        vocab.size(),
        args.save_vocab.display()
    );
    Ok(())
}
