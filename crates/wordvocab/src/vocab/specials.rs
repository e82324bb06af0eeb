//! # Special Tokens

/// The padding token; always reserved.
pub const PADDING_TOKEN: &str = "<blank>";

/// The start-of-sequence token.
pub const START_OF_SENTENCE_TOKEN: &str = "<s>";

/// The end-of-sequence token.
pub const END_OF_SENTENCE_TOKEN: &str = "</s>";

/// The unknown token; added by vocabulary consumers, never by this crate.
pub const UNKNOWN_TOKEN: &str = "<unk>";

/// The default special token list.
///
/// # Arguments
/// * `with_sequence_tokens` - include the start/end sequence tokens after padding.
pub fn default_special_tokens(with_sequence_tokens: bool) -> Vec<String> {
    let mut specials = vec![PADDING_TOKEN.to_string()];
    if with_sequence_tokens {
        specials.push(START_OF_SENTENCE_TOKEN.to_string());
        specials.push(END_OF_SENTENCE_TOKEN.to_string());
    }
    specials
}
