/// Words too generic to identify a merchant or purchase type.
const STOP_WORDS: [&str; 10] = [
    "the", "and", "for", "with", "from", "to", "of", "in", "at", "on",
];

/// Normalises a transaction description into content tokens: lower-cased,
/// split on anything that is not a word character, short tokens and stop
/// words dropped. Token order follows the description.
pub fn extract_keywords(description: &str) -> Vec<String> {
    let lowered = description.to_lowercase();
    lowered
        .split(|c: char| !is_word_char(c))
        .filter(|token| token.chars().count() > 2 && !STOP_WORDS.contains(token))
        .map(str::to_string)
        .collect()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
