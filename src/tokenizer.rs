//! Lowercasing word parser shared by corpus ingestion and query correction.

/// Parse a string into words, lowercasing it first and splitting at every
/// character that is neither alphanumeric nor an apostrophe. The typographic
/// apostrophe `’` is part of a word just like `'`; underscore is a separator.
pub fn parse_words(text: &str) -> Vec<String> {
    let text_normalized = text.to_lowercase();
    let mut terms: Vec<String> = Vec::new();
    let mut start = false;
    let mut start_pos = 0;

    for (pos, ch) in text_normalized.char_indices() {
        start = match ch {
            token if token.is_alphanumeric() || token == '\'' || token == '’' => {
                if !start {
                    start_pos = pos;
                }
                true
            }
            _ => {
                if start {
                    terms.push(text_normalized[start_pos..pos].to_string());
                }
                false
            }
        };
    }

    if start {
        terms.push(text_normalized[start_pos..].to_string());
    }

    terms
}

/// Whether a corpus token survives ingestion. Single-character tokens are
/// noise in running text except for the standalone words "a" and "i".
pub(crate) fn keep_corpus_token(token: &str) -> bool {
    token.chars().count() > 1 || matches!(token, "a" | "i")
}
