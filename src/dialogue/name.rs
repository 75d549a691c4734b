use regex::Regex;

/// Name stored when the utterance has no usable token.
pub const DEFAULT_NAME: &str = "Amigo";

/// One capital (accented vowels allowed) followed by lowercase letters.
const CAPITALIZED_WORD: &str = r"^[A-ZÁÉÍÓÚ][a-záéíóú]+$";

/// Lead-in words people type before their name; skipped by the pattern rule.
const LEAD_IN_WORDS: &[&str] = &[
    "hola", "buenas", "buenos", "hi", "hello", "soy", "me", "llamo", "mi", "nombre", "es", "yo",
];

/// Pulls a name out of a free-form reply.
///
/// Picks the first capitalized word longer than two characters, falls back to
/// the first word, and finally to [`DEFAULT_NAME`]. Never fails; an odd reply
/// just yields an odd name.
pub fn extract_name(utterance: &str) -> String {
    let capitalized = Regex::new(CAPITALIZED_WORD).ok();

    let picked = capitalized.as_ref().and_then(|re| {
        utterance.split_whitespace().find(|word| {
            word.chars().count() > 2
                && re.is_match(word)
                && !LEAD_IN_WORDS.contains(&word.to_lowercase().as_str())
        })
    });

    picked
        .or_else(|| utterance.split_whitespace().next())
        .unwrap_or(DEFAULT_NAME)
        .to_string()
}
