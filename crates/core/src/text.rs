//! Case- and accent-insensitive text comparison used to grade free-text answers.

use unicode_normalization::UnicodeNormalization;

/// Combining Diacritical Marks block (U+0300..=U+036F).
const COMBINING_MARKS: std::ops::RangeInclusive<char> = '\u{0300}'..='\u{036F}';

/// Guesses must be longer than this (in chars) to score through containment.
pub const MIN_PARTIAL_GUESS_CHARS: usize = 3;

/// Canonicalizes text for comparison.
///
/// Lowercases, decomposes (NFD), drops combining diacritical marks and trims
/// surrounding whitespace, in that order. The result is a fixed point:
/// normalizing it again returns the same string.
#[must_use]
pub fn normalize(text: &str) -> String {
    let stripped: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !COMBINING_MARKS.contains(c))
        .collect();
    stripped.trim().to_owned()
}

/// Normalized equality.
#[must_use]
pub fn texts_match(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

/// Normalized containment of `needle` in `haystack`.
#[must_use]
pub fn text_contains(haystack: &str, needle: &str) -> bool {
    normalize(haystack).contains(&normalize(needle))
}

/// Decides whether a free-text guess counts as the expected answer.
///
/// Accepts an exact normalized match, or a guess longer than
/// [`MIN_PARTIAL_GUESS_CHARS`] that appears inside the normalized answer.
/// The guess must be the substring: a guess longer than the answer only
/// matches when it is exactly equal.
#[must_use]
pub fn is_valid_answer(guess: &str, correct_answer: &str) -> bool {
    let guess = normalize(guess);
    let answer = normalize(correct_answer);

    if guess == answer {
        return true;
    }

    guess.chars().count() > MIN_PARTIAL_GUESS_CHARS && answer.contains(&guess)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_case_accents_and_whitespace() {
        assert_eq!(normalize("  Gastrocnêmio "), "gastrocnemio");
        assert_eq!(normalize("DELTÓIDE"), "deltoide");
        assert_eq!(normalize("Punho/Mão"), "punho/mao");
        assert_eq!(normalize("Flexão Plantar"), "flexao plantar");
    }

    #[test]
    fn normalize_handles_precomposed_and_decomposed_input_alike() {
        let precomposed = "Bíceps";
        let decomposed = "Bi\u{0301}ceps";
        assert_eq!(normalize(precomposed), normalize(decomposed));
    }

    #[test]
    fn normalize_is_idempotent() {
        let samples = [
            "",
            "   ",
            "Ombro",
            "  Quadríceps Femoral\t",
            "ÇÃÕÉÍÓÚÂÊÔÀ",
            "İstanbul",
            "ΣΊΣΥΦΟΣ",
            "e\u{0301}\u{0323}",
            "straße",
            "3ª classe (interpotente)",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn helpers_compare_normalized_text() {
        assert!(texts_match("Joelho", " joelho "));
        assert!(!texts_match("Joelho", "Joelhos"));
        assert!(text_contains("Tornozelo/Pé", "pe"));
        assert!(!text_contains("Ombro", "cotovelo"));
    }

    #[test]
    fn exact_match_after_normalization_is_accepted() {
        assert!(is_valid_answer("ombro", "Ombro"));
        assert!(is_valid_answer("GLUTEO MAXIMO", "Glúteo Máximo"));
    }

    #[test]
    fn short_substrings_are_rejected() {
        assert!(!is_valid_answer("omb", "Ombro"));
        assert!(!is_valid_answer("a", "Ombro"));
        assert!(!is_valid_answer("", "Ombro"));
        assert!(!is_valid_answer("   ", "Ombro"));
    }

    #[test]
    fn substring_longer_than_three_chars_is_accepted() {
        assert!(is_valid_answer("Ombr", "Ombro"));
        assert!(is_valid_answer("biceps", "Bíceps Braquial"));
        assert!(is_valid_answer("tornozelo", "Tornozelo/Pé"));
    }

    #[test]
    fn guess_longer_than_answer_only_matches_exactly() {
        // Containment is one-directional: the answer must contain the guess.
        assert!(!is_valid_answer("ombrotest", "Ombro"));
        assert!(!is_valid_answer("ombro direito", "Ombro"));
        assert!(is_valid_answer("ombro ", "Ombro"));
    }

    #[test]
    fn substring_not_present_is_rejected() {
        assert!(!is_valid_answer("joelho", "Cotovelo"));
    }
}
