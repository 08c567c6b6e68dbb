//! Fixed keyword lists and the substring-based sentiment score.
//!
//! Matching is plain substring containment on lowercased text, so "sad" matches
//! inside "sadly". Each keyword counts once however often it occurs.

pub const POSITIVE_KEYWORDS: &[&str] = &[
    "happy",
    "excited",
    "motivated",
    "grateful",
    "energized",
    "joyful",
    "proud",
    "hopeful",
    "confident",
    "relaxed",
    "calm",
    "optimistic",
    "accomplished",
    "peaceful",
    "cheerful",
];

pub const NEGATIVE_KEYWORDS: &[&str] = &[
    "sad",
    "anxious",
    "stressed",
    "exhausted",
    "overwhelmed",
    "tired",
    "drained",
    "lonely",
    "angry",
    "frustrated",
    "worried",
    "depressed",
    "upset",
    "hopeless",
    "nervous",
];

/// Words about energy level. They overlap the other two lists because energy
/// words carry valence too.
pub const ENERGY_KEYWORDS: &[&str] = &[
    "tired",
    "energized",
    "drained",
    "focused",
    "exhausted",
    "sleepy",
    "restless",
    "productive",
    "sluggish",
    "refreshed",
    "motivated",
];

const KEYWORD_WEIGHT: f64 = 0.3;

fn matches<'a>(
    text: &'a str,
    keywords: &'a [&'static str],
) -> impl Iterator<Item = &'static str> + 'a {
    keywords
        .iter()
        .copied()
        .filter(move |keyword| text.contains(keyword))
}

/// Lexicon words found in `text`, in declaration order (positive, negative, then
/// energy). A word listed twice is reported once, at its first position.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut found: Vec<String> = Vec::new();

    for keywords in [POSITIVE_KEYWORDS, NEGATIVE_KEYWORDS, ENERGY_KEYWORDS] {
        for keyword in matches(&lowered, keywords) {
            if !found.iter().any(|k| k == keyword) {
                found.push(keyword.to_string());
            }
        }
    }

    found
}

/// Mean signed weight of the positive (+0.3) and negative (-0.3) words found in
/// `text`, clamped to [-1.0, 1.0]. Text without any of them scores exactly 0.0.
pub fn sentiment_score(text: &str) -> f64 {
    let lowered = text.to_lowercase();
    let positive = matches(&lowered, POSITIVE_KEYWORDS).count();
    let negative = matches(&lowered, NEGATIVE_KEYWORDS).count();

    let hits = positive + negative;
    if hits == 0 {
        return 0.0;
    }

    let balance = (positive as f64 - negative as f64) / hits as f64;
    (KEYWORD_WEIGHT * balance).clamp(-1.0, 1.0)
}

/// True if any of `keywords` occurs in `text`, ignoring case.
pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
    let lowered = text.to_lowercase();
    keywords.iter().any(|keyword| lowered.contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_keywords_in_declaration_order() {
        let found = extract_keywords("Tired but GRATEFUL, and a bit anxious");
        assert_eq!(found, vec!["grateful", "anxious", "tired"]);
    }

    #[test]
    fn test_extract_keywords_uses_substring_matching() {
        assert_eq!(extract_keywords("I sadly missed the bus"), vec!["sad"]);
    }

    #[test]
    fn test_extract_keywords_reports_shared_words_once() {
        let found = extract_keywords("so drained");
        assert_eq!(found, vec!["drained"]);
    }

    #[test]
    fn test_extract_keywords_empty_text() {
        assert!(extract_keywords("").is_empty());
        assert!(extract_keywords("went to the shop").is_empty());
    }

    #[test]
    fn test_sentiment_without_lexicon_words_is_zero() {
        assert_eq!(sentiment_score("went to the shop"), 0.0);
        assert_eq!(sentiment_score(""), 0.0);
    }

    #[test]
    fn test_sentiment_single_positive_word() {
        assert_eq!(sentiment_score("I feel happy"), 0.3);
    }

    #[test]
    fn test_sentiment_single_negative_word() {
        assert_eq!(sentiment_score("Pretty lonely evening"), -0.3);
    }

    #[test]
    fn test_sentiment_is_mean_not_sum() {
        assert_eq!(sentiment_score("happy, proud and hopeful"), 0.3);
        assert_eq!(sentiment_score("happy but worried"), 0.0);
    }

    #[test]
    fn test_repeated_word_counts_once() {
        assert_eq!(sentiment_score("happy happy happy but upset"), 0.0);
    }

    #[test]
    fn test_sentiment_stays_in_bounds() {
        let texts = [
            "happy excited motivated grateful energized joyful proud",
            "sad anxious stressed exhausted overwhelmed tired drained lonely",
            "happy sad calm angry",
            "Feeling overwhelmed today, lots of deadlines",
        ];
        for text in texts {
            let score = sentiment_score(text);
            assert!((-1.0..=1.0).contains(&score), "{text} scored {score}");
        }
    }

    #[test]
    fn test_contains_any_ignores_case() {
        assert!(contains_any("So much PRESSURE", &["pressure"]));
        assert!(!contains_any("calm day", &["stress"]));
    }
}
