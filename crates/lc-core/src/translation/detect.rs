//! Source-language detection for `"auto"` requests.
//!
//! Short inputs (up to [`SHORT_INPUT_MAX_WORDS`] words) are checked against
//! small per-language sets of known words. The sets are pairwise disjoint, so
//! a word votes for exactly one language. When words from two or more sets
//! appear, the text is reported as [`Detection::Mixed`].
//!
//! Anything else goes through a statistical pass: writing-system ranges,
//! Vietnamese diacritics, then stop-word frequency, defaulting to English.

use super::model::MIXED_LANG;

pub const SHORT_INPUT_MAX_WORDS: usize = 6;

const DEFAULT_LANG: &str = "en";

const KNOWN_WORDS: &[(&str, &[&str])] = &[
    (
        "en",
        &[
            "hello", "hi", "world", "thank", "thanks", "you", "goodbye", "good", "morning",
            "night", "yes", "please", "sorry", "the", "and", "is", "are", "how", "what",
            "love", "friend", "water",
        ],
    ),
    (
        "vi",
        &[
            "xin", "chào", "cảm", "ơn", "thế", "giới", "tạm", "biệt", "không", "có", "bạn",
            "tôi", "là", "và", "của", "những", "người", "nước", "yêu", "khỏe",
        ],
    ),
    (
        "fr",
        &[
            "bonjour", "merci", "monde", "au", "revoir", "oui", "le", "la", "les", "et",
            "est", "je", "tu", "vous", "ami", "eau", "bonsoir", "salut", "très", "bien",
        ],
    ),
    (
        "es",
        &[
            "hola", "gracias", "mundo", "adiós", "sí", "el", "los", "las", "y", "está", "yo",
            "amigo", "agua", "buenos", "días", "por", "favor", "muy", "bueno", "señor",
        ],
    ),
    (
        "de",
        &[
            "hallo", "danke", "welt", "tschüss", "ja", "nein", "ich", "du", "und", "ist",
            "der", "die", "das", "nicht", "gut", "morgen", "bitte", "wasser", "freund",
            "sehr",
        ],
    ),
];

const STOP_WORDS: &[(&str, &[&str])] = &[
    (
        "en",
        &[
            "the", "and", "is", "are", "of", "to", "in", "that", "it", "for", "with", "this",
            "was", "be", "on", "not", "have", "you", "a", "an",
        ],
    ),
    (
        "fr",
        &[
            "le", "la", "les", "et", "est", "de", "des", "un", "une", "du", "que", "qui",
            "dans", "pour", "pas", "sur", "au", "avec", "ce", "il",
        ],
    ),
    (
        "es",
        &[
            "el", "la", "los", "las", "y", "es", "de", "que", "en", "un", "una", "por",
            "con", "para", "no", "se", "del", "al", "lo", "como",
        ],
    ),
    (
        "de",
        &[
            "der", "die", "das", "und", "ist", "nicht", "ein", "eine", "zu", "mit", "sich",
            "auf", "für", "von", "den", "dem", "auch", "es", "ich", "sie",
        ],
    ),
    (
        "vi",
        &[
            "và", "là", "của", "có", "không", "những", "được", "cho", "các", "một", "này",
            "với", "người", "trong", "đã", "tôi", "bạn",
        ],
    ),
];

// Letters that only occur in Vietnamese among the supported Latin languages.
const VIETNAMESE_MARKS: &str = "ăđơưạảấầẩẫậắằẳẵặẹẻẽếềểễệỉịọỏốồổỗộớờởỡợụủứừửữựỳỵỷỹ";

/// Result of language detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detection {
    Single(&'static str),
    /// Known words from two or more languages in one short input.
    Mixed,
}

impl Detection {
    pub fn code(&self) -> &'static str {
        match self {
            Detection::Single(code) => code,
            Detection::Mixed => MIXED_LANG,
        }
    }

    pub fn is_mixed(&self) -> bool {
        matches!(self, Detection::Mixed)
    }
}

pub fn detect_language(text: &str) -> Detection {
    let words: Vec<String> = text.split_whitespace().map(bare_word).collect();

    if !words.is_empty() && words.len() <= SHORT_INPUT_MAX_WORDS {
        if let Some(detection) = detect_short(&words) {
            return detection;
        }
    }

    Detection::Single(detect_statistical(text, &words))
}

/// Language whose known-word set contains `word`, if any.
pub fn known_word_language(word: &str) -> Option<&'static str> {
    let word = bare_word(word);
    KNOWN_WORDS
        .iter()
        .find(|(_, set)| set.contains(&word.as_str()))
        .map(|(lang, _)| *lang)
}

fn bare_word(word: &str) -> String {
    word.trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}

fn detect_short(words: &[String]) -> Option<Detection> {
    let mut hits: Vec<&'static str> = Vec::new();
    for word in words {
        if let Some(lang) = known_word_language(word) {
            if !hits.contains(&lang) {
                hits.push(lang);
            }
        }
    }

    match hits.as_slice() {
        [] => None,
        [single] => Some(Detection::Single(single)),
        _ => Some(Detection::Mixed),
    }
}

fn detect_statistical(text: &str, words: &[String]) -> &'static str {
    if let Some(lang) = detect_script(text) {
        return lang;
    }

    if text
        .chars()
        .flat_map(char::to_lowercase)
        .any(|c| VIETNAMESE_MARKS.contains(c))
    {
        return "vi";
    }

    let mut best = (DEFAULT_LANG, 0usize);
    for (lang, stop_words) in STOP_WORDS {
        let score = words
            .iter()
            .filter(|w| stop_words.contains(&w.as_str()))
            .count();
        if score > best.1 {
            best = (lang, score);
        }
    }
    best.0
}

fn detect_script(text: &str) -> Option<&'static str> {
    let mut kana = 0usize;
    let mut han = 0usize;
    let mut hangul = 0usize;
    let mut cyrillic = 0usize;
    let mut thai = 0usize;
    let mut arabic = 0usize;
    let mut latin = 0usize;

    for c in text.chars() {
        match c as u32 {
            0x3040..=0x30FF => kana += 1,
            0x4E00..=0x9FFF | 0x3400..=0x4DBF => han += 1,
            0xAC00..=0xD7AF | 0x1100..=0x11FF => hangul += 1,
            0x0400..=0x04FF => cyrillic += 1,
            0x0E00..=0x0E7F => thai += 1,
            0x0600..=0x06FF => arabic += 1,
            _ if c.is_alphabetic() => latin += 1,
            _ => {}
        }
    }

    // Japanese text mixes kana with Han characters.
    if kana > 0 && kana + han >= latin {
        return Some("ja");
    }

    let candidates = [
        ("zh", han),
        ("ko", hangul),
        ("ru", cyrillic),
        ("th", thai),
        ("ar", arabic),
    ];
    candidates
        .into_iter()
        .filter(|(_, count)| *count > 0 && *count >= latin)
        .max_by_key(|(_, count)| *count)
        .map(|(lang, _)| lang)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn known_word_sets_are_pairwise_disjoint() {
        let mut seen: HashSet<&str> = HashSet::new();
        for (lang, words) in KNOWN_WORDS {
            for word in *words {
                assert!(seen.insert(word), "{word:?} ({lang}) appears in two sets");
            }
        }
    }

    #[test]
    fn short_english_is_detected() {
        assert_eq!(detect_language("hello world"), Detection::Single("en"));
        assert_eq!(detect_language("Hello, World!"), Detection::Single("en"));
    }

    #[test]
    fn short_vietnamese_is_detected() {
        assert_eq!(detect_language("xin chào"), Detection::Single("vi"));
    }

    #[test]
    fn words_from_two_sets_are_mixed() {
        let detection = detect_language("hello bonjour");
        assert!(detection.is_mixed());
        assert_eq!(detection.code(), "mixed");
    }

    #[test]
    fn scripts_are_recognized() {
        assert_eq!(detect_language("こんにちは世界"), Detection::Single("ja"));
        assert_eq!(detect_language("你好世界"), Detection::Single("zh"));
        assert_eq!(detect_language("안녕하세요"), Detection::Single("ko"));
        assert_eq!(detect_language("привет мир"), Detection::Single("ru"));
    }

    #[test]
    fn vietnamese_diacritics_win_for_long_text() {
        let text = "hôm nay trời đẹp quá nên chúng ta đi dạo công viên nhé";
        assert_eq!(detect_language(text), Detection::Single("vi"));
    }

    #[test]
    fn stop_words_decide_long_latin_text() {
        let text = "le chat est sur la table et il dort dans le salon";
        assert_eq!(detect_language(text), Detection::Single("fr"));

        let text = "der Hund ist nicht auf dem Tisch und die Katze schläft";
        assert_eq!(detect_language(text), Detection::Single("de"));
    }

    #[test]
    fn unknown_text_defaults_to_english() {
        assert_eq!(detect_language("zxq vbn"), Detection::Single("en"));
    }
}
