//! Reply normalizer: turns raw model output into the short, casual text shown
//! in the conversation.

pub mod rules;

use crate::config::NormalizerConfig;
use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use regex::{Captures, Regex};
use rules::{
    CANNED_OVERRIDES, DETAIL_KEYWORDS, FALLBACK_REPLY, GREETING_WORDS, OPENERS, OPENER_WORDS,
    SELF_NAMES, SUBSTITUTIONS,
};

static EXCLAMATION_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"!{2,}").unwrap());
static QUESTION_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\?{2,}").unwrap());
static NEWLINE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]*\n\s*").unwrap());
static SPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").unwrap());
static SPACE_BEFORE_PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+([,.!?])").unwrap());
static LEADING_PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\s,.;:!?-]+").unwrap());
static LIST_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\b(\d{1,2})\.\s+").unwrap());

static SELF_NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let names: Vec<String> = SELF_NAMES.iter().map(|n| regex::escape(n)).collect();
    Regex::new(&format!(r"(?i)\b(?:{})\b", names.join("|"))).unwrap()
});

static REPEATED_GREETINGS: Lazy<Vec<Regex>> = Lazy::new(|| {
    GREETING_WORDS
        .iter()
        .map(|g| {
            let g = regex::escape(g);
            Regex::new(&format!(r"(?i)\b({g})(?:[\s,!.]+{g}\b)+")).unwrap()
        })
        .collect()
});

static SUBSTITUTION_PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    SUBSTITUTIONS
        .iter()
        .map(|(from, to)| {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(from));
            (Regex::new(&pattern).unwrap(), *to)
        })
        .collect()
});

/// Reply normalizer. Everything is deterministic except the opener, which
/// draws from the injected RNG.
pub struct Normalizer {
    max_reply_chars: usize,
    casual_openers: bool,
    rng: StdRng,
}

impl Normalizer {
    pub fn new(config: &NormalizerConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Fixed seed, for reproducible openers
    pub fn seeded(config: &NormalizerConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(config: &NormalizerConfig, rng: StdRng) -> Self {
        Self {
            max_reply_chars: config.max_reply_chars,
            casual_openers: config.casual_openers,
            rng,
        }
    }

    /// Normalize a reply with no prompt context
    pub fn normalize(&mut self, raw: &str) -> String {
        self.normalize_reply(raw, None)
    }

    /// Normalize a reply. `prompt` is the user message that produced it; when
    /// given, only the prompt decides whether a long reply is kept whole.
    pub fn normalize_reply(&mut self, raw: &str, prompt: Option<&str>) -> String {
        if raw.trim().is_empty() {
            return FALLBACK_REPLY.to_string();
        }

        let detail_requested = mentions_detail(prompt.unwrap_or(raw));
        let text = truncate_long_reply(raw.trim(), self.max_reply_chars, detail_requested);
        let text = collapse_punctuation(&text);

        let text = strip_self_references(&text);
        if text.is_empty() {
            tracing::debug!("reply empty after stripping self references");
            return FALLBACK_REPLY.to_string();
        }

        let text = apply_substitutions(&text);

        if let Some(answer) = canned_override(&text) {
            tracing::debug!("canned override matched");
            return answer.to_string();
        }

        let text = format_list(&text);

        if self.casual_openers {
            add_opener(&text, &mut self.rng)
        } else {
            text
        }
    }
}

fn mentions_detail(text: &str) -> bool {
    let lower = text.to_lowercase();
    DETAIL_KEYWORDS.iter().any(|k| lower.contains(k))
}

/// Keep at most two sentences of an over-long reply, ending with a single `.`
fn truncate_long_reply(text: &str, max_chars: usize, detail_requested: bool) -> String {
    if detail_requested || text.chars().count() <= max_chars {
        return text.to_string();
    }

    let kept: Vec<String> = split_sentences(text).into_iter().take(2).collect();
    let joined = kept.join(" ");
    let body = joined.trim_end_matches(|c: char| matches!(c, '.' | '!' | '?') || c.is_whitespace());
    format!("{}.", body)
}

/// Sentences keep their terminators; a trailing unterminated fragment counts as one.
fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') {
            while let Some(&next) = chars.peek() {
                if matches!(next, '.' | '!' | '?') {
                    current.push(next);
                    chars.next();
                } else {
                    break;
                }
            }
            let sentence = current.trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            current.clear();
        }
    }

    let rest = current.trim();
    if !rest.is_empty() {
        sentences.push(rest.to_string());
    }
    sentences
}

fn collapse_punctuation(text: &str) -> String {
    let text = EXCLAMATION_RUN.replace_all(text, "!");
    let text = QUESTION_RUN.replace_all(&text, "?");
    let text = NEWLINE_RUN.replace_all(&text, "\n");
    let text = SPACE_RUN.replace_all(&text, " ");
    text.trim().to_string()
}

fn strip_self_references(text: &str) -> String {
    let mut text = SELF_NAME_PATTERN.replace_all(text, "").into_owned();
    for pattern in REPEATED_GREETINGS.iter() {
        text = pattern.replace_all(&text, "${1}").into_owned();
    }

    // Tidy what the removals left behind
    let text = SPACE_RUN.replace_all(&text, " ");
    let text = SPACE_BEFORE_PUNCT.replace_all(&text, "${1}");
    let text = LEADING_PUNCT.replace(&text, "");
    text.trim().to_string()
}

fn apply_substitutions(text: &str) -> String {
    let mut text = text.to_string();
    for (pattern, replacement) in SUBSTITUTION_PATTERNS.iter() {
        let source = std::mem::take(&mut text);
        text = pattern
            .replace_all(&source, |caps: &Captures| {
                let whole = caps.get(0).map_or(0..0, |m| m.range());
                let starts_upper = source[whole.clone()].chars().next().is_some_and(char::is_uppercase);
                if starts_upper && at_sentence_start(&source[..whole.start]) {
                    capitalize_first(replacement)
                } else {
                    replacement.to_string()
                }
            })
            .into_owned();
    }
    text
}

/// Capitals mid-sentence (the polite "Anda") are not carried over
fn at_sentence_start(before: &str) -> bool {
    let before = before.trim_end();
    before.is_empty() || before.ends_with(['.', '!', '?', '\n', ':'])
}

fn canned_override(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();
    CANNED_OVERRIDES
        .iter()
        .find(|canned| lower.contains(canned.trigger))
        .map(|canned| canned.answer)
}

fn format_list(text: &str) -> String {
    if !text.contains("1.") {
        return text.to_string();
    }

    let text = LIST_ITEM.replace_all(text, "\n${1}. ");
    let text = text.replace("**", "").replace("__", "");
    text.trim_start().to_string()
}

fn add_opener(text: &str, rng: &mut StdRng) -> String {
    let first_word: String = text
        .chars()
        .take_while(|c| c.is_alphanumeric())
        .collect::<String>()
        .to_lowercase();
    if OPENER_WORDS.contains(&first_word.as_str()) {
        return text.to_string();
    }

    let opener = OPENERS.choose(rng).copied().unwrap_or("Oke");
    format!("{}, {}", opener, lowercase_first(text))
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Leaves acronyms such as "AI" alone
fn lowercase_first(text: &str) -> String {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    if chars.clone().next().is_some_and(char::is_uppercase) {
        return text.to_string();
    }
    first.to_lowercase().chain(chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rules::{IDENTITY_ANSWER, SITE_ANSWER, WELLBEING_ANSWER};

    fn plain() -> Normalizer {
        Normalizer::seeded(
            &NormalizerConfig {
                max_reply_chars: 100,
                casual_openers: false,
            },
            7,
        )
    }

    const LONG_REPLY: &str = "Ibu kota Indonesia adalah Jakarta. Kota ini terletak di pulau Jawa! \
        Jakarta juga merupakan pusat bisnis terbesar di negara ini. Populasinya lebih dari sepuluh juta jiwa.";

    #[test]
    fn test_empty_input_returns_fallback() {
        let mut normalizer = plain();
        assert_eq!(normalizer.normalize(""), FALLBACK_REPLY);
        assert_eq!(normalizer.normalize("   "), FALLBACK_REPLY);
        assert_eq!(normalizer.normalize("\n\t"), FALLBACK_REPLY);
    }

    #[test]
    fn test_fallback_skips_opener() {
        let mut normalizer = Normalizer::seeded(&NormalizerConfig::default(), 1);
        assert_eq!(normalizer.normalize(" "), FALLBACK_REPLY);
    }

    #[test]
    fn test_long_reply_is_cut_to_two_sentences() {
        let mut normalizer = plain();
        let out = normalizer.normalize_reply(LONG_REPLY, Some("ibu kota indonesia apa?"));
        assert_eq!(out, "Ibu kota Indonesia adalah Jakarta. Kota ini terletak di pulau Jawa.");
        assert_eq!(split_sentences(&out).len(), 2);
        assert!(out.ends_with('.') && !out.ends_with(".."));
    }

    #[test]
    fn test_detail_keyword_in_prompt_keeps_long_reply() {
        let mut normalizer = plain();
        let out = normalizer.normalize_reply(LONG_REPLY, Some("Jelaskan secara lengkap soal Jakarta"));
        assert!(out.contains("Populasinya lebih dari sepuluh juta jiwa."));
    }

    #[test]
    fn test_detail_word_in_reply_alone_does_not_keep_it_long() {
        let mut normalizer = plain();
        let reply = "Ada beberapa langkah mudah untuk memasak nasi. Cuci beras sampai bersih. \
            Masukkan air secukupnya ke panci. Masak sampai matang dan tiriskan.";
        let out = normalizer.normalize_reply(reply, Some("gimana cara masak nasi?"));
        assert!(split_sentences(&out).len() <= 2, "got {:?}", out);
        assert!(out.ends_with('.') && !out.ends_with(".."));
    }

    #[test]
    fn test_without_prompt_reply_keywords_count() {
        let mut normalizer = plain();
        let reply = "Ini penjelasan lengkap soal Jakarta. Kota ini ramai sekali. \
            Banyak gedung tinggi di pusat kota. Macetnya juga terkenal.";
        assert_eq!(normalizer.normalize(reply), reply);
    }

    #[test]
    fn test_short_reply_is_not_truncated() {
        assert_eq!(truncate_long_reply("Satu. Dua. Tiga.", 100, false), "Satu. Dua. Tiga.");
    }

    #[test]
    fn test_truncation_of_single_unterminated_sentence() {
        let text = "a".repeat(120);
        let out = truncate_long_reply(&text, 100, false);
        assert_eq!(out, format!("{}.", text));
    }

    #[test]
    fn test_punctuation_runs_collapse() {
        assert_eq!(collapse_punctuation("Wah!!! Serius??"), "Wah! Serius?");
        assert_eq!(collapse_punctuation("satu   dua\t\ttiga"), "satu dua tiga");
        assert_eq!(collapse_punctuation("baris satu  \n\n\n  baris dua"), "baris satu\nbaris dua");
    }

    #[test]
    fn test_normalize_twice_leaves_no_runs() {
        let mut normalizer = plain();
        let once = normalizer.normalize("Keren!!!! Mau coba??? Ayo!!");
        let twice = normalizer.normalize(&once);
        assert!(!twice.contains("!!"));
        assert!(!twice.contains("??"));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_self_names_are_stripped() {
        assert_eq!(strip_self_references("Halo, aku Gemini!"), "Halo, aku!");
        assert_eq!(strip_self_references("Gemini Pro di sini, siap bantu."), "di sini, siap bantu.");
    }

    #[test]
    fn test_repeated_greetings_collapse() {
        assert_eq!(strip_self_references("Halo halo, ada apa?"), "Halo, ada apa?");
        assert_eq!(strip_self_references("hai hai hai!"), "hai!");
    }

    #[test]
    fn test_reply_of_only_self_name_falls_back() {
        let mut normalizer = plain();
        assert_eq!(normalizer.normalize("Gemini"), FALLBACK_REPLY);
    }

    #[test]
    fn test_substitutions_apply_every_entry() {
        let out = apply_substitutions("Saya tidak tahu apakah Anda sudah makan.");
        assert_eq!(out, "Aku nggak tahu apa kamu udah makan.");
    }

    #[test]
    fn test_substitution_keeps_capital_at_sentence_start() {
        assert_eq!(apply_substitutions("Oke. Saya siap."), "Oke. Aku siap.");
    }

    #[test]
    fn test_substitutions_are_whole_word() {
        // "sayang" and "andalan" must survive
        assert_eq!(apply_substitutions("sayang andalan"), "sayang andalan");
    }

    #[test]
    fn test_multi_word_substitution_runs_before_single_words() {
        assert_eq!(apply_substitutions("Tentu saja bisa"), "Pastinya bisa");
    }

    #[test]
    fn test_identity_override_after_substitution() {
        let mut normalizer = plain();
        let out = normalizer.normalize("Siapa Anda? Itu pertanyaan bagus, saya adalah model bahasa besar.");
        assert_eq!(out, IDENTITY_ANSWER);
    }

    #[test]
    fn test_override_wins_over_opener() {
        let mut normalizer = Normalizer::seeded(&NormalizerConfig::default(), 3);
        assert_eq!(normalizer.normalize("Apa kabar? Semoga harimu menyenangkan"), WELLBEING_ANSWER);
        assert_eq!(normalizer.normalize("Kamu lagi di web dokumentasi"), SITE_ANSWER);
    }

    #[test]
    fn test_numbered_list_is_reflowed() {
        let out = format_list("Langkahnya: 1. **Buka** aplikasi 2. Pilih menu 3. Simpan");
        assert_eq!(out, "Langkahnya:\n1. Buka aplikasi\n2. Pilih menu\n3. Simpan");
    }

    #[test]
    fn test_text_without_list_marker_is_untouched() {
        assert_eq!(format_list("Ada **dua** hal"), "Ada **dua** hal");
    }

    #[test]
    fn test_opener_is_prepended_and_lowercases() {
        let mut normalizer = Normalizer::seeded(&NormalizerConfig::default(), 42);
        let out = normalizer.normalize("Jakarta adalah ibu kota.");
        let (opener, rest) = out.split_once(", ").unwrap();
        assert!(OPENERS.contains(&opener));
        assert_eq!(rest, "jakarta adalah ibu kota.");
    }

    #[test]
    fn test_existing_opener_is_kept() {
        let mut normalizer = Normalizer::seeded(&NormalizerConfig::default(), 42);
        assert_eq!(normalizer.normalize("Oke, ini jawabannya."), "Oke, ini jawabannya.");
    }

    #[test]
    fn test_same_seed_same_output() {
        let config = NormalizerConfig::default();
        let mut a = Normalizer::seeded(&config, 9);
        let mut b = Normalizer::seeded(&config, 9);
        for reply in ["Bisa dong.", "Tentu, ini caranya.", "Menarik sekali."] {
            assert_eq!(a.normalize(reply), b.normalize(reply));
        }
    }

    #[test]
    fn test_acronym_is_not_lowercased() {
        assert_eq!(lowercase_first("AI itu keren"), "AI itu keren");
        assert_eq!(lowercase_first("Itu keren"), "itu keren");
    }
}
