//! Static tables used by the reply normalizer.
//!
//! Order matters in every table: substitutions run top to bottom against the
//! running text, and the first canned trigger found wins.

/// Returned for empty replies, or replies that are empty once stripped
pub const FALLBACK_REPLY: &str = "Hmm, aku belum dapat jawabannya nih. Coba tanya lagi ya!";

/// Any of these in the prompt (or the reply itself) keeps long replies intact
pub const DETAIL_KEYWORDS: &[&str] = &[
    "jelaskan",
    "jelasin",
    "detail",
    "lengkap",
    "rinci",
    "jabarkan",
    "uraikan",
    "panjang",
    "step by step",
    "langkah",
];

/// The remote model's own names. Longest first so "gemini pro" wins over "gemini".
pub const SELF_NAMES: &[&str] = &["gemini pro", "gemini", "google bard", "bard", "google ai"];

/// Greetings that get collapsed when repeated back to back
pub const GREETING_WORDS: &[&str] = &["halo", "hallo", "hai", "hi", "hello"];

/// Formal to casual Indonesian, whole word, case-insensitive
pub const SUBSTITUTIONS: &[(&str, &str)] = &[
    ("terima kasih", "makasih"),
    ("tentu saja", "pastinya"),
    ("tidak apa-apa", "santai aja"),
    ("bagaimana", "gimana"),
    ("mengapa", "kenapa"),
    ("apakah", "apa"),
    ("saya", "aku"),
    ("anda", "kamu"),
    ("tidak", "nggak"),
    ("sudah", "udah"),
    ("hanya", "cuma"),
    ("saja", "aja"),
    ("seperti", "kayak"),
    ("begitu", "gitu"),
    ("begini", "gini"),
    ("sedang", "lagi"),
    ("ingin", "pengen"),
    ("memberikan", "kasih"),
    ("mengerti", "ngerti"),
    ("bertanya", "nanya"),
    ("membantu", "bantu"),
    ("mencoba", "nyoba"),
    ("benar", "bener"),
    ("kalau", "kalo"),
    ("sebentar", "bentar"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CannedAnswer {
    pub trigger: &'static str,
    pub answer: &'static str,
}

pub const IDENTITY_ANSWER: &str =
    "Aku asisten AI di web ini. Tugasku bantu jawab pertanyaan kamu, santai aja ya!";
pub const WELLBEING_ANSWER: &str =
    "Aku baik-baik aja, makasih udah nanya! Kamu sendiri gimana?";
pub const SITE_ANSWER: &str =
    "Kamu lagi di web ini, dan aku asisten AI yang siap bantu kamu di sini.";

/// Checked against the reply after substitution
pub const CANNED_OVERRIDES: &[CannedAnswer] = &[
    CannedAnswer { trigger: "siapa kamu", answer: IDENTITY_ANSWER },
    CannedAnswer { trigger: "apa kabar", answer: WELLBEING_ANSWER },
    CannedAnswer { trigger: "web apa", answer: SITE_ANSWER },
    CannedAnswer { trigger: "lagi di web", answer: SITE_ANSWER },
];

/// Openers the normalizer may prepend
pub const OPENERS: &[&str] = &["Oke", "Nah", "Jadi", "Sip", "Hmm"];

/// A reply already starting with one of these gets no extra opener
pub const OPENER_WORDS: &[&str] = &[
    "oke", "ok", "okay", "nah", "jadi", "sip", "hmm", "wah", "oh", "halo", "hai", "hi",
];
