//! Canned replies for inbound user messages that never need the remote model.
//!
//! These triggers are kept apart from the normalizer's own canned overrides:
//! the two lists overlap ("web apa") but are not the same set.

use once_cell::sync::Lazy;
use regex::Regex;

pub const GREETING_REPLY: &str = "Halo juga! Aku asisten AI di sini. Ada yang bisa aku bantu?";
pub const CREATOR_REPLY: &str =
    "Aku dibuat oleh tim pengembang web ini, dengan bantuan model AI dari pihak ketiga.";
pub const SITE_REPLY: &str =
    "Kamu lagi di web ini! Aku asisten AI-nya, siap bantu jawab pertanyaan kamu.";

static GREETING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:halo|hallo|hai|hi|hello|hey|pagi|selamat (?:pagi|siang|sore|malam)|assalamualaikum)(?:\s+(?:kak|min|bot))?[\s!.,?]*$",
    )
    .unwrap()
});

const CREATOR_TRIGGERS: &[&str] = &[
    "siapa yang buat",
    "siapa yang membuat",
    "siapa pembuat",
    "siapa penciptamu",
    "dibuat oleh siapa",
    "yang bikin kamu",
];

const SITE_TRIGGERS: &[&str] = &["dimana", "di mana ini", "web apa", "website apa", "situs apa"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CannedKind {
    Greeting,
    Creator,
    Site,
}

impl CannedKind {
    pub fn reply(self) -> &'static str {
        match self {
            CannedKind::Greeting => GREETING_REPLY,
            CannedKind::Creator => CREATOR_REPLY,
            CannedKind::Site => SITE_REPLY,
        }
    }
}

/// Classify a user message; `None` means it goes to the remote model
pub fn classify(message: &str) -> Option<CannedKind> {
    let trimmed = message.trim();
    if GREETING.is_match(trimmed) {
        return Some(CannedKind::Greeting);
    }

    let lower = trimmed.to_lowercase();
    if CREATOR_TRIGGERS.iter().any(|t| lower.contains(t)) {
        return Some(CannedKind::Creator);
    }
    if SITE_TRIGGERS.iter().any(|t| lower.contains(t)) {
        return Some(CannedKind::Site);
    }
    None
}

/// Canned reply text for a user message, if it has one
pub fn canned_reply(message: &str) -> Option<&'static str> {
    classify(message).map(CannedKind::reply)
}
