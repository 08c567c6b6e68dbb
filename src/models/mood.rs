use jiff::Timestamp;

use crate::models::coded::{Coded, label_conversions};

/// Self-reported mood, ordered from worst to best.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Mood {
    VeryLow,
    Low,
    #[default]
    Neutral,
    Good,
    Excellent,
}

impl Coded for Mood {
    const KIND: &'static str = "mood";
    const TABLE: &'static [(Self, u8, &'static str)] = &[
        (Mood::VeryLow, 1, "very-low"),
        (Mood::Low, 2, "low"),
        (Mood::Neutral, 3, "neutral"),
        (Mood::Good, 4, "good"),
        (Mood::Excellent, 5, "excellent"),
    ];
    const FALLBACK: Self = Mood::Neutral;
}

label_conversions!(Mood);

/// Coarse grouping of [`Mood`] used by every branching heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoodTier {
    Low,
    Neutral,
    High,
}

impl Mood {
    pub fn tier(self) -> MoodTier {
        match self {
            Mood::VeryLow | Mood::Low => MoodTier::Low,
            Mood::Neutral => MoodTier::Neutral,
            Mood::Good | Mood::Excellent => MoodTier::High,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Mood::VeryLow => "Very Low",
            Mood::Low => "Low",
            Mood::Neutral => "Neutral",
            Mood::Good => "Good",
            Mood::Excellent => "Excellent",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Mood::VeryLow => "😢",
            Mood::Low => "😕",
            Mood::Neutral => "😐",
            Mood::Good => "😊",
            Mood::Excellent => "😄",
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct MoodEntry {
    pub id: u64,
    /// Free-text journal entry
    pub content: String,
    pub mood: Mood,
    pub timestamp: Timestamp,
    /// User-supplied keywords merged with the ones found by the lexicon
    pub keywords: Vec<String>,
    /// Mean signed weight of matched lexicon words, in [-1.0, 1.0]
    pub sentiment_score: f64,
}

impl MoodEntry {
    pub fn new(id: u64, content: impl Into<String>, mood: Mood) -> Self {
        Self {
            id,
            content: content.into(),
            mood,
            timestamp: crate::models::now(),
            ..MoodEntry::default()
        }
    }
}
