//! Turns mood entries and task lists into supportive text.
//!
//! The analyzer does no I/O. Its only non-determinism is which canned message it
//! picks from a pool, and that goes through a [`MessagePicker`].

use crate::{
    analysis::{
        lexicon::{contains_any, extract_keywords, sentiment_score},
        picker::{MessagePicker, RandomPicker},
    },
    models::{
        mood::{Mood, MoodEntry, MoodTier},
        task::{Difficulty, Task},
    },
};

pub const SUPPORT_HEADER: &str = "💙 MooDoo's Supportive Message:";
pub const CLOSING_AFFIRMATION: &str = "Remember: You're doing great, and it's okay to adjust your plans based on how you're feeling. 💙";

pub const LOW_MOOD_MESSAGES: &[&str] = &[
    "I can see you're having a tough day. That's completely okay - we all have them! 💙",
    "It's okay to not be okay. Remember, you don't have to be productive every single day.",
    "I understand this feels hard right now. Let's take it one small step at a time.",
    "You're doing better than you think. Even getting out of bed is an achievement on hard days.",
];

pub const NEUTRAL_MESSAGES: &[&str] = &[
    "You're in a balanced place today. That's actually really good!",
    "Neutral is totally fine. Sometimes steady progress is the best kind.",
    "How about we check in on your tasks and see what feels right for today?",
    "You're doing great. Let's find something that feels good to work on.",
];

pub const HIGH_MOOD_MESSAGES: &[&str] = &[
    "You're feeling great! This is a perfect time to tackle those important tasks! ✨",
    "Your positive energy is wonderful! Let's channel that into something productive.",
    "You're in a great headspace today. What would you like to accomplish?",
    "This is your moment! You've got the energy and motivation - let's make the most of it!",
];

const STRESS_WORDS: &[&str] = &["overwhelmed", "stress", "anxiety", "pressure"];
const FATIGUE_WORDS: &[&str] = &["tired", "exhausted", "drained", "fatigue"];
const EXCITEMENT_WORDS: &[&str] = &["energized", "motivated", "excited", "happy"];

pub const STRESS_RESPONSE: &str = "I notice you're feeling overwhelmed. Let's break things down together.\n\
    What's one tiny thing you could do that would make you feel even slightly better?";
pub const FATIGUE_RESPONSE: &str = "It sounds like you're really tired. Rest is productive too!\n\
    Maybe today is a day for gentle self-care instead of pushing yourself.";
pub const EXCITEMENT_RESPONSE: &str = "I love your energy! You're clearly in a great place to get things done.\n\
    This is the perfect time to tackle those challenging tasks you've been putting off!";

pub const NO_TASKS_SUGGESTION: &str = "You don't have any tasks yet. How about adding one small thing you'd like to accomplish today?";
pub const LOW_START_SUGGESTION: &str = "💡 Suggestion: You're having a low-energy day. Maybe pick just ONE small, easy task? Even something like 'drink water' or 'make your bed' counts as a win!";
pub const LOW_PROGRESS_SUGGESTION: &str = "💡 Suggestion: You've already made some progress today! That's amazing. Maybe just one more small thing?";
pub const NEUTRAL_SUGGESTION: &str = "💡 Suggestion: You're in a good place to tackle some medium-priority tasks. What feels most important right now?";
pub const HIGH_START_SUGGESTION: &str = "💡 Suggestion: You're feeling great! This is perfect energy for tackling those high-priority tasks. Go for it! ✨";
pub const HIGH_MOMENTUM_SUGGESTION: &str = "💡 Suggestion: You're on fire today! Keep that momentum going with another task!";

const LOW_COMPLETION_THRESHOLD: f64 = 0.3;
const HIGH_COMPLETION_THRESHOLD: f64 = 0.5;

pub const EASY_PICKS_HEADER: &str = "🌱 Gentle tasks for a low-energy day:";
pub const MEDIUM_PICKS_HEADER: &str = "⚖️ Steady tasks for a balanced day:";
pub const EASY_FALLBACK_HEADER: &str = "🌱 No medium tasks waiting, so start with something easy:";
pub const HARD_PICKS_HEADER: &str = "🚀 You've got the energy for the big ones:";
pub const MEDIUM_FALLBACK_HEADER: &str = "💪 No hard tasks waiting, so here are some medium ones:";
pub const NO_EASY_TASKS: &str = "No easy tasks on your list. Maybe add something tiny, like a short walk or a glass of water?";
pub const NO_MATCHING_TASKS: &str = "Nothing on your list fits today's energy. Add a task whenever you're ready.";

pub const TREND_NEEDS_MORE: &str = "Keep logging your mood to see patterns over time!";
pub const TREND_CHALLENGING: &str = "📊 Mood Insight: You've been having more challenging days lately. Remember, this is temporary and you're doing great just by showing up.";
pub const TREND_POSITIVE: &str = "📊 Mood Insight: You've been in a really good place lately! Keep up whatever's working for you.";
pub const TREND_BALANCED: &str = "📊 Mood Insight: Your mood has been pretty balanced lately. That's actually really healthy!";

/// A mood entry after a pass through the lexicon.
#[derive(Debug, Clone, PartialEq)]
pub struct MoodAnalysis {
    /// The entry with its sentiment score set and lexicon words merged into its keywords
    pub entry: MoodEntry,
    /// Lexicon words found in this entry's content
    pub extracted_keywords: Vec<String>,
}

pub struct MoodAnalyzer<P = RandomPicker> {
    picker: P,
}

impl MoodAnalyzer<RandomPicker> {
    pub fn new() -> Self {
        Self::with_picker(RandomPicker)
    }
}

impl Default for MoodAnalyzer<RandomPicker> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: MessagePicker> MoodAnalyzer<P> {
    pub fn with_picker(picker: P) -> Self {
        Self { picker }
    }

    fn pick<'a>(&self, pool: &[&'a str]) -> &'a str {
        pool[self.picker.pick(pool.len())]
    }

    /// Scores the entry and merges the lexicon words into its keywords.
    ///
    /// Existing keywords keep their order; new ones are appended in extraction
    /// order and duplicates are dropped.
    pub fn analyze_mood_entry(&self, mut entry: MoodEntry) -> MoodAnalysis {
        let extracted_keywords = extract_keywords(&entry.content);
        entry.sentiment_score = sentiment_score(&entry.content);

        let mut keywords: Vec<String> = Vec::with_capacity(entry.keywords.len());
        for keyword in entry.keywords.drain(..).chain(extracted_keywords.iter().cloned()) {
            if !keywords.contains(&keyword) {
                keywords.push(keyword);
            }
        }
        entry.keywords = keywords;

        MoodAnalysis {
            entry,
            extracted_keywords,
        }
    }

    pub fn generate_supportive_message(&self, entry: &MoodEntry) -> String {
        let body = match entry.mood.tier() {
            MoodTier::Low if contains_any(&entry.content, STRESS_WORDS) => STRESS_RESPONSE,
            MoodTier::Low if contains_any(&entry.content, FATIGUE_WORDS) => FATIGUE_RESPONSE,
            MoodTier::Low => self.pick(LOW_MOOD_MESSAGES),
            MoodTier::Neutral => self.pick(NEUTRAL_MESSAGES),
            MoodTier::High if contains_any(&entry.content, EXCITEMENT_WORDS) => {
                EXCITEMENT_RESPONSE
            }
            MoodTier::High => self.pick(HIGH_MOOD_MESSAGES),
        };

        format!("{SUPPORT_HEADER}\n{body}\n\n{CLOSING_AFFIRMATION}")
    }

    pub fn generate_task_suggestion(
        &self,
        mood: Mood,
        completed_count: usize,
        total_count: usize,
    ) -> &'static str {
        if total_count == 0 {
            return NO_TASKS_SUGGESTION;
        }
        let completion_rate = completed_count as f64 / total_count as f64;

        match mood.tier() {
            MoodTier::Low if completion_rate < LOW_COMPLETION_THRESHOLD => LOW_START_SUGGESTION,
            MoodTier::Low => LOW_PROGRESS_SUGGESTION,
            MoodTier::Neutral => NEUTRAL_SUGGESTION,
            MoodTier::High if completion_rate < HIGH_COMPLETION_THRESHOLD => {
                HIGH_START_SUGGESTION
            }
            MoodTier::High => HIGH_MOMENTUM_SUGGESTION,
        }
    }

    /// Lists open tasks whose difficulty suits `mood`, in the order given.
    pub fn generate_mood_based_task_recommendations(&self, mood: Mood, tasks: &[Task]) -> String {
        let titles = |difficulty: Difficulty, limit: usize| {
            tasks
                .iter()
                .filter(|task| !task.completed && task.difficulty == difficulty)
                .take(limit)
                .map(|task| task.title.as_str())
                .collect::<Vec<_>>()
        };

        let candidates = match mood.tier() {
            MoodTier::Low => [(EASY_PICKS_HEADER, titles(Difficulty::Easy, 3))]
                .into_iter()
                .find(|(_, titles)| !titles.is_empty()),
            MoodTier::Neutral => [
                (MEDIUM_PICKS_HEADER, titles(Difficulty::Medium, 3)),
                (EASY_FALLBACK_HEADER, titles(Difficulty::Easy, 2)),
            ]
            .into_iter()
            .find(|(_, titles)| !titles.is_empty()),
            MoodTier::High => [
                (HARD_PICKS_HEADER, titles(Difficulty::Hard, 3)),
                (MEDIUM_FALLBACK_HEADER, titles(Difficulty::Medium, 3)),
            ]
            .into_iter()
            .find(|(_, titles)| !titles.is_empty()),
        };

        match candidates {
            Some((header, titles)) => {
                let lines: Vec<String> = titles.iter().map(|t| format!("  • {t}")).collect();
                format!("{header}\n{}", lines.join("\n"))
            }
            None if mood.tier() == MoodTier::Low => NO_EASY_TASKS.to_string(),
            None => NO_MATCHING_TASKS.to_string(),
        }
    }

    /// Compares low-tier against high-tier entries. Neutral entries count for neither.
    pub fn analyze_mood_trend(&self, entries: &[MoodEntry]) -> &'static str {
        if entries.len() < 2 {
            return TREND_NEEDS_MORE;
        }

        let low = entries
            .iter()
            .filter(|e| e.mood.tier() == MoodTier::Low)
            .count();
        let high = entries
            .iter()
            .filter(|e| e.mood.tier() == MoodTier::High)
            .count();

        match low.cmp(&high) {
            std::cmp::Ordering::Greater => TREND_CHALLENGING,
            std::cmp::Ordering::Less => TREND_POSITIVE,
            std::cmp::Ordering::Equal => TREND_BALANCED,
        }
    }

    /// Most common mood, average sentiment and recurring keywords across `entries`.
    pub fn summarize_patterns(&self, entries: &[MoodEntry]) -> String {
        if entries.len() < 2 {
            return TREND_NEEDS_MORE.to_string();
        }

        let mut mood_counts: Vec<(Mood, usize)> = Vec::new();
        let mut keyword_counts: Vec<(&str, usize)> = Vec::new();
        for entry in entries {
            bump(&mut mood_counts, entry.mood);
            for keyword in &entry.keywords {
                bump(&mut keyword_counts, keyword.as_str());
            }
        }

        // Stable sorts keep first appearance as the tie-breaker.
        mood_counts.sort_by(|a, b| b.1.cmp(&a.1));
        keyword_counts.sort_by(|a, b| b.1.cmp(&a.1));

        let average =
            entries.iter().map(|e| e.sentiment_score).sum::<f64>() / entries.len() as f64;
        let themes: Vec<&str> = keyword_counts.iter().take(3).map(|(k, _)| *k).collect();
        let themes = if themes.is_empty() {
            String::from("none yet")
        } else {
            themes.join(", ")
        };
        let (common, _) = mood_counts[0];

        format!(
            "📈 Mood Patterns ({} entries):\n  Most common mood: {} {}\n  Average sentiment: {:+.2}\n  Recurring themes: {}",
            entries.len(),
            common.display_name(),
            common.emoji(),
            average,
            themes
        )
    }
}

fn bump<K: PartialEq>(counts: &mut Vec<(K, usize)>, key: K) {
    match counts.iter_mut().find(|(k, _)| *k == key) {
        Some((_, count)) => *count += 1,
        None => counts.push((key, 1)),
    }
}
