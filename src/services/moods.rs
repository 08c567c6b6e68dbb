use thiserror::Error;

use crate::{
    analysis::{analyzer::MoodAnalyzer, picker::MessagePicker},
    models::mood::{Mood, MoodEntry},
    storage::{
        Storage, StorageError,
        codec::{FieldError, check_keyword, check_text_field},
    },
};

#[derive(Debug, Error)]
pub enum LogMoodError {
    #[error("Please describe how you're feeling")]
    EmptyContent,

    #[error("{0}")]
    InvalidText(#[from] FieldError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub struct LogMoodParameters {
    pub content: String,
    pub mood: Mood,
    pub keywords: Vec<String>,
}

pub struct LoggedMood {
    /// The entry as saved, with lexicon keywords and sentiment filled in
    pub entry: MoodEntry,
    pub extracted_keywords: Vec<String>,
    pub message: String,
}

/// Analyzes a new journal entry, saves it and builds the supportive reply.
pub fn log_mood<P: MessagePicker>(
    storage: &mut impl Storage<MoodEntry>,
    analyzer: &MoodAnalyzer<P>,
    parameters: LogMoodParameters,
) -> Result<LoggedMood, LogMoodError> {
    let content = parameters.content.trim().to_string();
    if content.is_empty() {
        return Err(LogMoodError::EmptyContent);
    }
    check_text_field("content", &content)?;

    let keywords: Vec<String> = parameters
        .keywords
        .iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect();
    for keyword in &keywords {
        check_keyword(keyword)?;
    }

    let mut entry = MoodEntry::new(storage.next_id()?, content, parameters.mood);
    entry.keywords = keywords;
    let analysis = analyzer.analyze_mood_entry(entry);

    storage.create(&analysis.entry)?;

    let message = analyzer.generate_supportive_message(&analysis.entry);
    Ok(LoggedMood {
        entry: analysis.entry,
        extracted_keywords: analysis.extracted_keywords,
        message,
    })
}

#[derive(Debug, Error)]
pub enum DeleteMoodError {
    #[error("Mood entry #{0} not found")]
    EntryNotFound(u64),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub fn delete_mood(storage: &mut impl Storage<MoodEntry>, id: u64) -> Result<(), DeleteMoodError> {
    match storage.delete(id) {
        Ok(()) => Ok(()),
        Err(StorageError::NotFound { .. }) => Err(DeleteMoodError::EntryNotFound(id)),
        Err(e) => Err(e.into()),
    }
}

/// The last `window` entries in file order, i.e. the most recently logged ones.
pub fn recent_entries(entries: &[MoodEntry], window: usize) -> &[MoodEntry] {
    &entries[entries.len().saturating_sub(window)..]
}
