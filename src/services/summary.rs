use crate::{
    analysis::{analyzer::MoodAnalyzer, picker::MessagePicker},
    models::mood::Mood,
    services::{
        moods::recent_entries,
        tasks::{TaskStats, task_stats},
    },
    storage::{Storage, StorageError, store::RecordStore},
};

/// Everything the "how am I doing" view shows.
pub struct DailySummary {
    /// Mood of the most recent journal entry, if any
    pub latest_mood: Option<Mood>,
    pub stats: TaskStats,
    pub suggestion: &'static str,
    /// Only present once a mood has been logged
    pub recommendations: Option<String>,
    pub trend: &'static str,
    pub patterns: String,
}

/// Builds the summary from one read of each collection.
///
/// The two reads are separate snapshots; nothing ties them together.
pub fn daily_summary<P: MessagePicker>(
    store: &mut RecordStore,
    analyzer: &MoodAnalyzer<P>,
    trend_window: usize,
) -> Result<DailySummary, StorageError> {
    let tasks = store.tasks().load_all()?;
    let entries = store.moods().load_all()?;

    let latest_mood = entries.last().map(|entry| entry.mood);
    let stats = task_stats(&tasks);
    let recent = recent_entries(&entries, trend_window);

    Ok(DailySummary {
        latest_mood,
        stats,
        suggestion: analyzer.generate_task_suggestion(
            latest_mood.unwrap_or_default(),
            stats.completed,
            stats.total,
        ),
        recommendations: latest_mood
            .map(|mood| analyzer.generate_mood_based_task_recommendations(mood, &tasks)),
        trend: analyzer.analyze_mood_trend(recent),
        patterns: analyzer.summarize_patterns(recent),
    })
}
