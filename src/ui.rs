use colored::*;
use jiff::{Timestamp, Zoned, tz::TimeZone};

use crate::models::{
    mood::{Mood, MoodEntry},
    task::{Difficulty, Priority, Task},
};

/// Characters of journal content shown in list views
const PREVIEW_CHARS: usize = 50;

/// Get the terminal width, defaulting to 80 if unavailable
fn get_terminal_width() -> usize {
    term_size::dimensions().map(|(w, _)| w).unwrap_or(80)
}

/// Get the appropriate status glyph for a task
pub fn get_status_glyph(task: &Task) -> ColoredString {
    if task.completed {
        "✓".dimmed()
    } else {
        "○".normal()
    }
}

pub fn priority_badge(priority: Priority) -> ColoredString {
    match priority {
        Priority::Low => "low".green(),
        Priority::Medium => "medium".yellow(),
        Priority::High => "high".red(),
    }
}

pub fn difficulty_glyph(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => "📚",
        Difficulty::Medium => "📝",
        Difficulty::Hard => "💪",
    }
}

/// Render a single task line with ID, glyph, title and right-aligned priority
pub fn render_task_line(task: &Task) {
    let terminal_width = get_terminal_width();

    let id_str = format!("{:>3}", task.id);
    let glyph = get_status_glyph(task);
    let left_section = format!(
        "  {}  {}  {} {}",
        id_str,
        glyph,
        difficulty_glyph(task.difficulty),
        task.title
    );
    let styled_left = if task.completed {
        left_section.dimmed()
    } else {
        left_section.bold()
    };

    let right_section = match task.completed_at {
        Some(at) => format!("{} · {}", format_day(at), task.priority),
        None => task.priority.to_string(),
    };

    // status glyph is one column, difficulty emoji two
    let left_visible_len = 2 + id_str.chars().count() + 2 + 1 + 2 + 2 + 1 + task.title.chars().count();
    let total_content = left_visible_len + right_section.chars().count();

    let right = match task.completed_at {
        Some(_) => right_section.dimmed(),
        None => priority_badge(task.priority),
    };

    if total_content + 4 < terminal_width {
        let padding = terminal_width - total_content - 2;
        println!("{}{}{}", styled_left, " ".repeat(padding), right);
    } else {
        println!("{}", styled_left);
    }

    if !task.description.is_empty() {
        println!("        {}", task.description.dimmed());
    }
}

/// Render one journal entry: mood, time and a preview of the content
pub fn render_mood_line(entry: &MoodEntry) {
    println!(
        "  {:>3}  {} {}  {}",
        entry.id,
        entry.mood.emoji(),
        mood_label(entry.mood),
        format_time(entry.timestamp).dimmed()
    );
    println!("       {}", preview(&entry.content));
    if !entry.keywords.is_empty() {
        println!("       {}", entry.keywords.join(", ").dimmed());
    }
}

pub fn mood_label(mood: Mood) -> ColoredString {
    match mood {
        Mood::VeryLow | Mood::Low => mood.display_name().blue(),
        Mood::Neutral => mood.display_name().normal(),
        Mood::Good | Mood::Excellent => mood.display_name().green(),
    }
}

fn preview(content: &str) -> String {
    if content.chars().count() > PREVIEW_CHARS {
        let cut: String = content.chars().take(PREVIEW_CHARS).collect();
        format!("{cut}...")
    } else {
        content.to_string()
    }
}

/// Format a timestamp in local time (e.g., "Feb 15, 9:30 AM")
fn format_time(timestamp: Timestamp) -> String {
    Zoned::new(timestamp, TimeZone::system())
        .strftime("%b %d, %-I:%M %p")
        .to_string()
}

/// Format a day relative to today (e.g., "Today", "Yesterday", "Feb 15")
fn format_day(timestamp: Timestamp) -> String {
    let date = Zoned::new(timestamp, TimeZone::system()).date();
    let today = Zoned::now().date();

    if date == today {
        "Today".to_string()
    } else if today.yesterday().is_ok_and(|yesterday| yesterday == date) {
        "Yesterday".to_string()
    } else {
        date.strftime("%b %d").to_string()
    }
}

/// Render a view header with title and count
pub fn render_view_header(title: &str, count: usize, noun: &str) {
    let noun = if count == 1 {
        noun.to_string()
    } else {
        format!("{noun}s")
    };
    println!("\n  {} ({} {})\n", title.cyan().bold(), count, noun);
}

/// Render a section header (e.g., "Suggestion", "Trend")
pub fn render_section_header(title: &str) {
    println!("\n  ─── {} ───\n", title.bold());
}

/// Render a multi-line block of generated text, indented
pub fn render_block(text: &str) {
    for line in text.lines() {
        println!("  {}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_truncates_long_content() {
        let long = "a".repeat(60);
        assert_eq!(preview(&long), format!("{}...", "a".repeat(50)));
        assert_eq!(preview("short"), "short");
    }

    #[test]
    fn test_format_day_today() {
        assert_eq!(format_day(Timestamp::now()), "Today");
    }
}
