use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::*;

use crate::{
    analysis::analyzer::MoodAnalyzer,
    config::Config,
    models::{
        mood::Mood,
        task::{Difficulty, Priority},
    },
    services::{
        moods::{LogMoodParameters, delete_mood, log_mood, recent_entries},
        summary::daily_summary,
        tasks::{
            AddTaskParameters, add_task, complete_task, delete_task, list_tasks, reopen_task,
            task_stats,
        },
    },
    storage::{Storage, store::RecordStore},
};

mod analysis;
mod config;
mod logging;
mod models;
mod services;
mod storage;
mod ui;

#[derive(Parser)]
#[command(
    name = "moodoo",
    about = "A task list and mood journal that looks after each other"
)]
struct Cli {
    /// Directory holding the task and journal files
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage tasks
    #[command(subcommand)]
    Task(TaskCommands),

    /// Journal how you feel
    #[command(subcommand)]
    Mood(MoodCommands),

    /// Show today's summary with task suggestions (default)
    Suggest,

    /// Show how your mood has been lately
    Trend,

    /// Copy the data files into the backups directory
    Backup,

    /// Restore the data files from the latest backup
    Restore,
}

#[derive(Subcommand)]
enum TaskCommands {
    /// Add a new task
    Add {
        /// Task title
        title: String,

        /// Longer description
        #[arg(short, long)]
        description: Option<String>,

        /// low, medium or high
        #[arg(short, long, default_value = "medium")]
        priority: Priority,

        /// easy, medium or hard
        #[arg(short = 'D', long, default_value = "medium")]
        difficulty: Difficulty,
    },

    /// List tasks
    List {
        /// Only show tasks with this priority
        #[arg(short, long)]
        priority: Option<Priority>,
    },

    /// Complete a task
    Done { id: u64 },

    /// Mark a completed task as pending again
    Undo { id: u64 },

    /// Delete a task
    Delete { id: u64 },
}

#[derive(Subcommand)]
enum MoodCommands {
    /// Write a journal entry
    Log {
        /// What's on your mind
        content: String,

        /// very-low, low, neutral, good or excellent
        #[arg(short, long)]
        mood: Mood,

        /// Add keywords (can be used multiple times)
        #[arg(short, long, action = clap::ArgAction::Append)]
        keyword: Vec<String>,
    },

    /// List journal entries
    List,

    /// Delete a journal entry
    Delete { id: u64 },
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", "Error:".red().bold(), message);
    std::process::exit(1);
}

fn main() {
    let cli = Cli::parse();

    let config = Config::load(cli.data_dir).unwrap_or_else(|e| fail(e));

    // Keep the handle alive so the file logger flushes on exit
    let _logger = match logging::init_logging(&config.log_level, &config.log_dir()) {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("{} {}", "Warning:".yellow(), e);
            None
        }
    };

    let mut store = RecordStore::open(&config.store_paths()).unwrap_or_else(|e| fail(e));
    let analyzer = MoodAnalyzer::new();

    match cli.command {
        Some(Commands::Task(TaskCommands::Add {
            title,
            description,
            priority,
            difficulty,
        })) => {
            let params = AddTaskParameters {
                title,
                description,
                priority,
                difficulty,
            };

            match add_task(store.tasks(), params) {
                Ok(task) => {
                    println!("✓ Task added: {}", task.title);
                    println!("  #{} · {} · {}", task.id, task.priority, task.difficulty);
                }
                Err(e) => fail(e),
            }
        }
        Some(Commands::Task(TaskCommands::List { priority })) => {
            let tasks = list_tasks(store.tasks(), priority).unwrap_or_else(|e| fail(e));

            if tasks.is_empty() {
                println!("No tasks");
            } else {
                ui::render_view_header("Tasks", tasks.len(), "task");
                for task in &tasks {
                    ui::render_task_line(task);
                }
                let stats = task_stats(&tasks);
                println!(
                    "\n  {}",
                    format!(
                        "{} of {} done ({:.0}%)",
                        stats.completed,
                        stats.total,
                        stats.completion_rate() * 100.0
                    )
                    .dimmed()
                );
            }
        }
        Some(Commands::Task(TaskCommands::Done { id })) => match complete_task(store.tasks(), id) {
            Ok(task) => {
                println!("✓ Task completed: {}", task.title);
                println!("  #{}", task.id);
            }
            Err(e) => fail(e),
        },
        Some(Commands::Task(TaskCommands::Undo { id })) => match reopen_task(store.tasks(), id) {
            Ok(task) => {
                println!("○ Task reopened: {}", task.title);
                println!("  #{}", task.id);
            }
            Err(e) => fail(e),
        },
        Some(Commands::Task(TaskCommands::Delete { id })) => {
            match delete_task(store.tasks(), id) {
                Ok(task) => println!("✓ Task deleted: {}", task.title),
                Err(e) => fail(e),
            }
        }
        Some(Commands::Mood(MoodCommands::Log {
            content,
            mood,
            keyword,
        })) => {
            let params = LogMoodParameters {
                content,
                mood,
                keywords: keyword,
            };

            let logged = log_mood(store.moods(), &analyzer, params).unwrap_or_else(|e| fail(e));
            println!("✓ Mood logged: {} {}", logged.entry.mood.emoji(), logged.entry.mood.display_name());
            println!("  #{}", logged.entry.id);
            if !logged.extracted_keywords.is_empty() {
                println!("  Noticed: {}", logged.extracted_keywords.join(", ").dimmed());
            }

            println!();
            ui::render_block(&logged.message);

            let tasks = store.tasks().load_all().unwrap_or_else(|e| fail(e));
            let stats = task_stats(&tasks);
            ui::render_section_header("Suggestion");
            ui::render_block(analyzer.generate_task_suggestion(
                logged.entry.mood,
                stats.completed,
                stats.total,
            ));
        }
        Some(Commands::Mood(MoodCommands::List)) => {
            let entries = store.moods().load_all().unwrap_or_else(|e| fail(e));

            if entries.is_empty() {
                println!("Journal is empty");
            } else {
                ui::render_view_header("Journal", entries.len(), "entry");
                for entry in &entries {
                    ui::render_mood_line(entry);
                }
            }
        }
        Some(Commands::Mood(MoodCommands::Delete { id })) => match delete_mood(store.moods(), id) {
            Ok(()) => println!("✓ Journal entry #{} deleted", id),
            Err(e) => fail(e),
        },
        Some(Commands::Trend) => {
            let entries = store.moods().load_all().unwrap_or_else(|e| fail(e));
            let recent = recent_entries(&entries, config.trend_window);

            ui::render_section_header("Trend");
            ui::render_block(analyzer.analyze_mood_trend(recent));
            if !recent.is_empty() {
                println!();
                ui::render_block(&analyzer.summarize_patterns(recent));
            }
        }
        Some(Commands::Backup) => {
            let written = store.backup().unwrap_or_else(|e| fail(e));
            println!("✓ Backed up {} file(s)", written.len());
            for path in written {
                println!("  {}", path.display().to_string().dimmed());
            }
        }
        Some(Commands::Restore) => {
            store.restore_latest().unwrap_or_else(|e| fail(e));
            println!(
                "✓ Restored {} from the latest backup",
                store.data_dir().display()
            );
        }
        Some(Commands::Suggest) | None => {
            let summary =
                daily_summary(&mut store, &analyzer, config.trend_window).unwrap_or_else(|e| fail(e));

            match summary.latest_mood {
                Some(mood) => ui::render_view_header(
                    &format!("Today · {} {}", mood.emoji(), mood.display_name()),
                    summary.stats.pending,
                    "pending task",
                ),
                None => ui::render_view_header("Today", summary.stats.pending, "pending task"),
            }

            ui::render_section_header("Suggestion");
            ui::render_block(summary.suggestion);

            if let Some(recommendations) = &summary.recommendations {
                ui::render_section_header("Recommended");
                ui::render_block(recommendations);
            }

            ui::render_section_header("Trend");
            ui::render_block(summary.trend);
            if summary.latest_mood.is_some() {
                println!();
                ui::render_block(&summary.patterns);
            }
        }
    }
}
