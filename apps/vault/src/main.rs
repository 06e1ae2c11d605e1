//! `vault` CLI: manage saved IELTS vocabulary and run review quizzes.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use ielts_vault::commands::{self, AddWord, ListFilter, Quiz, QuizRequest, SettingsUpdate};
use ielts_vault::config::AppConfig;
use vocab_core::{CategoryField, CategoryFilter};

#[derive(Parser)]
#[command(name = "vault", version, about = "Spaced-repetition vocabulary vault for IELTS practice")]
struct Cli {
    /// Database file (overrides VAULT_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Save a word to the vault
    Add {
        word: String,
        meaning: String,
        #[arg(long)]
        pos: Option<String>,
        #[arg(long)]
        example: Option<String>,
    },

    /// Import a Word:/Meaning:/POS:/Example: word list
    Import { file: PathBuf },

    /// List saved words
    List {
        /// Only words due now
        #[arg(long)]
        due: bool,
        #[command(flatten)]
        category: CategoryArgs,
    },

    /// Remove a word
    Remove { word: String },

    /// Pick words for a quiz and print them as JSON
    Quiz {
        /// Number of words (default: stored quiz size)
        #[arg(long)]
        count: Option<usize>,
        #[command(flatten)]
        category: CategoryArgs,
    },

    /// Grade a generated quiz and reschedule the words it tested
    Grade {
        /// JSON file with {"questions": [...]}
        #[arg(long)]
        quiz: PathBuf,
        /// JSON file mapping question id to submitted answer
        #[arg(long)]
        answers: PathBuf,
    },

    /// Show or change study settings
    Settings {
        /// Comma-separated review intervals in days, e.g. "1,3,7,14,30"
        #[arg(long, value_delimiter = ',')]
        intervals: Option<Vec<u32>>,
        #[arg(long)]
        quiz_size: Option<u32>,
        #[arg(long)]
        reset_hour: Option<u32>,
    },

    /// Show vault statistics
    Stats,
}

#[derive(clap::Args)]
struct CategoryArgs {
    /// Case-insensitive category filter
    #[arg(long)]
    category: Option<String>,

    /// Field the category filter applies to
    #[arg(long, value_enum, default_value = "pos")]
    field: FilterField,
}

#[derive(Clone, Copy, ValueEnum)]
enum FilterField {
    Pos,
    Meaning,
    Word,
}

impl CategoryArgs {
    fn into_filter(self) -> Option<CategoryFilter> {
        let field = match self.field {
            FilterField::Pos => CategoryField::PartOfSpeech,
            FilterField::Meaning => CategoryField::Meaning,
            FilterField::Word => CategoryField::Word,
        };
        self.category.map(|needle| CategoryFilter::new(field, needle))
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.db);
    ielts_vault::logging::init(&config.log_level);

    let mut repo = ielts_vault::open_repository(&config)?;
    let now = Utc::now();

    match cli.command {
        Commands::Add {
            word,
            meaning,
            pos,
            example,
        } => {
            let record = commands::add_word(
                &repo,
                AddWord {
                    word,
                    meaning,
                    part_of_speech: pos,
                    example,
                },
                now,
            )?;
            println!("saved \"{}\"", record.word);
        }
        Commands::Import { file } => {
            let result = commands::import_file(&repo, &file, now)?;
            println!(
                "imported {} of {} words ({} already saved)",
                result.imported, result.parsed, result.skipped
            );
        }
        Commands::List { due, category } => {
            let filter = ListFilter {
                due_only: due,
                category: category.into_filter(),
            };
            let words = commands::list_words(&repo, &filter, now)?;
            println!("{}", serde_json::to_string_pretty(&words)?);
        }
        Commands::Remove { word } => {
            commands::remove_word(&mut repo, &word)?;
            println!("removed \"{word}\"");
        }
        Commands::Quiz { count, category } => {
            let request = QuizRequest {
                count,
                category: category.into_filter(),
            };
            let plan = commands::start_quiz(&repo, &request, now, &mut rand::thread_rng())?;
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }
        Commands::Grade { quiz, answers } => {
            let quiz: Quiz = read_json(&quiz)?;
            let answers: HashMap<String, String> = read_json(&answers)?;
            let report = commands::submit_quiz(&mut repo, &quiz, &answers, now)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Settings {
            intervals,
            quiz_size,
            reset_hour,
        } => {
            let settings = if intervals.is_none() && quiz_size.is_none() && reset_hour.is_none() {
                commands::get_settings(&repo)?
            } else {
                commands::update_settings(
                    &repo,
                    SettingsUpdate {
                        interval_days: intervals,
                        quiz_size,
                        daily_reset_hour: reset_hour,
                    },
                )?
            };
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        Commands::Stats => {
            let stats = commands::get_stats(&repo, now)?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}
