mod interactive;
mod render;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use prep_core::model::{NoteDraft, NoteId, QuestionSetKey, SavedQuestionId, SessionDurations};
use services::{AppServices, Clock, EXPORT_FILE_NAME, NoteQuery, ResultQuery, ResultsView, SubjectFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "exam-prep")]
#[command(about = "Mock exams, topic practice, notes and study material")]
struct Cli {
    /// Seconds allowed for a mock exam
    #[arg(long, global = true, env = "EXAM_PREP_MOCK_SECS", default_value_t = SessionDurations::DEFAULT_MOCK_SECS)]
    mock_secs: u32,

    /// Seconds allowed for a practice session
    #[arg(long, global = true, env = "EXAM_PREP_PRACTICE_SECS", default_value_t = SessionDurations::DEFAULT_PRACTICE_SECS)]
    practice_secs: u32,

    /// Shuffle question order
    #[arg(long, global = true)]
    shuffle: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List subjects, mock exam years and practice topics
    Subjects,
    /// Sit a timed mock exam
    Exam {
        subject: String,
        year: String,
        /// Override the countdown for this session
        #[arg(long)]
        duration_secs: Option<u32>,
    },
    /// Practice one topic with explanations after each answer
    Practice {
        subject: String,
        topic: String,
        #[arg(long)]
        duration_secs: Option<u32>,
    },
    /// Summarise a results query string, e.g. `score=80&total=5&time=125`
    Results { query: String },
    /// Manage notes and saved questions
    #[command(subcommand)]
    Notes(NotesCommand),
    /// Show the chapter outline for a topic
    Study {
        subject: String,
        topic: String,
        /// Print the full content of one block
        #[arg(long)]
        block: Option<String>,
    },
}

#[derive(Subcommand)]
enum NotesCommand {
    /// List notes and saved questions
    List {
        #[arg(long, default_value = "")]
        search: String,
        /// Exact subject name, or `all`
        #[arg(long, default_value = "all")]
        subject: String,
    },
    /// Create a note
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        #[arg(long)]
        subject: String,
        #[arg(long, default_value = "")]
        topic: String,
        /// Comma-separated
        #[arg(long, default_value = "")]
        tags: String,
    },
    /// Delete a note
    Delete { id: NoteId },
    /// Bookmark a question from a mock exam year or practice topic
    Bookmark {
        subject: String,
        #[arg(long, conflicts_with = "topic", required_unless_present = "topic")]
        year: Option<String>,
        #[arg(long)]
        topic: Option<String>,
        question_id: String,
    },
    /// Remove a saved question
    Unsave { id: SavedQuestionId },
    /// Write notes and saved questions to a JSON file
    Export {
        #[arg(long, default_value = EXPORT_FILE_NAME)]
        out: PathBuf,
    },
}

/// Logs go to stderr so stdout stays clean for the session transcript.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "services=info,exam_prep=info".into()),
    );
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let durations = SessionDurations::new(cli.mock_secs, cli.practice_secs)
        .context("session durations must be positive")?;
    let app = AppServices::new_in_memory(Clock::system(), durations, cli.shuffle)?;

    match cli.command {
        Commands::Subjects => {
            let catalog = app.catalog();
            render::overview(&catalog.overview().await?);
            render::subjects(&catalog.list_subjects().await?);
        }
        Commands::Exam {
            subject,
            year,
            duration_secs,
        } => {
            let key = QuestionSetKey::mock(subject, year);
            run_session(&app, key, duration_secs).await?;
        }
        Commands::Practice {
            subject,
            topic,
            duration_secs,
        } => {
            let key = QuestionSetKey::practice(subject, topic);
            run_session(&app, key, duration_secs).await?;
        }
        Commands::Results { query } => {
            let query = query.split_once('?').map_or(query.as_str(), |(_, q)| q);
            render::results(&ResultsView::from_query(&ResultQuery::parse(query)));
        }
        Commands::Notes(cmd) => notes(&app, cmd).await?,
        Commands::Study {
            subject,
            topic,
            block,
        } => {
            let session = app.study().open(&subject, &topic).await?;
            match block {
                Some(id) => {
                    let found = session
                        .chapters()
                        .iter()
                        .flat_map(|c| c.blocks.iter())
                        .find(|b| b.id == id)
                        .with_context(|| format!("no block `{id}` in {subject}/{topic}"))?;
                    render::block(found);
                }
                None => render::outline(&session),
            }
        }
    }

    Ok(())
}

async fn run_session(
    app: &AppServices,
    key: QuestionSetKey,
    duration_secs: Option<u32>,
) -> anyhow::Result<()> {
    let loader = app.sessions();
    let runner = match duration_secs {
        Some(0) => anyhow::bail!("--duration-secs must be positive"),
        Some(secs) => loader.open_with_duration(key, secs).await?,
        None => loader.open(key).await?,
    };
    interactive::run(runner).await
}

async fn notes(app: &AppServices, cmd: NotesCommand) -> anyhow::Result<()> {
    let notes = app.notes();
    match cmd {
        NotesCommand::List { search, subject } => {
            let query = NoteQuery {
                search,
                subject: SubjectFilter::parse(&subject),
            };
            render::notes(&notes.list_notes(&query).await?);
            render::saved_questions(&notes.list_saved_questions(&query).await?);
        }
        NotesCommand::Add {
            title,
            content,
            subject,
            topic,
            tags,
        } => {
            let note = notes
                .create_note(NoteDraft {
                    title,
                    content,
                    subject,
                    topic,
                    tags,
                })
                .await?;
            render::notes(std::slice::from_ref(&note));
        }
        NotesCommand::Delete { id } => {
            notes.delete_note(id).await?;
            println!("Deleted note {id}");
        }
        NotesCommand::Bookmark {
            subject,
            year,
            topic,
            question_id,
        } => {
            let key = match (year, topic) {
                (Some(year), _) => QuestionSetKey::mock(subject, year),
                (None, Some(topic)) => QuestionSetKey::practice(subject, topic),
                (None, None) => anyhow::bail!("either --year or --topic is required"),
            };
            let saved = notes
                .save_question(app.questions().as_ref(), &key, &question_id)
                .await?;
            render::saved_questions(std::slice::from_ref(&saved));
        }
        NotesCommand::Unsave { id } => {
            notes.delete_saved_question(id).await?;
            println!("Removed saved question {id}");
        }
        NotesCommand::Export { out } => {
            let json = notes.export_json().await?;
            tokio::fs::write(&out, json)
                .await
                .with_context(|| format!("writing {}", out.display()))?;
            println!("Exported to {}", out.display());
        }
    }
    Ok(())
}
