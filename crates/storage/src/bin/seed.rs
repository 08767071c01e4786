use std::fmt;

use chrono::{DateTime, Duration, Utc};
use storage::repository::Storage;
use vocab_core::model::WordDraft;

#[derive(Debug, Clone)]
struct Args {
    db_url: String,
    group_name: String,
    sessions: u32,
    now: Option<DateTime<Utc>>,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidSessions { raw: String },
    InvalidDbUrl { raw: String },
    InvalidNow { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidSessions { raw } => write!(f, "invalid --sessions value: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidNow { raw } => {
                write!(f, "invalid --now value (expected RFC3339): {raw}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut db_url =
            std::env::var("VOCAB_DB_URL").unwrap_or_else(|_| "sqlite:dev.sqlite3".into());
        let mut group_name =
            std::env::var("VOCAB_GROUP_NAME").unwrap_or_else(|_| "Core Vocabulary".into());
        let mut sessions = std::env::var("VOCAB_SESSIONS")
            .ok()
            .and_then(|value| value.parse::<u32>().ok())
            .unwrap_or(3);
        let mut now: Option<DateTime<Utc>> = None;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--group-name" => {
                    let value = require_value(&mut args, "--group-name")?;
                    group_name = value;
                }
                "--sessions" => {
                    let value = require_value(&mut args, "--sessions")?;
                    sessions = value
                        .parse::<u32>()
                        .map_err(|_| ArgsError::InvalidSessions { raw: value.clone() })?;
                }
                "--now" => {
                    let value = require_value(&mut args, "--now")?;
                    let parsed = DateTime::parse_from_rfc3339(&value)
                        .map_err(|_| ArgsError::InvalidNow { raw: value.clone() })?
                        .with_timezone(&Utc);
                    now = Some(parsed);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            group_name,
            sessions,
            now,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>         SQLite URL (default: sqlite:dev.sqlite3)");
    eprintln!("  --group-name <name>       Group to create (default: Core Vocabulary)");
    eprintln!("  --sessions <n>            Study sessions to record, one per day back from now (default: 3)");
    eprintln!("  --now <rfc3339>           Fixed current time for deterministic seeding");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!("Environment (same as flags):");
    eprintln!("  VOCAB_DB_URL, VOCAB_GROUP_NAME, VOCAB_SESSIONS");
}

const SAMPLES: [(&str, &str, &str, &str); 5] = [
    ("salaam", "hello", "sa-laam", "Salaam, chetor asti?"),
    ("tashakor", "thank you", "ta-sha-kor", "Tashakor az komak-e shomaa."),
    ("lotfan", "please", "lot-fan", "Lotfan yak chai biyaarid."),
    ("khoda hafez", "goodbye", "kho-daa haa-fez", "Khoda hafez, to fardaa."),
    ("sobh bakhair", "good morning", "sobh ba-khair", "Sobh bakhair, khub khwaab didi?"),
];

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let storage = Storage::sqlite(&args.db_url).await?;
    let now = args.now.unwrap_or_else(Utc::now);

    let group = storage
        .groups
        .insert_group(vocab_core::model::GroupDraft::new(args.group_name.clone()))
        .await?;

    let mut words = Vec::with_capacity(SAMPLES.len());
    for (text, translation, pronunciation, example) in SAMPLES {
        let word = storage
            .words
            .insert_word(WordDraft::new(text, translation, pronunciation, example))
            .await?;
        storage.groups.add_word_to_group(word.id, group.id).await?;
        words.push(word);
    }

    let mut reviews = 0_u32;
    for i in 0..args.sessions {
        let created_at = now - Duration::days(i64::from(i));
        let session = storage
            .sessions
            .insert_session(Some(group.id), created_at)
            .await?;
        for (idx, word) in words.iter().enumerate() {
            // alternate outcomes so the dashboard has something to chew on
            let correct = (idx + i as usize) % 2 == 0;
            storage
                .reviews
                .insert_review(word.id, session.id(), correct, created_at)
                .await?;
            reviews += 1;
        }
    }

    println!(
        "Seeded group '{}' with {} words, {} sessions and {} reviews into {}",
        args.group_name,
        words.len(),
        args.sessions,
        reviews,
        args.db_url
    );

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
