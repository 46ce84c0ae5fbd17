use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use quiz_core::model::Category;
use storage::json::write_bank;
use storage::repository::QuestionRecord;

#[derive(Debug, Clone)]
struct Args {
    dir: PathBuf,
    per_category: u32,
    empty: Vec<Category>,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidCount { raw: String },
    InvalidCategory { raw: String },
    InvalidDir { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidCount { raw } => write!(f, "invalid --per-category value: {raw}"),
            ArgsError::InvalidCategory { raw } => write!(f, "invalid --empty category: {raw}"),
            ArgsError::InvalidDir { raw } => write!(f, "invalid --dir value: {raw:?}"),
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
        let mut dir = std::env::var("QUIZ_QUESTIONS_DIR")
            .map_or_else(|_| "questions".into(), PathBuf::from);
        let mut per_category = std::env::var("QUIZ_SEED_PER_CATEGORY")
            .ok()
            .and_then(|value| value.parse::<u32>().ok())
            .unwrap_or(5);
        let mut empty = Vec::new();

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--dir" => {
                    let value = require_value(&mut args, "--dir")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDir { raw: value });
                    }
                    dir = PathBuf::from(value);
                }
                "--per-category" => {
                    let value = require_value(&mut args, "--per-category")?;
                    per_category = value
                        .parse::<u32>()
                        .map_err(|_| ArgsError::InvalidCount { raw: value.clone() })?;
                }
                "--empty" => {
                    let value = require_value(&mut args, "--empty")?;
                    let category = value
                        .parse::<Category>()
                        .map_err(|_| ArgsError::InvalidCategory { raw: value.clone() })?;
                    empty.push(category);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            dir,
            per_category,
            empty,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --dir <path>              Output directory (default: questions)");
    eprintln!("  --per-category <n>        Sample questions per category (default: 5)");
    eprintln!("  --empty <category>        Write an empty bank for this category (repeatable)");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!("Environment (same as flags):");
    eprintln!("  QUIZ_QUESTIONS_DIR, QUIZ_SEED_PER_CATEGORY");
}

/// Prompt, four options, index of the correct one, explanation.
type Sample = (&'static str, [&'static str; 4], usize, &'static str);

fn samples(category: Category) -> &'static [Sample] {
    match category {
        Category::RoleOfSecurityGuard => &[(
            "What is the primary role of a security guard?",
            ["Arrest suspects", "Observe and report", "Carry a firearm", "Direct traffic"],
            1,
            "Guards deter, observe, detect and report.",
        )],
        Category::LegalPowersLimitations => &[(
            "A security guard's arrest powers are generally the same as those of:",
            ["A police officer", "A peace officer", "A private citizen", "A court officer"],
            2,
            "Guards hold citizen's arrest powers only.",
        )],
        Category::EmergencySituations => &[(
            "On discovering a fire, the first step is to:",
            ["Fight the fire", "Sound the alarm", "Lock the doors", "Call a supervisor later"],
            1,
            "Raising the alarm gets people out and help on the way.",
        )],
        Category::CommunicationsPublicRelations => &[(
            "When dealing with an upset visitor, you should:",
            ["Raise your voice", "Walk away", "Listen calmly", "Threaten removal"],
            2,
            "Calm listening de-escalates most situations.",
        )],
        Category::AccessControl => &[(
            "A visitor without a badge asks to enter. You should:",
            ["Let them in", "Verify and sign them in", "Ignore them", "Hold the door"],
            1,
            "Every entry is verified and recorded.",
        )],
        Category::EthicsConduct => &[(
            "Accepting gifts from people you protect is:",
            ["Encouraged", "A conflict of interest", "Required", "Irrelevant"],
            1,
            "Gifts compromise impartiality.",
        )],
    }
}

fn build_records(category: Category, count: u32) -> Vec<QuestionRecord> {
    let pool = samples(category);
    (0..count as usize)
        .map(|i| {
            let (prompt, options, correct, explanation) = pool[i % pool.len()];
            let keys = ["A", "B", "C", "D"];
            QuestionRecord {
                question: format!("{prompt} (#{})", i + 1),
                options: keys
                    .iter()
                    .zip(options)
                    .map(|(key, text)| ((*key).to_string(), text.to_string()))
                    .collect::<BTreeMap<_, _>>(),
                correct: keys[correct].to_string(),
                explanation: explanation.to_string(),
            }
        })
        .collect()
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    for category in Category::ALL {
        let count = if args.empty.contains(&category) {
            0
        } else {
            args.per_category
        };
        let records = build_records(category, count);
        let path = write_bank(&args.dir, category, &records).await?;
        println!("Wrote {} questions to {}", records.len(), path.display());
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
