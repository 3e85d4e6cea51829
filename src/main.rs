mod error;
mod loader;
mod logging;
mod models;
mod session;
mod tui;

use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::path::PathBuf;

use error::QuizError;
use loader::Loader;
use models::{JsonOutput, PageParams, Question};
use session::{Advance, QuizSession};

const ROOT_ENV: &str = "MCQ_ROOT";

#[derive(Parser)]
#[command(name = "mcq")]
#[command(about = "A terminal multiple-choice practice tool with test and review modes")]
#[command(version)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Site root holding data/index.json (defaults to $MCQ_ROOT or the current directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List subjects and their topics
    Subjects,

    /// Practice one topic in the terminal UI
    Practice {
        /// Question file, relative to the site root
        #[arg(long, short)]
        file: Option<String>,

        /// Subject label shown in the breadcrumbs
        #[arg(long, short)]
        subject: Option<String>,

        /// Chapter label shown in the breadcrumbs
        #[arg(long, short)]
        chapter: Option<String>,
    },

    /// Grade a set of answers without the terminal UI
    Grade {
        /// Question file, relative to the site root
        file: String,

        /// Comma-separated zero-based question:option pairs, e.g. 0:1,1:0
        #[arg(long, short, default_value = "")]
        answers: String,
    },

    /// Launch interactive terminal UI
    Tui,
}

fn get_root(flag: Option<PathBuf>) -> PathBuf {
    if let Some(root) = flag {
        return root;
    }

    if let Ok(path) = std::env::var(ROOT_ENV) {
        return PathBuf::from(path);
    }

    PathBuf::from(".")
}

fn main() {
    logging::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!(error = %e, "command failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let loader = Loader::new(get_root(cli.root));
    tracing::debug!(root = %loader.root().display(), "using site root");

    match cli.command {
        Commands::Subjects => match loader.load_catalog() {
            Ok(catalog) => {
                let entries = catalog.entries();
                if cli.json {
                    println!("{}", serde_json::to_string(&JsonOutput::ok(&catalog))?);
                } else if entries.is_empty() {
                    println!("No topics found.");
                } else {
                    println!("{:<24} {:<32} FILE", "SUBJECT", "TOPIC");
                    println!("{}", "-".repeat(80));
                    for entry in entries {
                        println!(
                            "{:<24} {:<32} {}",
                            truncate(&entry.subject, 22),
                            truncate(&entry.name, 30),
                            entry.file
                        );
                    }
                }
            }
            Err(e) if cli.json => {
                println!(
                    "{}",
                    serde_json::to_string(&JsonOutput::<()>::err(e.to_string()))?
                );
            }
            Err(e) => return Err(e.into()),
        },

        Commands::Practice {
            file,
            subject,
            chapter,
        } => {
            tui::run(loader, Some(PageParams::new(file, subject, chapter)))?;
        }

        Commands::Grade { file, answers } => {
            let attempt = loader
                .load_questions(&file)
                .and_then(|questions| {
                    let answers = parse_answers(&answers, &questions)?;
                    grade(questions, &answers)
                });

            match attempt {
                Ok(session) => print_grade(&session, &file, cli.json)?,
                Err(e) if cli.json => {
                    println!(
                        "{}",
                        serde_json::to_string(&JsonOutput::<()>::err(e.to_string()))?
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }

        Commands::Tui => {
            tui::run(loader, None)?;
        }
    }

    Ok(())
}

/// Parses `question:option` pairs. Later pairs for the same question win.
fn parse_answers(input: &str, questions: &[Question]) -> error::Result<BTreeMap<usize, usize>> {
    let mut answers = BTreeMap::new();

    for pair in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (q, o) = pair
            .split_once(':')
            .ok_or_else(|| QuizError::InvalidAnswers(format!("'{}' is not question:option", pair)))?;

        let question: usize = q.trim().parse().map_err(|_| {
            QuizError::InvalidAnswers(format!("'{}' is not a question index", q.trim()))
        })?;
        let option: usize = o.trim().parse().map_err(|_| {
            QuizError::InvalidAnswers(format!("'{}' is not an option index", o.trim()))
        })?;

        let Some(target) = questions.get(question) else {
            return Err(QuizError::InvalidAnswers(format!(
                "question {} does not exist ({} questions)",
                question,
                questions.len()
            )));
        };
        if option >= target.options.len() {
            return Err(QuizError::InvalidAnswers(format!(
                "question {} has no option {} ({} options)",
                question,
                option,
                target.options.len()
            )));
        }

        answers.insert(question, option);
    }

    Ok(answers)
}

/// Walks a fresh session through every question, choosing the given answers,
/// and submits it. The returned session is in review mode.
fn grade(questions: Vec<Question>, answers: &BTreeMap<usize, usize>) -> error::Result<QuizSession> {
    let mut session = QuizSession::new(questions)?;

    loop {
        if let Some(&option) = answers.get(&session.current_index()) {
            session.select(option);
        }
        match session.advance() {
            Advance::Moved => continue,
            Advance::Submitted(_) | Advance::Exit => break,
        }
    }

    Ok(session)
}

fn print_grade(
    session: &QuizSession,
    file: &str,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(result) = session.result() else {
        return Err("attempt was not submitted".into());
    };
    let feedback: Vec<_> = (0..session.total())
        .filter_map(|i| session.feedback_for(i))
        .collect();

    if json {
        println!(
            "{}",
            serde_json::to_string(&JsonOutput::ok(serde_json::json!({
                "file": file,
                "result": result,
                "feedback": feedback
            })))?
        );
        return Ok(());
    }

    println!("=== Result ===");
    println!(
        "Score: {} / {} ({:.0}%)",
        result.score,
        result.total,
        result.percentage()
    );
    println!("Attempted: {} / {}", result.attempted, result.total);

    for (question, fb) in session.questions().iter().zip(&feedback) {
        println!();
        println!("Q{}. {}", fb.number, question.prompt);
        println!("  {}", fb.verdict());
        println!("  Your answer: {}", fb.your_answer_label());
        println!("  Correct answer: {}", fb.correct_answer);
        println!("  Explanation: {}", fb.explanation_label());
    }

    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
