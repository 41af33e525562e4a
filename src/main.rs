//! Assignment verifier command line entrypoint.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use serde::Serialize;
use uuid::Uuid;

use verifier::author::AuthorInferencer;
use verifier::config::{Config, LogFormat};
use verifier::domain::Assignment;
use verifier::nlp::{EntityRecognizer, SentenceSimilarity, TopicClassifier, TopicPredictor};
use verifier::reader::{AssignmentReader, FileRef, MediaType};
use verifier::repository::FileRepository;
use verifier::verification::{Verifier, VerifyAssignment};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser, Debug)]
#[command(
    name = "verifier",
    version,
    about = "Verify academic assignments for plagiarism against a stored corpus."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Verify submitted files and add them to the corpus.
    Verify {
        /// PDF, DOCX or DOC files.
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// MIME type for every file (default: from the file extension).
        #[arg(long)]
        media_type: Option<String>,

        /// Store the files without comparing them.
        #[arg(long)]
        no_detection: bool,
    },

    /// Show the stored verification of one assignment.
    Show { id: Uuid },

    /// List stored assignments.
    List,

    /// Seed the corpus from a JSON array of assignments.
    Import { path: PathBuf },
}

fn init_tracing(format: LogFormat) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Wires capabilities, reader and storage. Models are only loaded for `verify`.
fn build_verifier(config: &Config, load_models: bool) -> anyhow::Result<Verifier> {
    let (similarity, entities, topics) = if load_models {
        let similarity = SentenceSimilarity::load(config.similarity())
            .context("failed to load sentence similarity model")?;
        let entities = EntityRecognizer::load(config.entities())
            .context("failed to load entity recognition model")?;
        let topics = TopicClassifier::load_optional(&config.topic());
        (similarity, entities, topics)
    } else {
        (
            SentenceSimilarity::lexical(),
            EntityRecognizer::heuristic(),
            None,
        )
    };

    let topics = topics.map(|classifier| Arc::new(classifier) as Arc<dyn TopicPredictor>);
    let authors = AuthorInferencer::new(Arc::new(entities), config.author());
    let reader = Arc::new(AssignmentReader::new(authors, topics));
    let repository = Arc::new(FileRepository::open(config.storage_path.clone())?);

    Ok(Verifier::new(
        reader,
        repository,
        Arc::new(similarity),
        config.verifier(),
    )?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::from_env()?;
    init_tracing(config.log_format);
    config.validate()?;

    tracing::info!(
        storage_path = %config.storage_path.display(),
        workers = config.workers,
        detection = config.plagiarism_detection,
        "Assignment verifier starting"
    );

    match cli.command {
        Command::Verify {
            files,
            media_type,
            no_detection,
        } => {
            let submissions = files
                .into_iter()
                .map(|path| -> anyhow::Result<(PathBuf, MediaType)> {
                    let resolved = MediaType::resolve(&path, media_type.as_deref())
                        .with_context(|| format!("cannot verify {}", path.display()))?;
                    Ok((path, resolved))
                })
                .collect::<anyhow::Result<Vec<_>>>()?;

            let verifier = build_verifier(&config, true)?;
            let mut results = Vec::with_capacity(submissions.len());

            for (path, media_type) in submissions {
                let mut command =
                    VerifyAssignment::new(FileRef::path(path.clone()), media_type.as_str());
                if no_detection {
                    command = command.without_detection();
                }

                let result = verifier
                    .verify(command)
                    .await
                    .with_context(|| format!("failed to verify {}", path.display()))?;
                results.push(result);
            }

            print_json(&results)?;
        }
        Command::Show { id } => {
            let verifier = build_verifier(&config, false)?;
            let verified = verifier
                .lookup(id)
                .await?
                .with_context(|| format!("no assignment with id {id}"))?;
            print_json(&verified)?;
        }
        Command::List => {
            let verifier = build_verifier(&config, false)?;
            print_json(&verifier.list().await?)?;
        }
        Command::Import { path } => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let assignments: Vec<Assignment> = serde_json::from_str(&raw)
                .with_context(|| format!("invalid assignment JSON in {}", path.display()))?;

            let verifier = build_verifier(&config, false)?;
            let imported = verifier.import(assignments).await?;
            tracing::info!(imported, "Corpus import complete");
            print_json(&serde_json::json!({ "imported": imported }))?;
        }
    }

    Ok(())
}
