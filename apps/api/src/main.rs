mod analysis;
mod config;
mod editor;
mod errors;
mod models;
mod render;
mod routes;
mod state;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde_json::Value;
use tokio::io::AsyncReadExt;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::ats::{ResumeScorer, RuleBasedScorer};
use crate::analysis::keywords::extract_keywords;
use crate::config::Config;
use crate::editor::normalizer::normalize;
use crate::editor::session::EditorSession;
use crate::editor::store::{DocumentStore, FileStore, MemoryStore};
use crate::errors::AppError;
use crate::models::Document;
use crate::render::export::export_bundle;
use crate::routes::build_router;
use crate::state::AppState;

#[derive(Parser)]
#[command(name = "resume-builder", version)]
#[command(about = "Bilingual resume editor with ATS scoring and HTML previews")]
struct Cli {
    /// Keep the document in memory instead of DATA_DIR
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP editor API (default)
    Serve,

    /// Write the ATS resume, creative CV, cover letter and JSON data to a directory
    Export {
        /// Output directory
        #[arg(short, long)]
        out: PathBuf,

        /// Export this JSON file instead of the stored document
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Replace the stored document with a JSON file
    Import { file: PathBuf },

    /// Print the ATS report as JSON
    Score {
        /// Score this JSON file instead of the stored document
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Print the keywords of a job description, most frequent first
    Keywords {
        /// Job description file, or `-` for stdin
        source: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // Logs go to stderr so CLI output on stdout stays machine-readable
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log,
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let store = open_store(&config, cli.ephemeral);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config, store).await,
        Commands::Export { out, input } => export(store, &out, input.as_deref()).await,
        Commands::Import { file } => import(store, &file).await,
        Commands::Score { input } => score(store, input.as_deref()).await,
        Commands::Keywords { source } => keywords(&source).await,
    }
}

fn open_store(config: &Config, ephemeral: bool) -> Arc<dyn DocumentStore> {
    if ephemeral {
        info!("Using in-memory document store");
        Arc::new(MemoryStore::default())
    } else {
        let store = FileStore::new(&config.data_dir, &config.storage_key);
        info!("Using document store at {}", store.path().display());
        Arc::new(store)
    }
}

async fn serve(config: Config, store: Arc<dyn DocumentStore>) -> Result<()> {
    info!("Starting resume-builder v{}", env!("CARGO_PKG_VERSION"));

    let session = EditorSession::open(store).await;
    let scorer: Arc<dyn ResumeScorer> = Arc::new(RuleBasedScorer);
    let state = AppState::new(config.clone(), session, scorer);

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// The document in `input`, or the stored one when no file is given.
async fn load_document(store: Arc<dyn DocumentStore>, input: Option<&Path>) -> Result<Document> {
    match input {
        Some(path) => {
            let text = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let value: Value = serde_json::from_str(&text)
                .with_context(|| format!("{} is not valid JSON", path.display()))?;
            Ok(normalize(Some(&value)))
        }
        None => Ok(EditorSession::open(store).await.document().clone()),
    }
}

async fn export(store: Arc<dyn DocumentStore>, out: &Path, input: Option<&Path>) -> Result<()> {
    let document = load_document(store, input).await?;
    let files = export_bundle(&document, Utc::now().date_naive())
        .context("Failed to serialize document for export")?;

    tokio::fs::create_dir_all(out)
        .await
        .with_context(|| format!("Failed to create {}", out.display()))?;
    for file in files {
        let path = out.join(&file.filename);
        tokio::fs::write(&path, file.content)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("{}", path.display());
    }
    Ok(())
}

async fn import(store: Arc<dyn DocumentStore>, file: &Path) -> Result<()> {
    let text = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let mut session = EditorSession::open(store).await;
    let outcome = session.import_json(&text).await?;
    if let Some(err) = outcome.save_error {
        return Err(AppError::Storage(err).into());
    }
    println!(
        "Imported resume for '{}'",
        session.document().resume.basics.name
    );
    Ok(())
}

async fn score(store: Arc<dyn DocumentStore>, input: Option<&Path>) -> Result<()> {
    let document = load_document(store, input).await?;
    let report = RuleBasedScorer.score(&document.resume, &document.job_desc);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

async fn keywords(source: &str) -> Result<()> {
    let text = if source == "-" {
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .context("Failed to read job description from stdin")?;
        text
    } else {
        tokio::fs::read_to_string(source)
            .await
            .with_context(|| format!("Failed to read {source}"))?
    };

    for keyword in extract_keywords(&text) {
        println!("{keyword}");
    }
    Ok(())
}
