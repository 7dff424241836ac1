use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};
use phrase_core::{search, DocumentStore, SearchError, SearchSettings, VectorizerConfig};
use phrase_ingest::{
    discover_files, ingest_files, ingest_urls, parse_titles, FailurePolicy, IngestReport, WebFetcher,
    DEFAULT_TIMEOUT_SECS,
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{fmt, EnvFilter};

mod display;

#[derive(Parser)]
#[command(name = "phrase-search")]
#[command(about = "Rank sentences from documents and web pages against a query", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest the given sources and answer a single query
    Search {
        #[command(flatten)]
        sources: SourceArgs,
        /// Query to rank sentences against
        #[arg(long, short)]
        query: String,
        #[command(flatten)]
        ranking: RankArgs,
    },
    /// Ingest the given sources once, then answer queries read from stdin
    Session {
        #[command(flatten)]
        sources: SourceArgs,
        #[command(flatten)]
        ranking: RankArgs,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// PDF, DOCX, text, Markdown or HTML file (repeatable)
    #[arg(long = "file")]
    files: Vec<PathBuf>,
    /// Directory searched recursively for supported files (repeatable)
    #[arg(long = "dir")]
    dirs: Vec<PathBuf>,
    /// Web page to fetch (repeatable)
    #[arg(long = "url")]
    urls: Vec<String>,
    /// Comma-separated titles for the --file arguments, in order
    #[arg(long)]
    titles: Option<String>,
    /// Web request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,
    /// Print sources that failed to ingest instead of only logging them
    #[arg(long, default_value_t = false)]
    show_ingest_errors: bool,
}

#[derive(Args)]
struct RankArgs {
    /// Maximum number of phrases to show
    #[arg(long, short = 'n', default_value_t = 10)]
    num_results: usize,
    /// Minimum cosine similarity a phrase needs to be shown
    #[arg(long, short = 't', default_value_t = 0.15)]
    threshold: f64,
    /// Vocabulary cap for the TF-IDF model
    #[arg(long, default_value_t = 15_000)]
    max_features: usize,
    /// Emit results as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

impl RankArgs {
    fn settings(&self) -> Result<SearchSettings> {
        let settings = SearchSettings {
            num_results: self.num_results,
            threshold: self.threshold,
            vectorizer: VectorizerConfig { max_features: self.max_features, ..VectorizerConfig::default() },
        };
        Ok(settings.validate()?)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Search { sources, query, ranking } => {
            let settings = ranking.settings()?;
            let store = load_sources(&sources).await?;
            if !run_query(&store, &query, &settings, ranking.json)? {
                return Err(anyhow!(display::NO_DOCUMENTS));
            }
            Ok(())
        }
        Commands::Session { sources, ranking } => {
            let settings = ranking.settings()?;
            let store = load_sources(&sources).await?;
            eprintln!("{} documents, {} sentences loaded; enter a query per line", store.len(), store.sentence_count());
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await? {
                let query = line.trim();
                if query.is_empty() {
                    continue;
                }
                if !run_query(&store, query, &settings, ranking.json)? {
                    eprintln!("{}", display::NO_DOCUMENTS);
                }
            }
            Ok(())
        }
    }
}

async fn load_sources(args: &SourceArgs) -> Result<DocumentStore> {
    let titles = args.titles.as_deref().map(parse_titles).unwrap_or_default();
    let mut report = ingest_files(&args.files, &titles);

    let discovered: Vec<PathBuf> = args.dirs.iter().flat_map(|dir| discover_files(dir)).collect();
    report.merge(ingest_files(&discovered, &[]));

    if !args.urls.is_empty() {
        let fetcher = WebFetcher::new(Duration::from_secs(args.timeout_secs))?;
        report.merge(ingest_urls(&fetcher, args.urls.as_slice()).await);
    }

    let policy = if args.show_ingest_errors { FailurePolicy::Surface } else { FailurePolicy::Suppress };
    Ok(commit(report, policy)?)
}

fn commit(report: IngestReport, policy: FailurePolicy) -> io::Result<DocumentStore> {
    let mut store = DocumentStore::new();
    let failures = report.commit(&mut store, policy);
    display::render_failures(&mut io::stderr().lock(), &failures)?;
    tracing::info!(documents = store.len(), sentences = store.sentence_count(), "session store ready");
    Ok(store)
}

/// Returns false when there was nothing to search.
fn run_query(store: &DocumentStore, query: &str, settings: &SearchSettings, json: bool) -> Result<bool> {
    let outcome = match search(store, query, settings) {
        Ok(outcome) => outcome,
        Err(SearchError::EmptyCorpus) => return Ok(false),
        Err(err) => return Err(err.into()),
    };
    let mut out = io::stdout().lock();
    if json {
        display::render_json(&mut out, &outcome)?;
    } else {
        display::render_outcome(&mut out, &outcome)?;
    }
    out.flush()?;
    Ok(true)
}
