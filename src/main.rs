use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use collector::{collect_posts, LogSink};
use feed_client::HttpFeedClient;
use gleaner_core::{Credentials, ErrorExt, RunConfig, SearchMode, SortMode};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gleaner")]
#[command(about = "Collect, deduplicate and rank feed posts matching search terms")]
struct Cli {
    /// Search term; repeat for multiple queries
    #[arg(long = "query", value_name = "TERM")]
    queries: Vec<String>,

    /// File with one search term per line
    #[arg(long, value_name = "FILE")]
    queries_file: Option<PathBuf>,

    /// TOML run configuration; explicit flags override its values
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum number of posts across all queries [default: 50]
    #[arg(long)]
    limit: Option<usize>,

    /// Search product: latest or top [default: latest]
    #[arg(long)]
    mode: Option<String>,

    /// Result ordering: none, shortest-first or longest-first [default: none]
    #[arg(long)]
    sort: Option<String>,

    /// ct0 session cookie
    #[arg(long, env = "GLEANER_CT0", hide_env_values = true)]
    ct0: String,

    /// auth_token session cookie
    #[arg(long, env = "GLEANER_AUTH_TOKEN", hide_env_values = true)]
    auth_token: String,

    /// Output JSON file
    #[arg(long, default_value = "results.json")]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "gleaner=info,collector=info,feed_client=info".to_string()),
        )
        .init();

    let cli = Cli::parse();
    let config = build_config(&cli)?;
    config
        .validate()
        .map_err(|e| anyhow!(e.user_friendly_message()))?;

    let credentials = Credentials::new(cli.ct0.clone(), cli.auth_token.clone());
    let client = HttpFeedClient::new(format!("gleaner/{}", env!("CARGO_PKG_VERSION")));

    tracing::info!(
        "Starting collection: {} queries, limit {}",
        config.queries.len(),
        config.limit
    );

    let results = match collect_posts(&client, &LogSink, &config, &credentials).await {
        Ok(results) => results,
        Err(e) => {
            tracing::error!("Run aborted: {}", e);
            bail!(e.user_friendly_message());
        }
    };

    if results.is_empty() {
        tracing::warn!("No data found for the supplied queries");
        return Ok(());
    }

    let file = File::create(&cli.output)
        .with_context(|| format!("failed to create {}", cli.output.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &results)?;
    tracing::info!("Wrote {} posts to {}", results.len(), cli.output.display());

    Ok(())
}

/// Merges the optional TOML config file with command-line flags; flags
/// win, and queries from `--queries-file` and `--query` replace the
/// file's list when either is given.
fn build_config(cli: &Cli) -> Result<RunConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            RunConfig::from_toml_file(path).map_err(|e| anyhow!(e.user_friendly_message()))?
        }
        None => RunConfig::new(Vec::new(), 50, SearchMode::default(), SortMode::default()),
    };

    let mut queries = Vec::new();
    if let Some(path) = &cli.queries_file {
        let file =
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
        for line in BufReader::new(file).lines() {
            let line = line?;
            let query = line.trim();
            if !query.is_empty() {
                queries.push(query.to_string());
            }
        }
    }
    queries.extend(cli.queries.iter().cloned());
    if !queries.is_empty() {
        config.queries = queries;
    }

    if let Some(limit) = cli.limit {
        config.limit = limit;
    }
    if let Some(mode) = &cli.mode {
        config.search_mode = mode
            .parse::<SearchMode>()
            .map_err(|e| anyhow!(e.user_friendly_message()))?;
    }
    if let Some(sort) = &cli.sort {
        config.sort_mode = sort
            .parse::<SortMode>()
            .map_err(|e| anyhow!(e.user_friendly_message()))?;
    }

    Ok(config)
}
