use clap::Parser;
use std::path::PathBuf;

use ytc::SortMode;
use ytc::config::Config;
use ytc::store::{self, KeyValueStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Comment texts only
    Text,
    /// Comment permalinks only
    Urls,
    /// Permalinks, then texts
    Both,
    Json,
}

#[derive(Parser)]
#[command(
    name = "ytc",
    about = "YouTube comment scraper",
    version = env!("GIT_DESCRIBE"),
)]
pub struct Cli {
    /// YouTube video URL or video ID (reads from stdin if omitted)
    pub url: Option<String>,

    /// YouTube Data API key (falls back to YOUTUBE_API_KEY, then the last key used)
    #[arg(short, long)]
    pub key: Option<String>,

    /// Only keep comments containing this text (case-sensitive)
    #[arg(short, long)]
    pub search: Option<String>,

    /// Comment ordering
    #[arg(long, value_enum)]
    pub sort: Option<SortMode>,

    /// Maximum number of comments to output
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Don't remember the API key and search term for the next run
    #[arg(long)]
    pub no_remember: bool,

    /// Show request parameters and result counts
    #[arg(short, long)]
    pub verbose: bool,
}

/// Scrape settings after merging flags, environment, stored preferences and config
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub key: Option<String>,
    pub search: String,
    pub sort: SortMode,
    pub limit: usize,
    pub format: OutputFormat,
    pub timeout_secs: u64,
}

const DEFAULT_LIMIT: usize = 100;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

impl Cli {
    pub fn resolve(&self, config: &Config, prefs: &dyn KeyValueStore, env_key: Option<String>) -> Settings {
        let key = self
            .key
            .clone()
            .or(env_key)
            .or_else(|| prefs.get(store::API_KEY))
            .or_else(|| config.api_key.clone())
            .filter(|k| !k.trim().is_empty());

        let search = self
            .search
            .clone()
            .or_else(|| prefs.get(store::SEARCH_TERM))
            .unwrap_or_default();

        let format = self
            .format
            .or_else(|| {
                config
                    .default_format
                    .as_deref()
                    .and_then(|f| <OutputFormat as clap::ValueEnum>::from_str(f, true).ok())
            })
            .unwrap_or(OutputFormat::Both);

        Settings {
            key,
            search,
            sort: self.sort.or(config.default_sort).unwrap_or_default(),
            limit: self.limit.or(config.default_limit).unwrap_or(DEFAULT_LIMIT),
            format,
            timeout_secs: self.timeout.or(config.timeout_secs).unwrap_or(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Save the search term, and the key only when it was typed as `--key`.
    ///
    /// Keys from the environment or config file are never copied into the
    /// store, so editing `api_key` in config.toml takes effect on the next run.
    pub fn remember(&self, settings: &Settings, prefs: &mut dyn KeyValueStore) -> eyre::Result<()> {
        if self.no_remember {
            return Ok(());
        }
        if let Some(key) = self.key.as_deref().filter(|k| !k.trim().is_empty()) {
            prefs.set(store::API_KEY, key)?;
        }
        prefs.set(store::SEARCH_TERM, &settings.search)
    }
}
