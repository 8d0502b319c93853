use std::io::{self, BufRead};
use std::path::PathBuf;
use std::time::Duration;

use eyre::{Result, bail};
use log::{debug, info};

use ytc::store::{self, FileStore};
use ytc::{ScrapeInput, YouTubeClient};

mod cli;

use cli::{Cli, OutputFormat};

fn setup_logging() -> Result<()> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join("ytc.log");

    let target = Box::new(std::fs::OpenOptions::new().create(true).append(true).open(&log_file)?);

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized: {}", log_file.display());
    Ok(())
}

fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ytc")
        .join("logs")
}

fn build_after_help() -> String {
    format!(
        "\nFILES:\n  Config:      {}\n  Preferences: {}\n  Logs:        {}",
        ytc::config::config_path().display(),
        store::default_store_path().display(),
        log_dir().join("ytc.log").display()
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging()?;

    let after_help = build_after_help();
    let cmd = <Cli as clap::CommandFactory>::command().after_help(after_help);
    let matches = cmd.get_matches();
    let cli = <Cli as clap::FromArgMatches>::from_arg_matches(&matches)?;

    // Load config file (non-fatal if missing/invalid)
    let config = ytc::config::Config::load().unwrap_or_else(|e| {
        debug!("Ignoring config: {e}");
        ytc::config::Config::default()
    });

    let mut prefs = FileStore::open(store::default_store_path());
    let env_key = std::env::var("YOUTUBE_API_KEY").ok();
    let settings = cli.resolve(&config, &prefs, env_key);

    let Some(key) = settings.key.clone() else {
        bail!(
            "no API key provided\n\nUse --key, set YOUTUBE_API_KEY, or add api_key to {}",
            ytc::config::config_path().display()
        );
    };

    if let Err(e) = cli.remember(&settings, &mut prefs) {
        debug!("Could not save preferences: {e}");
    }

    if cli.verbose {
        let config_path = ytc::config::config_path();
        if config_path.exists() {
            eprintln!("Config: {}", config_path.display());
        }
        eprintln!(
            "Sort: {}\nSearch: {:?}\nLimit: {}",
            settings.sort, settings.search, settings.limit
        );
    }

    let timeout = Duration::from_secs(settings.timeout_secs);
    let client = match config.api_base.as_deref() {
        Some(base) => YouTubeClient::with_base_url(base, timeout)?,
        None => YouTubeClient::new(timeout)?,
    };

    // Collect URLs: from arg or stdin
    let urls = if let Some(ref url) = cli.url {
        vec![url.clone()]
    } else {
        let stdin = io::stdin();
        stdin.lock().lines().collect::<Result<Vec<_>, _>>()?
    };

    if urls.is_empty() {
        bail!("no URL or video ID provided\n\nUsage: ytc <URL>\n       echo <URL> | ytc");
    }

    let mut rendered_all = Vec::new();

    for url_input in &urls {
        let url_input = url_input.trim();
        if url_input.is_empty() {
            continue;
        }

        let input = ScrapeInput {
            credential: key.clone(),
            video: url_input.to_string(),
            search_term: settings.search.clone(),
            sort: settings.sort,
            limit: settings.limit,
        };

        let result = ytc::run(&client, &input).await?;

        if cli.verbose {
            eprintln!("Video: {}\nComments: {}", result.video_id, result.len());
        }

        let rendered = match settings.format {
            OutputFormat::Text => ytc::output::render_texts(&result),
            OutputFormat::Urls => ytc::output::render_urls(&result),
            OutputFormat::Both => ytc::output::render_both(&result),
            OutputFormat::Json => format!("{}\n", ytc::output::render_json(&result)?),
        };
        rendered_all.push(rendered);
    }

    let rendered = rendered_all.join("\n");

    if let Some(ref path) = cli.output {
        std::fs::write(path, &rendered)?;
        if cli.verbose {
            eprintln!("Output written to: {}", path.display());
        }
    } else {
        print!("{rendered}");
    }

    Ok(())
}
