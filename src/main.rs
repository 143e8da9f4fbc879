use clap::Parser;
use imdb_ratings::{Details, FetcherConfig, HttpPageFetcher, ImdbRatingProvider, PatternExtractor};
use std::process;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "imdb-ratings")]
#[command(version, about = "Fetch the IMDb rating and vote count of a title")]
struct Cli {
    /// IMDb title identifier (e.g., "tt0111161")
    identifier: String,

    /// Request timeout in seconds (defaults to no explicit timeout)
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Custom User-Agent header
    #[arg(long)]
    user_agent: Option<String>,

    /// Pretty-print the JSON result
    #[arg(short, long)]
    pretty: bool,

    /// Log level: error, warn, info, debug, trace
    #[arg(long, default_value = "warn", value_enum)]
    log_level: LogLevel,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl Cli {
    fn fetcher_config(&self) -> FetcherConfig {
        FetcherConfig {
            timeout: self.timeout.map(Duration::from_secs),
            user_agent: self.user_agent.clone(),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout only carries the JSON result
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cli.log_level.as_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let fetcher = match HttpPageFetcher::from_config(&cli.fetcher_config()) {
        Ok(fetcher) => fetcher,
        Err(e) => {
            eprintln!("Error: Failed to create HTTP client: {}", e);
            process::exit(1);
        }
    };

    let provider = ImdbRatingProvider::with_parts(fetcher, PatternExtractor::new());

    tracing::info!(identifier = %cli.identifier, "Looking up IMDb rating");
    let details = provider.get_details(Some(&cli.identifier));

    let output = if cli.pretty {
        serde_json::to_string_pretty(&details)
    } else {
        serde_json::to_string(&details)
    };

    match output {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: Failed to serialize result: {}", e);
            process::exit(1);
        }
    }

    if let Details::Error { .. } = details {
        process::exit(1);
    }
}
