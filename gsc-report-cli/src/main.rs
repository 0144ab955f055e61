use anyhow::{Context, Result, anyhow};
use clap::{Parser, builder::styling};
use gsc_core::contracts::ReportSettings;
use gsc_core::logging::IGscLogger;
use gsc_core::report_fetcher::failure_line;
use gsc_core::{GscError, run_report};
use gsc_provider_google::GoogleSearchConsoleClient;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod progress;
use progress::SpinnerLogger;

const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::Green.on_default().bold())
    .usage(styling::AnsiColor::Green.on_default().bold())
    .literal(styling::AnsiColor::Cyan.on_default().bold())
    .placeholder(styling::AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "gsc-report: print Search Console search analytics as JSON",
    long_about = "Authenticates with a Google service account, runs one search analytics query and prints the response.\n\nCredentials come from PRIVATE_KEY and CLIENT_EMAIL (or a key file), the property from WEBSITE. A .env file in the working directory is read as well; flags override the environment.",
    styles = STYLES
)]
struct Args {
    #[arg(short, long, help = "Property to query, e.g. https://example.com/ or sc-domain:example.com [env: WEBSITE]")]
    site: Option<String>,

    #[arg(long, value_name = "YYYY-MM-DD", help = "First day of the range [env: START_DATE]")]
    start_date: Option<String>,

    #[arg(long, value_name = "YYYY-MM-DD", help = "Last day of the range [env: END_DATE]")]
    end_date: Option<String>,

    #[arg(
        short,
        long = "dimension",
        value_name = "DIMENSION",
        help = "Breakdown: page, query, device, country or date; repeat for several [env: DIMENSIONS]"
    )]
    dimensions: Vec<String>,

    #[arg(short = 't', long, help = "web, image, video, news, discover or googleNews [env: SEARCH_TYPE]")]
    search_type: Option<String>,

    #[arg(short = 'n', long, help = "Maximum number of rows to return [env: ROW_LIMIT]")]
    row_limit: Option<u32>,

    #[arg(short, long, help = "Service account JSON key file [env: GOOGLE_APPLICATION_CREDENTIALS]")]
    key_file: Option<PathBuf>,

    #[arg(short, long, default_value_t = false, help = "Log debug details to stderr")]
    verbose: bool,
}

impl Args {
    /// Flags win over values read from the environment.
    fn apply(&self, settings: &mut ReportSettings) {
        if let Some(site) = &self.site {
            settings.website = Some(site.clone());
        }
        if let Some(start) = &self.start_date {
            settings.start_date = Some(start.clone());
        }
        if let Some(end) = &self.end_date {
            settings.end_date = Some(end.clone());
        }
        if !self.dimensions.is_empty() {
            settings.dimensions = self
                .dimensions
                .iter()
                .flat_map(|d| d.split(','))
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(search_type) = &self.search_type {
            settings.search_type = Some(search_type.clone());
        }
        if let Some(limit) = self.row_limit {
            settings.row_limit = Some(limit.to_string());
        }
        if let Some(path) = &self.key_file {
            settings.key_file = Some(path.clone());
            settings.private_key = None;
            settings.client_email = None;
        }
    }
}

fn init_tracing(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::try_new("debug")?
    } else {
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {e}"))
}

/// Loads `.env` from the working directory only, never from a parent, without
/// overriding variables that are already set. A missing file is fine.
fn load_dotenv() -> Result<Option<PathBuf>> {
    let path = PathBuf::from(".env");
    match dotenvy::from_path(&path) {
        Ok(()) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e).context("cannot read .env file"),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_tracing(args.verbose) {
        eprintln!("{e:#}");
        return ExitCode::FAILURE;
    }

    match load_dotenv() {
        Ok(Some(path)) => tracing::debug!(path = %path.display(), "loaded environment file"),
        Ok(None) => {}
        Err(e) => {
            let err = GscError::config(format!("{e:#}"));
            println!("{}", failure_line(&err));
            return ExitCode::from(err.exit_code());
        }
    }

    let mut settings = ReportSettings::from_env();
    args.apply(&mut settings);
    tracing::debug!(?settings, "resolved settings");

    let logger: Option<Arc<dyn IGscLogger>> = match SpinnerLogger::new() {
        Ok(spinner) => Some(Arc::new(spinner)),
        Err(e) => {
            tracing::warn!(error = %e, "progress spinner unavailable");
            None
        }
    };

    let client = Arc::new(GoogleSearchConsoleClient::new());
    let today = chrono::Local::now().date_naive();
    let mut stdout = io::stdout();

    match run_report(&settings, today, client, &mut stdout, logger).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => ExitCode::from(err.exit_code()),
    }
}
