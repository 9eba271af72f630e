use anyhow::{anyhow, Error};
use clap::Parser;
use slog::{error, info, o, Drain, Level, Logger};
use std::{env, fs, path::Path, path::PathBuf, time::Duration};
use time::UtcOffset;
use tokio::signal;

use crate::{parse_offset, Coordinate, LiveSource, FORECAST_HOURS};

#[derive(Parser, Clone, Debug, Default, serde::Deserialize)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to Settings.toml file holding the rest of the cli options
    #[arg(short, long)]
    pub config: Option<String>,

    /// Set the log level (default: info)
    #[arg(short, long)]
    pub level: Option<String>,

    /// Latitude of the observer, in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub latitude: Option<f64>,

    /// Longitude of the observer, in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub longitude: Option<f64>,

    /// Utc offset both feeds are lined up on, e.g. -06:00 (default: this machine's offset)
    #[arg(short, long, allow_hyphen_values = true)]
    pub utc_offset: Option<String>,

    /// Where the rendered page is written (default: ./weather.html)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Seconds between live observation refreshes (default: 30)
    #[arg(long)]
    pub live_interval: Option<u64>,

    /// Seconds between forecast and uv refreshes (default: 300)
    #[arg(long)]
    pub forecast_interval: Option<u64>,

    /// Hourly forecast periods to show (default: 13)
    #[arg(long)]
    pub forecast_hours: Option<usize>,

    /// Live observation source, mesonet or proxy (default: mesonet)
    #[arg(long)]
    pub live_source: Option<String>,

    /// Mesonet network of the live station (default: MN_ASOS)
    #[arg(long)]
    pub network: Option<String>,

    /// Mesonet station id (default: MSP)
    #[arg(long)]
    pub station: Option<String>,

    /// Url of the proxied observation feed, required with --live-source proxy
    #[arg(long)]
    pub proxy_url: Option<String>,

    /// Base url of the weather.gov api (default: https://api.weather.gov)
    #[arg(long)]
    pub nws_url: Option<String>,

    /// Base url of the EPA envirofacts service (default: https://data.epa.gov/efservice)
    #[arg(long)]
    pub epa_url: Option<String>,

    /// Base url of the Iowa Environmental Mesonet (default: https://mesonet.agron.iastate.edu)
    #[arg(long)]
    pub mesonet_url: Option<String>,

    /// Retries for transient request failures (default: 0)
    #[arg(long)]
    pub retries: Option<u32>,
}

/// Parses the command line; when `--config` points at a readable file its contents take over.
pub fn get_config_info() -> Result<Cli, Error> {
    let cli = Cli::parse();
    match cli.config.as_deref() {
        Some(config_path) if Path::new(config_path).exists() => load_config(config_path),
        _ => Ok(cli),
    }
}

pub fn load_config(config_path: &str) -> Result<Cli, Error> {
    let content = fs::read_to_string(config_path)
        .map_err(|e| anyhow!("error reading config file {}: {}", config_path, e))?;
    let mut cli: Cli = toml::from_str(&content)
        .map_err(|e| anyhow!("error parsing config file {}: {}", config_path, e))?;
    cli.config = Some(config_path.to_string());
    Ok(cli)
}

pub fn get_log_level(cli: &Cli) -> Level {
    let level = match cli.level.as_ref() {
        Some(level) => level.to_lowercase(),
        None => env::var("RUST_LOG")
            .unwrap_or_else(|_| String::from(""))
            .to_lowercase(),
    };
    match level.as_str() {
        "trace" => Level::Trace,
        "debug" => Level::Debug,
        "info" => Level::Info,
        "warn" => Level::Warning,
        "error" => Level::Error,
        _ => Level::Info,
    }
}

pub fn setup_logger(cli: &Cli) -> Logger {
    let log_level = get_log_level(cli);
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::CompactFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    let drain = drain.filter_level(log_level).fuse();
    slog::Logger::root(drain, o!("version" => env!("CARGO_PKG_VERSION")))
}

/// Everything the process needs, with defaults filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub coordinate: Option<Coordinate>,
    pub utc_offset: Option<UtcOffset>,
    pub output: Option<PathBuf>,
    pub live_interval: Duration,
    pub forecast_interval: Duration,
    pub forecast_hours: usize,
    pub live_source: LiveSource,
    pub nws_url: String,
    pub epa_url: String,
    pub mesonet_url: String,
    pub retries: u32,
    pub user_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            coordinate: None,
            utc_offset: None,
            output: Some(PathBuf::from("./weather.html")),
            live_interval: Duration::from_secs(30),
            forecast_interval: Duration::from_secs(300),
            forecast_hours: FORECAST_HOURS,
            live_source: LiveSource::Mesonet {
                network: String::from("MN_ASOS"),
                station: String::from("MSP"),
            },
            nws_url: String::from("https://api.weather.gov"),
            epa_url: String::from("https://data.epa.gov/efservice"),
            mesonet_url: String::from("https://mesonet.agron.iastate.edu"),
            retries: 0,
            user_agent: format!("wxboard/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl TryFrom<Cli> for Settings {
    type Error = anyhow::Error;
    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let defaults = Settings::default();

        let coordinate = match (cli.latitude, cli.longitude) {
            (Some(latitude), Some(longitude)) => {
                if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude)
                {
                    return Err(anyhow!(
                        "coordinate out of range: {}, {}",
                        latitude,
                        longitude
                    ));
                }
                Some(Coordinate::new(latitude, longitude))
            }
            (None, None) => None,
            _ => return Err(anyhow!("latitude and longitude must be set together")),
        };

        let utc_offset = cli.utc_offset.as_deref().map(parse_offset).transpose()?;

        let live_source = match cli.live_source.as_deref().map(str::to_lowercase).as_deref() {
            None | Some("mesonet") => {
                let (default_network, default_station) = match defaults.live_source {
                    LiveSource::Mesonet { network, station } => (network, station),
                    LiveSource::Proxy { .. } => (String::new(), String::new()),
                };
                LiveSource::Mesonet {
                    network: cli.network.unwrap_or(default_network),
                    station: cli.station.unwrap_or(default_station),
                }
            }
            Some("proxy") => LiveSource::Proxy {
                url: cli
                    .proxy_url
                    .ok_or_else(|| anyhow!("proxy_url is required for the proxy live source"))?,
            },
            Some(other) => return Err(anyhow!("unknown live source: {}", other)),
        };

        let forecast_hours = cli.forecast_hours.unwrap_or(defaults.forecast_hours);
        if forecast_hours == 0 {
            return Err(anyhow!("forecast_hours must be at least 1"));
        }
        let live_interval = cli
            .live_interval
            .map(Duration::from_secs)
            .unwrap_or(defaults.live_interval);
        let forecast_interval = cli
            .forecast_interval
            .map(Duration::from_secs)
            .unwrap_or(defaults.forecast_interval);
        if live_interval.is_zero() || forecast_interval.is_zero() {
            return Err(anyhow!("refresh intervals must be at least one second"));
        }

        Ok(Settings {
            coordinate,
            utc_offset,
            output: cli.output.map(PathBuf::from).or(defaults.output),
            live_interval,
            forecast_interval,
            forecast_hours,
            live_source,
            nws_url: cli.nws_url.unwrap_or(defaults.nws_url),
            epa_url: cli.epa_url.unwrap_or(defaults.epa_url),
            mesonet_url: cli.mesonet_url.unwrap_or(defaults.mesonet_url),
            retries: cli.retries.unwrap_or(defaults.retries),
            user_agent: defaults.user_agent,
        })
    }
}

pub fn create_folder(root_path: &Path, logger: &Logger) {
    if root_path.as_os_str().is_empty() || root_path.is_dir() {
        return;
    }
    if let Err(err) = fs::create_dir_all(root_path) {
        error!(logger, "error creating folder {}: {}", root_path.display(), err);
    } else {
        info!(logger, "folder created: {}", root_path.display());
    }
}

pub async fn shutdown_signal(logger: &Logger) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!(logger, "failed to listen for ctrl+c: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!(logger, "failed to install terminate handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
