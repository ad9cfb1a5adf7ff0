use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub quote: QuoteConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            quote: QuoteConfig::load()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Settings consumed by the quotation pipeline.
///
/// Constructed once at startup and handed to the pipeline explicitly so the
/// evaluation core carries no process-wide state.
#[derive(Debug, Clone)]
pub struct QuoteConfig {
    /// Base URL of the OSRM-compatible routing backend.
    pub routing_url: String,
    /// GST percentage applied to the material subtotal.
    pub gst_pct: f64,
    /// Currency code used in summaries and invoices.
    pub currency: String,
    /// Directory that rendered invoice documents are written to.
    pub invoice_dir: PathBuf,
    /// Optional API key for the narrative summarizer. Absent key means the
    /// deterministic computed summary is used.
    pub summary_api_key: Option<String>,
}

impl QuoteConfig {
    fn load() -> Result<Self, ConfigError> {
        let routing_url =
            env::var("OSRM_URL").unwrap_or_else(|_| "http://localhost:5000".to_string());
        let gst_pct = env::var("GST_PCT")
            .unwrap_or_else(|_| "18.0".to_string())
            .parse::<f64>()
            .map_err(|_| ConfigError::InvalidGstPct)?;
        let currency = env::var("CURRENCY").unwrap_or_else(|_| "INR".to_string());
        let invoice_dir =
            PathBuf::from(env::var("INVOICE_DIR").unwrap_or_else(|_| "./invoices".to_string()));
        let summary_api_key = env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        Ok(Self {
            routing_url,
            gst_pct,
            currency,
            invoice_dir,
            summary_api_key,
        })
    }
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            routing_url: "http://localhost:5000".to_string(),
            gst_pct: 18.0,
            currency: "INR".to_string(),
            invoice_dir: PathBuf::from("./invoices"),
            summary_api_key: None,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidGstPct,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidGstPct => write!(f, "GST_PCT must be a valid percentage"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidGstPct => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
