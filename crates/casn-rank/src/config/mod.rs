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
    pub data: DataConfig,
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

        let defaults = DataConfig::default();
        let data = DataConfig {
            directory: env::var("APP_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.directory),
            records_file: env::var("APP_RECORDS_FILE").unwrap_or(defaults.records_file),
            province_list: env::var("APP_PROVINCE_LIST").unwrap_or(defaults.province_list),
            jabatan_list: env::var("APP_JABATAN_LIST").unwrap_or(defaults.jabatan_list),
        };

        for (variable, file_name) in [
            ("APP_RECORDS_FILE", &data.records_file),
            ("APP_PROVINCE_LIST", &data.province_list),
            ("APP_JABATAN_LIST", &data.jabatan_list),
        ] {
            if file_name.trim().is_empty() {
                return Err(ConfigError::EmptyFileName { variable });
            }
        }

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            data,
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

/// Log filter controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Location of the exam result CSV and its two reference lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataConfig {
    pub directory: PathBuf,
    pub records_file: String,
    pub province_list: String,
    pub jabatan_list: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("data"),
            records_file: "recap_hasil_akhir_ma_24.csv".to_string(),
            province_list: "province_list.txt".to_string(),
            jabatan_list: "jabatan_list.txt".to_string(),
        }
    }
}

impl DataConfig {
    /// Default file names rooted at another directory.
    pub fn in_directory(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            ..Self::default()
        }
    }

    pub fn records_path(&self) -> PathBuf {
        self.directory.join(&self.records_file)
    }

    pub fn province_list_path(&self) -> PathBuf {
        self.directory.join(&self.province_list)
    }

    pub fn jabatan_list_path(&self) -> PathBuf {
        self.directory.join(&self.jabatan_list)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    EmptyFileName { variable: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::EmptyFileName { variable } => {
                write!(f, "{variable} must name a file")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort | ConfigError::EmptyFileName { .. } => None,
        }
    }
}
