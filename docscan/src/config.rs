use serde::Deserialize;
use std::env;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

fn env_non_empty(var: &str) -> Option<String> {
    env::var(var).ok().filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub ocr: OcrConfig,
    pub mrz: MrzConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Largest accepted request body, multipart or JSON.
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OcrConfig {
    /// Tesseract language codes, `+`-separated (e.g. `eng+fra`).
    pub languages: String,
    /// Directory holding `*.traineddata`; Tesseract's default lookup when unset.
    pub data_path: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MrzConfig {
    pub enabled: bool,
    pub languages: String,
    pub data_path: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "pretty" | "plain" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{other}' (expected text or json)")),
        }
    }
}

/// Read separately from [`Config`] because the subscriber has to be installed
/// before the rest of the environment is parsed.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        Self {
            format: parse_env_or("LOG_FORMAT", LogFormat::Text),
        }
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            languages: "eng".to_string(),
            data_path: None,
            timeout_secs: 60,
        }
    }
}

impl Default for MrzConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            languages: "eng".to_string(),
            data_path: None,
            timeout_secs: 30,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("DOCSCAN_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("DOCSCAN_PORT", 3002),
                max_upload_bytes: parse_env_or("DOCSCAN_MAX_UPLOAD_BYTES", 20 * 1024 * 1024),
            },
            ocr: OcrConfig {
                languages: env_non_empty("OCR_LANGUAGES").unwrap_or_else(|| "eng".to_string()),
                data_path: env_non_empty("OCR_DATA_PATH"),
                timeout_secs: parse_env_or("OCR_TIMEOUT", 60),
            },
            mrz: MrzConfig {
                enabled: parse_env_or("MRZ_ENABLED", true),
                languages: env_non_empty("MRZ_LANGUAGES").unwrap_or_else(|| "eng".to_string()),
                data_path: env_non_empty("MRZ_DATA_PATH"),
                timeout_secs: parse_env_or("MRZ_TIMEOUT", 30),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
