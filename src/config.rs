//! Configuration management for the tabular server

use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub extraction: ExtractionConfig,
    pub ocr: OcrConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionConfig {
    /// Maximum seconds the detection/formatting pipeline may run per request.
    pub timeout_secs: u64,
    /// Root under which per-request staging directories are created.
    /// Defaults to the system temp directory when unset.
    pub staging_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OcrConfig {
    /// OCR executable invoked as a subprocess.
    pub program: String,
    /// Maximum seconds the OCR subprocess may run per request.
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5328,
            },
            extraction: ExtractionConfig {
                timeout_secs: 60,
                staging_dir: None,
            },
            ocr: OcrConfig {
                program: "ocrmypdf".to_string(),
                timeout_secs: 300,
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("SERVER_PORT")
                    .unwrap_or_else(|_| "5328".to_string())
                    .parse()
                    .unwrap_or(5328),
            },
            extraction: ExtractionConfig {
                timeout_secs: env::var("EXTRACTION_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "60".to_string())
                    .parse()
                    .unwrap_or(60),
                staging_dir: env::var("STAGING_DIR").ok().map(PathBuf::from),
            },
            ocr: OcrConfig {
                program: env::var("OCR_PROGRAM").unwrap_or_else(|_| "ocrmypdf".to_string()),
                timeout_secs: env::var("OCR_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "300".to_string())
                    .parse()
                    .unwrap_or(300),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Config;

    #[test]
    fn defaults_give_a_working_server() {
        let config = Config::default();
        assert_eq!(config.server.port, 5328);
        assert_eq!(config.ocr.program, "ocrmypdf");
        assert!(config.extraction.staging_dir.is_none());
    }
}
