use serde::Deserialize;
use std::env;
use std::path::PathBuf;

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

/// Reads a variable, treating an empty or whitespace-only value as unset.
fn non_empty_env(var: &str) -> Option<String> {
    env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub ocr: OcrConfig,
    pub upload: UploadConfig,
    pub scans: ScanConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OcrConfig {
    /// Base address of the text-extraction service. `None` disables OCR.
    pub url: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    pub base_url: String,
    pub cloud_name: String,
    pub upload_preset: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub enum SeedSource {
    /// The bundled example scans.
    Examples,
    /// Start with no scans.
    Empty,
    /// A JSON array of scan results on disk.
    File(PathBuf),
}

impl SeedSource {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "" | "examples" | "default" => SeedSource::Examples,
            "empty" | "none" => SeedSource::Empty,
            _ => SeedSource::File(PathBuf::from(raw.trim())),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScanConfig {
    pub user_id: String,
    pub seed: SeedSource,
    pub max_file_size: usize,
    pub page_size: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            user_id: "1".to_string(),
            seed: SeedSource::Examples,
            max_file_size: 10 * 1024 * 1024,
            page_size: 6,
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.cloudinary.com".to_string(),
            cloud_name: "dxc5curxy".to_string(),
            upload_preset: "ProjetRL".to_string(),
            timeout_secs: 60,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let upload_defaults = UploadConfig::default();
        let scan_defaults = ScanConfig::default();

        Self {
            server: ServerConfig {
                host: env::var("INKSCAN_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_env_or("INKSCAN_PORT", 3000),
            },
            ocr: OcrConfig {
                url: non_empty_env("OCR_API_URL"),
                timeout_secs: parse_env_or("OCR_TIMEOUT", 60),
            },
            upload: UploadConfig {
                base_url: non_empty_env("UPLOAD_BASE_URL").unwrap_or(upload_defaults.base_url),
                cloud_name: non_empty_env("UPLOAD_CLOUD_NAME")
                    .unwrap_or(upload_defaults.cloud_name),
                upload_preset: non_empty_env("UPLOAD_PRESET")
                    .unwrap_or(upload_defaults.upload_preset),
                timeout_secs: parse_env_or("UPLOAD_TIMEOUT", upload_defaults.timeout_secs),
            },
            scans: ScanConfig {
                user_id: non_empty_env("SCAN_USER_ID").unwrap_or(scan_defaults.user_id),
                seed: non_empty_env("SCAN_SEED")
                    .map(|raw| SeedSource::parse(&raw))
                    .unwrap_or(scan_defaults.seed),
                max_file_size: parse_env_or("SCAN_MAX_FILE_SIZE", scan_defaults.max_file_size),
                page_size: parse_env_or("SCAN_PAGE_SIZE", scan_defaults.page_size),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}
