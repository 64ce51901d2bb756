//! Application configuration management.

use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Object storage configuration.
    pub storage: StorageSettings,
    /// Preview delivery configuration.
    #[serde(default)]
    pub preview: PreviewSettings,
    /// External converter configuration.
    #[serde(default)]
    pub converter: ConverterSettings,
    /// Upload record store configuration.
    #[serde(default)]
    pub uploads: UploadSettings,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// S3-compatible object storage configuration.
///
/// Endpoint, bucket and credentials have no defaults and must be supplied.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// S3 endpoint URL.
    pub endpoint: String,
    /// Bucket holding both uploads and converted PDFs.
    pub bucket: String,
    /// Access key ID.
    pub access_key_id: String,
    /// Secret access key.
    pub secret_access_key: String,
    /// Region (any value works for MinIO).
    #[serde(default = "default_region")]
    pub region: String,
    /// Presigned upload URL TTL in seconds.
    #[serde(default = "default_upload_ttl")]
    pub upload_url_ttl_secs: u64,
    /// Presigned download URL TTL in seconds.
    #[serde(default = "default_download_ttl")]
    pub download_url_ttl_secs: u64,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_upload_ttl() -> u64 {
    900 // 15 minutes
}

fn default_download_ttl() -> u64 {
    3600 // 1 hour
}

/// How the conversion endpoint hands a PDF back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMode {
    /// Raw PDF bytes in the response body.
    #[default]
    Binary,
    /// Base64-encoded PDF bytes in the response body.
    Base64,
    /// Redirect to a freshly presigned download URL.
    Redirect,
}

impl DeliveryMode {
    /// Configuration value for this mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::Base64 => "base64",
            Self::Redirect => "redirect",
        }
    }
}

/// Preview delivery configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PreviewSettings {
    /// Externally reachable base URL of this service, used to build preview URLs.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    /// Response strategy for converted PDFs.
    #[serde(default)]
    pub delivery: DeliveryMode,
    /// Last page included in a conversion.
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,
    /// Parent directory for per-conversion scratch directories.
    #[serde(default)]
    pub scratch_dir: Option<PathBuf>,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            public_base_url: default_public_base_url(),
            delivery: DeliveryMode::default(),
            page_limit: default_page_limit(),
            scratch_dir: None,
        }
    }
}

fn default_public_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_page_limit() -> u32 {
    25
}

/// LibreOffice converter configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ConverterSettings {
    /// Path or name of the `soffice` binary.
    #[serde(default = "default_binary")]
    pub binary: String,
    /// Hard limit on a single conversion, in seconds.
    #[serde(default = "default_converter_timeout")]
    pub timeout_secs: u64,
}

impl Default for ConverterSettings {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            timeout_secs: default_converter_timeout(),
        }
    }
}

fn default_binary() -> String {
    "soffice".to_string()
}

fn default_converter_timeout() -> u64 {
    120
}

/// Upload record store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadSettings {
    /// How long an upload record stays resolvable, in seconds.
    #[serde(default = "default_record_ttl")]
    pub record_ttl_secs: u64,
    /// Maximum number of upload records kept in memory.
    #[serde(default = "default_max_records")]
    pub max_records: u64,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            record_ttl_secs: default_record_ttl(),
            max_records: default_max_records(),
        }
    }
}

fn default_record_ttl() -> u64 {
    86400 // 1 day
}

fn default_max_records() -> u64 {
    10_000
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded, a required
    /// storage setting is missing, or a value is out of range.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("DOCVIEW").separator("__"))
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.preview.page_limit < 1 {
            return Err(config::ConfigError::Message(
                "preview.page_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED: [(&str, Option<&str>); 4] = [
        ("DOCVIEW__STORAGE__ENDPOINT", Some("http://localhost:9000")),
        ("DOCVIEW__STORAGE__BUCKET", Some("previews")),
        ("DOCVIEW__STORAGE__ACCESS_KEY_ID", Some("admin")),
        ("DOCVIEW__STORAGE__SECRET_ACCESS_KEY", Some("password")),
    ];

    #[test]
    fn test_load_applies_defaults() {
        temp_env::with_vars(REQUIRED, || {
            let config = AppConfig::load().expect("config should load");

            assert_eq!(config.server.port, 8080);
            assert_eq!(config.storage.bucket, "previews");
            assert_eq!(config.storage.region, "us-east-1");
            assert_eq!(config.storage.upload_url_ttl_secs, 900);
            assert_eq!(config.preview.delivery, DeliveryMode::Binary);
            assert_eq!(config.preview.page_limit, 25);
            assert_eq!(config.converter.binary, "soffice");
            assert_eq!(config.uploads.max_records, 10_000);
        });
    }

    #[test]
    fn test_load_reads_delivery_mode() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("DOCVIEW__PREVIEW__DELIVERY", Some("redirect")));
        vars.push(("DOCVIEW__PREVIEW__PAGE_LIMIT", Some("10")));

        temp_env::with_vars(vars, || {
            let config = AppConfig::load().expect("config should load");
            assert_eq!(config.preview.delivery, DeliveryMode::Redirect);
            assert_eq!(config.preview.page_limit, 10);
        });
    }

    #[test]
    fn test_load_requires_bucket() {
        let vars: Vec<_> = REQUIRED
            .iter()
            .map(|(k, v)| {
                if *k == "DOCVIEW__STORAGE__BUCKET" {
                    (*k, None)
                } else {
                    (*k, *v)
                }
            })
            .collect();

        temp_env::with_vars(vars, || {
            assert!(AppConfig::load().is_err());
        });
    }

    #[test]
    fn test_load_rejects_zero_page_limit() {
        let mut vars = REQUIRED.to_vec();
        vars.push(("DOCVIEW__PREVIEW__PAGE_LIMIT", Some("0")));

        temp_env::with_vars(vars, || {
            let err = AppConfig::load().unwrap_err();
            assert!(err.to_string().contains("page_limit"));
        });
    }
}
