use std::env;

use crate::shared::validation::AWS_REGION_REGEX;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub max_request_body_size: usize,
}

/// S3 storage configuration for uploads and listings
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Bucket objects are stored in
    pub bucket: String,
    /// AWS region (also used for signing against S3-compatible endpoints)
    pub region: String,
    /// Static access key; falls back to the credential provider chain when unset
    pub access_key: Option<String>,
    /// Static secret key, required whenever `access_key` is set
    pub secret_key: Option<String>,
    pub session_token: Option<String>,
    /// S3-compatible endpoint URL (path-style addressing). `None` means AWS S3.
    pub endpoint: Option<String>,
    /// Base URL for public object links when a custom endpoint is used
    pub public_endpoint: Option<String>,
    /// Send the `public-read` canned ACL with every upload
    pub public_read: bool,
    /// Maximum number of keys read from the first listing page
    pub list_max_keys: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            storage: StorageConfig::from_env()?,
        })
    }
}

impl AppConfig {
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 10 * 1024 * 1024; // 10MB

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        let max_request_body_size = env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_REQUEST_BODY_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_REQUEST_BODY_SIZE must be a valid number".to_string())?;

        Ok(Self {
            host,
            port,
            max_request_body_size,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl StorageConfig {
    const DEFAULT_REGION: &'static str = "us-east-1";
    const DEFAULT_LIST_MAX_KEYS: usize = 1000;

    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the storage configuration from an arbitrary variable source.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|s| !s.trim().is_empty());

        let bucket = var("S3_BUCKET").ok_or_else(|| "S3_BUCKET must be set".to_string())?;

        let region = var("AWS_REGION").unwrap_or_else(|| Self::DEFAULT_REGION.to_string());

        let access_key = var("AWS_ACCESS_KEY_ID");
        let secret_key = var("AWS_SECRET_ACCESS_KEY");
        if access_key.is_some() != secret_key.is_some() {
            return Err(
                "AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY must be set together".to_string(),
            );
        }
        let session_token = var("AWS_SESSION_TOKEN");

        let endpoint = var("S3_ENDPOINT").map(|e| e.trim_end_matches('/').to_string());

        // S3-compatible endpoints accept arbitrary region names ("auto", "minio")
        if endpoint.is_none() && !AWS_REGION_REGEX.is_match(&region) {
            return Err(format!("AWS_REGION '{}' is not a valid AWS region", region));
        }

        // Public endpoint defaults to the main endpoint if not specified
        let public_endpoint = var("S3_PUBLIC_ENDPOINT")
            .map(|e| e.trim_end_matches('/').to_string())
            .or_else(|| endpoint.clone());

        let public_read = match var("S3_PUBLIC_READ") {
            Some(v) => parse_bool(&v)
                .ok_or_else(|| "S3_PUBLIC_READ must be true or false".to_string())?,
            None => true,
        };

        let list_max_keys = var("S3_LIST_MAX_KEYS")
            .unwrap_or_else(|| Self::DEFAULT_LIST_MAX_KEYS.to_string())
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| "S3_LIST_MAX_KEYS must be a positive number".to_string())?;

        Ok(Self {
            bucket,
            region,
            access_key,
            secret_key,
            session_token,
            endpoint,
            public_endpoint,
            public_read,
            list_max_keys,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
