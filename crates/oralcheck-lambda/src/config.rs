use std::env;

const DEFAULT_BUCKET: &str = "oralcheck";

/// Startup settings read once from the environment.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub bucket: String,
    /// Informational; the S3 client resolves its region through `aws-config`.
    pub region: Option<String>,
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        Self {
            bucket: env::var("ORALCHECK_BUCKET")
                .ok()
                .filter(|b| !b.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
            region: env::var("AWS_REGION").ok(),
        }
    }
}
