//! Configuration module
//!
//! All configuration comes from environment variables (with `.env` support via
//! dotenvy). Collaborator credentials are optional: a missing OpenAI key or an
//! incomplete SMTP block disables that collaborator instead of failing startup.
//! The disabled state is reported by `/health` and in per-submission response
//! flags.

use std::env;

// Limit defaults
const MAX_FILES: usize = 5;
const MAX_FILE_SIZE_MB: usize = 6;
const TEXT_MAX_CHARS: usize = 12_000;
const PDF_MAX_PAGES: usize = 10;
const PDF_MAX_CHARS: usize = 20_000;
const PROMPT_MAX_CHARS: usize = 16_000;
const SMTP_PORT: u16 = 587;

/// Application configuration, loaded once at startup. Fields are public so
/// tests can build a config from literal values instead of the environment.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    // Analysis collaborator (OpenAI)
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    // Delivery collaborator (SMTP)
    pub smtp_host: Option<String>,
    pub smtp_port: u16,
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
    pub smtp_tls: bool,
    pub smtp_from: Option<String>,
    pub analyst_emails: Vec<String>,
    // Submission limits
    pub max_files: usize,
    pub max_file_size_bytes: usize,
    pub text_max_chars: usize,
    pub pdf_max_pages: usize,
    pub pdf_max_chars: usize,
    pub prompt_max_chars: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let is_production =
            environment.to_lowercase() == "production" || environment.to_lowercase() == "prod";
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let analyst_emails: Vec<String> = env::var("ANALYST_EMAILS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_file_size_mb = env::var("MAX_FILE_SIZE_MB")
            .unwrap_or_else(|_| MAX_FILE_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_FILE_SIZE_MB);

        Ok(Self {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            environment,
            cors_origins,
            openai_api_key: env::var("OPENAI_API_KEY").ok().filter(|s| !s.is_empty()),
            openai_model: env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            smtp_host: env::var("SMTP_HOST").ok().filter(|s| !s.is_empty()),
            smtp_port: env::var("SMTP_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(SMTP_PORT),
            smtp_user: env::var("SMTP_USER").ok().filter(|s| !s.is_empty()),
            smtp_password: env::var("SMTP_PASSWORD").ok().filter(|s| !s.is_empty()),
            smtp_tls: env::var("SMTP_TLS")
                .unwrap_or_else(|_| "true".to_string())
                .to_lowercase()
                .parse()
                .unwrap_or(true),
            smtp_from: env::var("SMTP_FROM").ok().filter(|s| !s.is_empty()),
            analyst_emails,
            max_files: env::var("MAX_FILES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(MAX_FILES),
            max_file_size_bytes: max_file_size_mb * 1024 * 1024,
            text_max_chars: env::var("TEXT_MAX_CHARS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(TEXT_MAX_CHARS),
            pdf_max_pages: env::var("PDF_MAX_PAGES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(PDF_MAX_PAGES),
            pdf_max_chars: env::var("PDF_MAX_CHARS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(PDF_MAX_CHARS),
            prompt_max_chars: env::var("PROMPT_MAX_CHARS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(PROMPT_MAX_CHARS),
        })
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.cors_origins
    }

    pub fn openai_api_key(&self) -> Option<&str> {
        self.openai_api_key.as_deref()
    }

    pub fn openai_model(&self) -> &str {
        &self.openai_model
    }

    /// The analysis collaborator is usable only when an API key is present.
    pub fn analysis_configured(&self) -> bool {
        self.openai_api_key.is_some()
    }

    pub fn smtp_host(&self) -> Option<&str> {
        self.smtp_host.as_deref()
    }

    pub fn smtp_port(&self) -> u16 {
        self.smtp_port
    }

    pub fn smtp_user(&self) -> Option<&str> {
        self.smtp_user.as_deref()
    }

    pub fn smtp_password(&self) -> Option<&str> {
        self.smtp_password.as_deref()
    }

    pub fn smtp_tls(&self) -> bool {
        self.smtp_tls
    }

    pub fn smtp_from(&self) -> Option<&str> {
        self.smtp_from.as_deref()
    }

    pub fn analyst_emails(&self) -> &[String] {
        &self.analyst_emails
    }

    /// The delivery collaborator needs a host, a sender, and at least one recipient.
    pub fn email_configured(&self) -> bool {
        self.smtp_host.is_some() && self.smtp_from.is_some() && !self.analyst_emails.is_empty()
    }

    pub fn max_files(&self) -> usize {
        self.max_files
    }

    pub fn max_file_size_bytes(&self) -> usize {
        self.max_file_size_bytes
    }

    pub fn text_max_chars(&self) -> usize {
        self.text_max_chars
    }

    pub fn pdf_max_pages(&self) -> usize {
        self.pdf_max_pages
    }

    pub fn pdf_max_chars(&self) -> usize {
        self.pdf_max_chars
    }

    pub fn prompt_max_chars(&self) -> usize {
        self.prompt_max_chars
    }
}
