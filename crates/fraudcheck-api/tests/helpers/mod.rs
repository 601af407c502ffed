//! Shared helpers for API integration tests: a test server factory and fake
//! collaborator clients that record what the handler sent them.

use async_trait::async_trait;
use axum_test::TestServer;
use std::sync::{Arc, Mutex};

use fraudcheck_api::services::analysis::{AnalysisClient, AnalysisError, AnalysisRequest};
use fraudcheck_api::services::email::{DeliveryError, Mailer, OutboundEmail};
use fraudcheck_api::setup::routes::setup_routes;
use fraudcheck_api::state::AppState;
use fraudcheck_core::Config;

/// Fixed-value config for the test binary, independent of the developer's
/// environment. Limits here are what the validation tests assert against.
pub fn test_config() -> Config {
    Config {
        server_port: 3000,
        environment: "test".to_string(),
        cors_origins: vec!["*".to_string()],
        openai_api_key: None,
        openai_model: "gpt-4o-mini".to_string(),
        smtp_host: None,
        smtp_port: 587,
        smtp_user: None,
        smtp_password: None,
        smtp_tls: true,
        smtp_from: None,
        analyst_emails: Vec::new(),
        max_files: 5,
        max_file_size_bytes: 6 * 1024 * 1024,
        text_max_chars: 12_000,
        pdf_max_pages: 10,
        pdf_max_chars: 20_000,
        prompt_max_chars: 16_000,
    }
}

/// Analysis fake that records every request and replies with a fixed
/// narrative.
pub struct RecordingAnalysis {
    pub reply: String,
    pub calls: Arc<Mutex<Vec<AnalysisRequest>>>,
}

impl RecordingAnalysis {
    pub fn new(reply: &str) -> (Arc<Self>, Arc<Mutex<Vec<AnalysisRequest>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let fake = Arc::new(Self {
            reply: reply.to_string(),
            calls: calls.clone(),
        });
        (fake, calls)
    }
}

#[async_trait]
impl AnalysisClient for RecordingAnalysis {
    async fn analyze(&self, request: AnalysisRequest) -> Result<String, AnalysisError> {
        self.calls.lock().unwrap().push(request);
        Ok(self.reply.clone())
    }
}

/// Analysis fake that always fails.
pub struct FailingAnalysis;

#[async_trait]
impl AnalysisClient for FailingAnalysis {
    async fn analyze(&self, _request: AnalysisRequest) -> Result<String, AnalysisError> {
        Err(AnalysisError::Api("quota exceeded".to_string()))
    }
}

/// Mailer fake that records every outbound email, optionally rejecting the
/// send.
pub struct RecordingMailer {
    pub fail: bool,
    pub calls: Arc<Mutex<Vec<OutboundEmail>>>,
}

impl RecordingMailer {
    pub fn new(fail: bool) -> (Arc<Self>, Arc<Mutex<Vec<OutboundEmail>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let fake = Arc::new(Self {
            fail,
            calls: calls.clone(),
        });
        (fake, calls)
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: OutboundEmail) -> Result<(), DeliveryError> {
        if self.fail {
            return Err(DeliveryError::Transport(
                "rejected by provider".to_string(),
            ));
        }
        self.calls.lock().unwrap().push(email);
        Ok(())
    }
}

/// Build a test server over the real router with the given collaborators.
pub fn setup_test_app(
    analysis: Option<Arc<dyn AnalysisClient>>,
    mailer: Option<Arc<dyn Mailer>>,
) -> TestServer {
    let config = test_config();
    let state = AppState::new(config.clone(), analysis, mailer);
    let router = setup_routes(&config, state).expect("router setup");
    TestServer::new(router).expect("test server")
}

/// Minimal valid PNG header bytes, good enough to travel the pipeline.
pub fn png_bytes() -> Vec<u8> {
    b"\x89PNG\r\n\x1a\n_pixels_".to_vec()
}
