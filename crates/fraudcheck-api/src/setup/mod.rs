//! Application setup and initialization

pub mod routes;
pub mod server;

use anyhow::Result;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use fraudcheck_core::Config;

use crate::services::{AnalysisClient, Mailer, OpenAiAnalysis, SmtpMailer};
use crate::state::AppState;

/// Initialize logging. `RUST_LOG` controls the filter, defaulting to info.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

/// Build collaborator clients, application state, and the router.
///
/// Missing collaborator credentials never fail startup: the collaborator is
/// simply absent from the state and every response reports it as such.
pub fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    let analysis = OpenAiAnalysis::from_config(&config)
        .map(|c| Arc::new(c) as Arc<dyn AnalysisClient>);
    if analysis.is_none() {
        tracing::warn!("OPENAI_API_KEY not set, AI analysis disabled");
    }

    let mailer = SmtpMailer::from_config(&config).map(|m| Arc::new(m) as Arc<dyn Mailer>);
    if mailer.is_none() {
        tracing::warn!("SMTP not fully configured, analyst email delivery disabled");
    }

    let state = AppState::new(config.clone(), analysis, mailer);
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
