//! Application state
//!
//! Collaborator clients are constructed once at startup and injected here;
//! `None` means the collaborator is unconfigured and every submission reports
//! that in its response flags. Tests substitute fakes through the same
//! fields.

use std::sync::Arc;

use fraudcheck_core::Config;

use crate::services::{AnalysisClient, Mailer};

pub struct AppState {
    pub config: Config,
    pub analysis: Option<Arc<dyn AnalysisClient>>,
    pub mailer: Option<Arc<dyn Mailer>>,
}

impl AppState {
    pub fn new(
        config: Config,
        analysis: Option<Arc<dyn AnalysisClient>>,
        mailer: Option<Arc<dyn Mailer>>,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            analysis,
            mailer,
        })
    }
}
