//! Health check handler
//!
//! Reports process liveness plus the capability flags a caller needs to
//! interpret submission responses: whether each collaborator is configured
//! and whether PDF text extraction is compiled in. No side effects.

use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;

use crate::state::AppState;

pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "ok": true,
        "ai_configured": state.analysis.is_some(),
        "email_configured": state.mailer.is_some(),
        "pdf_extraction": fraudcheck_processing::pdf::supported(),
    }))
}
