//! Submission handler
//!
//! The request-level orchestrator: validate the multipart form, assemble the
//! evidence bundle, call the analysis collaborator, then the delivery
//! collaborator. The two collaborator calls are independently fault-tolerant:
//! once validation passes the response is always a 200 whose flags describe
//! what each collaborator did.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use fraudcheck_processing::{assemble, build_prompt, ExtractionLimits, SYSTEM_PROMPT};

use crate::error::HttpAppError;
use crate::services::analysis::AnalysisRequest;
use crate::services::email::{EmailAttachment, OutboundEmail};
use crate::state::AppState;
use crate::utils::upload::{read_submission, sanitize_filename};

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub ok: bool,
    pub submission_id: String,
    pub message: String,
    pub email_sent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_error: Option<String>,
}

pub async fn submit(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<SubmitResponse>, HttpAppError> {
    let submission_id = Uuid::new_v4().to_string();

    let (meta, files) = read_submission(
        multipart,
        state.config.max_files(),
        state.config.max_file_size_bytes(),
    )
    .await?;

    tracing::info!(
        submission_id = %submission_id,
        transaction_type = %meta.transaction_type,
        files = files.len(),
        "Processing submission"
    );

    let limits = ExtractionLimits {
        text_max_chars: state.config.text_max_chars(),
        pdf_max_pages: state.config.pdf_max_pages(),
        pdf_max_chars: state.config.pdf_max_chars(),
    };
    let bundle = assemble(files, limits);
    let prompt = build_prompt(&meta, &bundle, state.config.prompt_max_chars());

    // Analysis collaborator (optional)
    let (ai_text, ai_error) = match &state.analysis {
        None => (
            "AI analysis not run: the analysis collaborator is not configured.".to_string(),
            Some("OPENAI_API_KEY missing".to_string()),
        ),
        Some(client) => {
            let request = AnalysisRequest {
                system: SYSTEM_PROMPT.to_string(),
                prompt,
                images: bundle.images.clone(),
            };
            match client.analyze(request).await {
                Ok(text) => (text, None),
                Err(e) => {
                    tracing::warn!(
                        submission_id = %submission_id,
                        error = %e,
                        "Analysis failed"
                    );
                    (format!("AI analysis failed: {}", e), Some(e.to_string()))
                }
            }
        }
    };

    // Delivery collaborator (optional, independent of the analysis outcome)
    let (email_sent, email_error) = match &state.mailer {
        None => (
            false,
            Some("email delivery is not configured".to_string()),
        ),
        Some(mailer) => {
            let attachments: Vec<EmailAttachment> = bundle
                .files
                .iter()
                .map(|f| EmailAttachment {
                    filename: sanitize_filename(&f.filename),
                    content_type: f.content_type.clone(),
                    data: f.data.to_vec(),
                })
                .collect();

            let email = OutboundEmail {
                subject: format!("Fraud Review Submission {}", submission_id),
                html_body: crate::services::email::build_analyst_html(
                    &submission_id,
                    &meta,
                    &ai_text,
                ),
                attachments,
            };

            match mailer.send(email).await {
                Ok(()) => (true, None),
                Err(e) => {
                    tracing::warn!(
                        submission_id = %submission_id,
                        error = %e,
                        "Email delivery failed"
                    );
                    (false, Some(e.to_string()))
                }
            }
        }
    };

    tracing::info!(
        submission_id = %submission_id,
        email_sent,
        ai_failed = ai_error.is_some(),
        "Submission processed"
    );

    Ok(Json(SubmitResponse {
        ok: true,
        submission_id,
        message: "Submitted successfully.".to_string(),
        email_sent,
        email_error,
        ai_error,
    }))
}
