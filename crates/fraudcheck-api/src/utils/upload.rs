//! Multipart form extraction and validation for submissions
//!
//! Validation order: required form fields, at least one file, file count,
//! per-file size (naming the offending file), then the all-empty check after
//! everything has been read. Empty files that slip in alongside non-empty
//! ones are silently skipped (reject-after-read policy). Every failure is an
//! immediate 400/413 before any collaborator is touched.

use axum::extract::Multipart;
use bytes::Bytes;
use fraudcheck_core::{AppError, SubmissionMeta};
use fraudcheck_processing::UploadedFile;

/// Read and validate the whole multipart submission.
pub async fn read_submission(
    mut multipart: Multipart,
    max_files: usize,
    max_file_size: usize,
) -> Result<(SubmissionMeta, Vec<UploadedFile>), AppError> {
    let mut transaction_type: Option<String> = None;
    let mut contact_email: Option<String> = None;
    let mut short_description = String::new();
    let mut client_name: Option<String> = None;
    let mut files: Vec<(String, Option<String>, Bytes)> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match field_name.as_str() {
            "transaction_type" => transaction_type = Some(read_text(field).await?),
            "contact_email" => contact_email = Some(read_text(field).await?),
            "short_description" => short_description = read_text(field).await?,
            "client_name" => client_name = Some(read_text(field).await?),
            "files" => {
                if files.len() >= max_files {
                    return Err(AppError::InvalidInput(format!(
                        "Too many files: at most {} files are allowed",
                        max_files
                    )));
                }
                let filename = field
                    .file_name()
                    .map(|s: &str| s.to_string())
                    .unwrap_or_else(|| "unknown".to_string());
                let content_type = field.content_type().map(|s: &str| s.to_string());

                let data = field.bytes().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read file data: {}", e))
                })?;

                if data.len() > max_file_size {
                    return Err(AppError::PayloadTooLarge(format!(
                        "File '{}' exceeds the maximum allowed size of {} MB",
                        filename,
                        max_file_size / 1024 / 1024
                    )));
                }

                files.push((filename, content_type, data));
            }
            // Unknown fields are ignored
            _ => {}
        }
    }

    let transaction_type = transaction_type
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::InvalidInput("transaction_type is required".to_string()))?;
    let contact_email = contact_email
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| AppError::InvalidInput("contact_email is required".to_string()))?;

    if files.is_empty() {
        return Err(AppError::InvalidInput("No files provided".to_string()));
    }

    let files: Vec<UploadedFile> = files
        .into_iter()
        .filter(|(_, _, data)| !data.is_empty())
        .map(|(filename, content_type, data)| UploadedFile::new(filename, content_type, data))
        .collect();

    if files.is_empty() {
        return Err(AppError::InvalidInput(
            "All uploaded files are empty".to_string(),
        ));
    }

    let meta = SubmissionMeta {
        transaction_type,
        contact_email,
        short_description,
        client_name,
    };

    Ok((meta, files))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read form field: {}", e)))
}

/// Sanitize an untrusted multipart filename for use as an attachment name.
/// Strips any path components and replaces characters outside
/// alphanumerics/dot/dash/underscore. Never fails; degenerate names collapse
/// to "file".
pub fn sanitize_filename(filename: &str) -> String {
    const MAX_FILENAME_LENGTH: usize = 255;

    let name = filename.rsplit(['/', '\\']).next().unwrap_or(filename);

    let sanitized: String = name
        .chars()
        .take(MAX_FILENAME_LENGTH)
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.trim_matches(['.', '_']).is_empty() {
        return "file".to_string();
    }

    sanitized
}
