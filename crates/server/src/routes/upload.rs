use actix_multipart::{Field, Multipart};
use actix_web::{post, web, HttpResponse};
use callassist_common::{AppConfig, CallAssistError};
use callassist_llm::Addressees;
use futures_util::StreamExt;
use std::sync::Arc;
use tracing::info;

use crate::error::ApiError;
use crate::intake::{self, UploadRecord};
use crate::state::AppState;
use crate::types::UploadResponse;

/// Fields collected from the multipart body
#[derive(Debug, Default)]
struct UploadForm {
    record: Option<UploadRecord>,
    salesperson_name: Option<String>,
    prospect_name: Option<String>,
}

/// Upload a call recording, transcribe it and draft a follow-up email
#[post("/upload")]
pub async fn upload(
    mut payload: Multipart,
    state: web::Data<Arc<AppState>>,
) -> Result<HttpResponse, ApiError> {
    let mut form = UploadForm::default();

    if let Err(e) = read_form(&mut payload, &state.config, &mut form).await {
        // Do not leave a stored file behind for a request that failed
        if let Some(record) = &form.record {
            intake::remove_upload(&record.file_path).await;
        }
        return Err(e);
    }

    let Some(record) = form.record else {
        return Err(CallAssistError::invalid_input("No file uploaded").into());
    };

    info!(
        "Upload stored: {} ({} bytes, original: {})",
        record.filename, record.file_size, record.original_filename
    );

    let names = Addressees::from_optional(form.salesperson_name, form.prospect_name);
    let report = state.workflow.execute(record, &names).await;

    Ok(HttpResponse::Ok().json(UploadResponse::from(report)))
}

async fn read_form(
    payload: &mut Multipart,
    config: &AppConfig,
    form: &mut UploadForm,
) -> Result<(), ApiError> {
    while let Some(field) = payload.next().await {
        let mut field = field?;
        let content_disposition = field.content_disposition();
        let name = content_disposition.get_name().map(str::to_string);
        let filename = content_disposition.get_filename().map(str::to_string);

        match name.as_deref() {
            Some("file") if form.record.is_none() => {
                let original_filename = filename.unwrap_or_default();

                // Reject before anything touches the disk
                intake::validate_extension(&original_filename)?;

                let stored = intake::stored_filename(&original_filename, &chrono::Local::now());
                let file_path = config.get_upload_path(&stored);
                let file_size = intake::save_stream(&mut field, &file_path).await?;

                form.record = Some(UploadRecord {
                    filename: stored,
                    original_filename,
                    file_size,
                    file_path,
                });
            }
            Some("salesperson_name") => form.salesperson_name = Some(read_text(&mut field).await?),
            Some("prospect_name") => form.prospect_name = Some(read_text(&mut field).await?),
            _ => {}
        }
    }

    Ok(())
}

async fn read_text(field: &mut Field) -> Result<String, ApiError> {
    let mut data = Vec::new();
    while let Some(chunk) = field.next().await {
        data.extend_from_slice(&chunk?);
    }
    Ok(String::from_utf8_lossy(&data).into_owned())
}
