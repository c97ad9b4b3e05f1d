//! Handlers for the upload form.

use std::sync::Arc;

use axum::{
    extract::Multipart,
    response::Html,
    Extension, Json,
};
use handlebars::Handlebars;
use http::StatusCode;
use log::{error, info, warn};
use once_cell::sync::Lazy;
use serde_json::json;
use uuid::Uuid;

use crate::backend::models::AppState;
use crate::utils::error_messages::UPLOAD_FAILED;
use crate::utils::validation::{BoundForm, FormValue, UploadedFile};

// Handlebars registry holding the page templates
static HBS: Lazy<Handlebars> = Lazy::new(|| {
    let mut hbs = Handlebars::new();
    hbs.register_template_string("upload", include_str!("../../templates/upload.hbs"))
        .expect("Could not register upload template");
    hbs
});

/// Renders the upload form, each field carrying its client validation attributes
pub async fn upload_page(
    Extension(state): Extension<Arc<AppState>>,
) -> axum::response::Result<Html<String>> {
    let fields = state
        .schema
        .fields()
        .map(|field| state.schema.client_context(field))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            error!("Failed to describe form fields: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, UPLOAD_FAILED)
        })?;

    HBS.render("upload", &json!({ "fields": fields }))
        .map(Html)
        .map_err(|_| (StatusCode::INTERNAL_SERVER_ERROR, UPLOAD_FAILED).into())
}

/// Validates a multipart submission and stores its files
pub async fn upload(
    Extension(state): Extension<Arc<AppState>>,
    mut multipart: Multipart,
) -> axum::response::Result<Json<serde_json::Value>> {
    let form = bind_form(&mut multipart).await?;

    if let Err(errors) = state.schema.validate(&form) {
        warn!("Rejected upload with {} invalid field(s)", errors.len());
        return Err((StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into());
    }

    tokio::fs::create_dir_all(&state.uploads_dir)
        .await
        .map_err(|e| {
            error!("Failed to create {}: {}", state.uploads_dir.display(), e);
            (StatusCode::INTERNAL_SERVER_ERROR, UPLOAD_FAILED)
        })?;

    // Only files of declared fields went through a rule
    let declared_files = form
        .iter()
        .filter(|(field, _)| state.schema.rules_for(field).is_some())
        .filter_map(|(_, value)| value.as_file());

    let mut stored = Vec::new();
    for file in declared_files {
        // Prefix with a UUID to prevent collisions
        let path = state
            .uploads_dir
            .join(format!("{}-{}", Uuid::new_v4(), file.stored_file_name()));

        tokio::fs::write(&path, file.content()).await.map_err(|e| {
            error!("Failed to write {}: {}", path.display(), e);
            (StatusCode::INTERNAL_SERVER_ERROR, UPLOAD_FAILED)
        })?;

        info!("Stored upload {} ({} bytes)", path.display(), file.content().len());
        stored.push(path.display().to_string());
    }

    Ok(Json(json!({ "stored": stored })))
}

/// Binds the parts of a multipart request to form values.
/// Parts with a file name become files, the others text. When a field name is
/// repeated only its first part is bound.
async fn bind_form(multipart: &mut Multipart) -> Result<BoundForm, (StatusCode, &'static str)> {
    let mut form = BoundForm::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| (StatusCode::BAD_REQUEST, UPLOAD_FAILED))?
    {
        let name = field
            .name()
            .ok_or((StatusCode::BAD_REQUEST, UPLOAD_FAILED))?
            .to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);

        let value = match file_name {
            // Browsers send an empty part when no file was chosen
            Some(file_name) if file_name.is_empty() => continue,
            Some(file_name) => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|_| (StatusCode::BAD_REQUEST, UPLOAD_FAILED))?;
                let mut file = UploadedFile::new(file_name, bytes.to_vec());
                if let Some(content_type) = content_type {
                    file = file.with_content_type(content_type);
                }
                FormValue::File(file)
            }
            None => FormValue::Text(
                field
                    .text()
                    .await
                    .map_err(|_| (StatusCode::BAD_REQUEST, UPLOAD_FAILED))?,
            ),
        };

        form.entry(name).or_insert(value);
    }

    Ok(form)
}
