//! Route handlers.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::exif::ExifExtractor;
use crate::lookup::{dispatch, LookupInput, LookupResponse, LookupResult, Operation, MAX_INPUT_CHARS};
use crate::templates::{TemplateStore, INDEX, SCRIPT, STYLESHEET};
use crate::words::WordSource;

/// Multipart field carrying the image for `/exifUpload`.
pub const EXIF_FIELD: &str = "exifFile";

const UPLOAD_FAILED: &str = "Unable to process upload";

/// Shared state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub templates: TemplateStore,
    pub words: Arc<dyn WordSource>,
    pub exif: Option<Arc<dyn ExifExtractor>>,
}

pub async fn index(State(state): State<AppState>) -> Response {
    render(&state, INDEX, "text/html; charset=utf-8")
}

pub async fn stylesheet(State(state): State<AppState>) -> Response {
    render(&state, STYLESHEET, "text/css; charset=utf-8")
}

pub async fn script(State(state): State<AppState>) -> Response {
    render(&state, SCRIPT, "application/javascript; charset=utf-8")
}

pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

fn render(state: &AppState, name: &str, content_type: &'static str) -> Response {
    // One snapshot for the whole render; a concurrent reload cannot mix sets.
    let templates = state.templates.current();
    match templates.render(name, &json!({ "max_input": MAX_INPUT_CHARS })) {
        Ok(body) => ([(header::CONTENT_TYPE, content_type)], body).into_response(),
        Err(e) => {
            tracing::error!(template = name, error = %e, "Template render failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn anagram(
    State(state): State<AppState>,
    LookupInput(input): LookupInput,
) -> LookupResponse {
    dispatch(Operation::Anagram, input, state.words).await
}

pub async fn pattern_match(
    State(state): State<AppState>,
    LookupInput(input): LookupInput,
) -> LookupResponse {
    dispatch(Operation::Match, input, state.words).await
}

pub async fn exif_upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let Some(extractor) = state.exif else {
        tracing::error!("Upload received but no metadata service is configured");
        return upload_failed();
    };

    let image = match multipart {
        Ok(mut multipart) => read_field(&mut multipart, EXIF_FIELD).await,
        Err(rejection) => {
            tracing::error!(error = %rejection, "Upload is not multipart");
            return upload_failed();
        }
    };
    // The multipart stream is dropped above on every path.

    let image = match image {
        Ok(Some(image)) => image,
        Ok(None) => {
            tracing::error!(field = EXIF_FIELD, "Upload is missing its file field");
            return upload_failed();
        }
        Err(e) => {
            tracing::error!(error = %e, "Unable to read upload");
            return upload_failed();
        }
    };

    match extractor.extract(image).await {
        Ok(outcome) => (outcome.status, Json(outcome.body)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Metadata extraction failed");
            upload_failed()
        }
    }
}

async fn read_field(multipart: &mut Multipart, name: &str) -> Result<Option<Bytes>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(name) {
            return field.bytes().await.map(Some);
        }
    }
    Ok(None)
}

fn upload_failed() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(LookupResult::failure(UPLOAD_FAILED)),
    )
        .into_response()
}
