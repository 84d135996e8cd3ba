// The HTTP classification service.

use axum::body::Bytes;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{DefaultBodyLimit, Multipart};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::tally::{config_reader::ServiceConfig, *};

/// The multipart field that carries the spreadsheet.
pub const UPLOAD_FIELD: &str = "file";

pub const NO_FILE_MESSAGE: &str = "no file received";

pub fn build_router(config: &ServiceConfig) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/procesar", post(procesar))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
}

pub async fn serve(config: &ServiceConfig) -> TallyResult<()> {
    let app = build_router(config);
    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .context(ServingSnafu { bind: &config.bind })?;
    info!(
        "vote tally server listening on {} (max upload {} bytes)",
        config.bind, config.max_upload_bytes
    );
    axum::serve(listener, app)
        .await
        .context(ServingSnafu { bind: &config.bind })
}

async fn home() -> &'static str {
    "The vote tally server is running."
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

async fn procesar(multipart: Result<Multipart, MultipartRejection>) -> Response {
    let mut multipart = match multipart {
        Ok(m) => m,
        Err(e) => {
            warn!("procesar: not a multipart request: {}", e);
            return error_response(StatusCode::BAD_REQUEST, json!({ "error": NO_FILE_MESSAGE }));
        }
    };
    let upload = match read_upload(&mut multipart).await {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            return error_response(StatusCode::BAD_REQUEST, json!({ "error": NO_FILE_MESSAGE }));
        }
        Err(e) => {
            warn!("procesar: could not read the upload: {}", e);
            return error_response(
                e.status(),
                json!({ "error": format!("{}: {}", PARSE_ERROR_PREFIX, e.body_text()) }),
            );
        }
    };

    // Parsing a workbook is CPU bound.
    let classified = tokio::task::spawn_blocking(move || {
        classify_upload(&upload).map_err(|e| {
            warn!("procesar: {}", e);
            error_payload(&e)
        })
    })
    .await;

    match classified {
        Ok(Ok(c)) => (StatusCode::OK, Json(counts_to_json(&c.counts))).into_response(),
        Ok(Err(payload)) => error_response(StatusCode::BAD_REQUEST, payload),
        Err(e) => {
            warn!("procesar: the classification task failed: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "the upload could not be processed" }),
            )
        }
    }
}

async fn read_upload(multipart: &mut Multipart) -> Result<Option<Bytes>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            debug!("read_upload: skipping field {:?}", field.name());
            continue;
        }
        let file_name = field.file_name().map(|s| s.to_string());
        let bytes = field.bytes().await?;
        info!(
            "Received file {:?} ({} bytes)",
            file_name.unwrap_or_default(),
            bytes.len()
        );
        return Ok(Some(bytes));
    }
    Ok(None)
}

/// Parses an uploaded workbook and classifies it.
pub fn classify_upload(bytes: &[u8]) -> TallyResult<Classification> {
    let table = io_excel::read_excel_bytes(bytes)?;
    classify_table(&table).context(MissingVoteColumnSnafu {})
}

/// The JSON body sent back for a failed classification.
pub fn error_payload(e: &TallyError) -> JSValue {
    match e {
        TallyError::MissingVoteColumn { source } => json!({
            "error": e.user_message(),
            "columns": source.columns(),
            "hint": ClassifyError::REMEDIATION_HINT,
        }),
        _ => json!({ "error": e.user_message() }),
    }
}

fn error_response(status: StatusCode, payload: JSValue) -> Response {
    (status, Json(payload)).into_response()
}
