use crate::collect::{collect_form, CollectError};
use crate::view::{FormValues, IndexPage};
use askama::Template;
use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use intake_core::{UploadWorkflow, WorkflowError, WorkflowOutcome};
use tower_http::trace::TraceLayer;
use utoipa::{OpenApi, ToSchema};

/// Room left in the request body for the text fields and multipart framing.
const FORM_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Application state shared across handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    workflow: UploadWorkflow,
}

impl AppState {
    pub fn new(workflow: UploadWorkflow) -> Self {
        Self { workflow }
    }

    fn max_upload_bytes(&self) -> usize {
        self.workflow.config().max_upload_bytes()
    }
}

#[derive(Debug, serde::Serialize, serde::Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Multipart fields accepted by `POST /upload`.
#[allow(dead_code)]
#[derive(ToSchema)]
struct UploadFormDoc {
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
    #[schema(example = "main.document_intake.raw_files")]
    volume_path: String,
    document_type: String,
    business_area: String,
    geographic_scope: String,
    data_source: String,
    confidentiality: String,
    description: String,
    time_period: Option<String>,
    /// Comma separated
    tags: Option<String>,
    /// Repeat the field once per category
    content_categories: Option<Vec<String>>,
}

#[derive(OpenApi)]
#[openapi(
    paths(health, upload),
    components(schemas(HealthRes, UploadFormDoc))
)]
struct ApiDoc;

/// Builds the web router.
///
/// The request body limit is the configured upload limit plus room for the text fields.
pub fn router(state: AppState) -> Router {
    let body_limit = state.max_upload_bytes().saturating_add(FORM_OVERHEAD_BYTES);

    Router::new()
        .route("/", get(index))
        .route("/upload", post(upload))
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn render(status: StatusCode, page: IndexPage) -> Response {
    match page.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "failed to render page");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
        }
    }
}

fn status_for(error: &WorkflowError) -> StatusCode {
    match error {
        WorkflowError::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        WorkflowError::Upload(_) => StatusCode::BAD_GATEWAY,
        WorkflowError::MissingFields(_) | WorkflowError::MalformedPath(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
    }
}

#[axum::debug_handler]
async fn index() -> Response {
    render(StatusCode::OK, IndexPage::blank())
}

#[utoipa::path(
    post,
    path = "/upload",
    request_body(content = UploadFormDoc, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Form page confirming the stored path, with a metadata preview"),
        (status = 413, description = "File exceeds the upload limit"),
        (status = 422, description = "Missing required fields or malformed volume path"),
        (status = 502, description = "The storage service rejected the upload")
    )
)]
/// Runs one submission and renders the form page with its outcome.
///
/// The workflow blocks on the storage call, so it runs on the blocking pool.
#[axum::debug_handler]
async fn upload(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    let limit = state.max_upload_bytes();

    let form = match collect_form(&headers, multipart, limit).await {
        Ok(form) => form,
        Err(err) => {
            tracing::warn!(error = %err, "could not collect upload form");
            return render(err.status(), IndexPage::collect_failed(&err));
        }
    };

    let submitted = FormValues::from_form(&form);
    let workflow = state.workflow.clone();

    let outcome = match tokio::task::spawn_blocking(move || workflow.run(form)).await {
        Ok(outcome) => outcome,
        Err(err) => {
            tracing::error!(error = %err, "upload task failed");
            return render(
                StatusCode::INTERNAL_SERVER_ERROR,
                IndexPage::collect_failed(&CollectError::Malformed(
                    "the upload could not be processed".into(),
                )),
            );
        }
    };

    let status = match &outcome {
        WorkflowOutcome::Done(_) => StatusCode::OK,
        WorkflowOutcome::Failed { error, .. } => status_for(error),
    };

    render(status, IndexPage::from_outcome(&outcome, submitted))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for monitoring and load balancers.
#[axum::debug_handler]
async fn health(State(state): State<AppState>) -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: format!(
            "Volume intake is alive (storage: {})",
            state.workflow.backend_name()
        ),
    })
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
