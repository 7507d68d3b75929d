use crate::gallery::{Gallery, GalleryError, LookupError};
use crate::services::observer::TracingObserver;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{info, instrument, warn};

pub const BANNER: &str = "AppGallery Fetcher API Running";

/// One gallery client shared by every request.
#[derive(Clone)]
pub struct AppState {
    gallery: Arc<Gallery>,
}

impl AppState {
    pub fn new(gallery: Gallery) -> Self {
        Self {
            gallery: Arc::new(gallery),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FetchParams {
    #[serde(rename = "appId")]
    app_id: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/fetch", get(fetch_app))
        .with_state(state)
}

async fn home() -> &'static str {
    BANNER
}

fn status_for(err: &LookupError) -> StatusCode {
    match err.error {
        GalleryError::NotFound(_) => StatusCode::NOT_FOUND,
        GalleryError::Upstream(_) | GalleryError::Protocol(_) => StatusCode::BAD_GATEWAY,
    }
}

#[instrument(name = "appgallery.fetch", skip_all, fields(app_id = tracing::field::Empty))]
async fn fetch_app(
    State(state): State<AppState>,
    Query(params): Query<FetchParams>,
) -> (StatusCode, Json<Value>) {
    let Some(app_id) = params
        .app_id
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
    else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Missing appId"})),
        );
    };
    tracing::Span::current().record("app_id", app_id.as_str());

    // The gallery client is blocking.
    let gallery = Arc::clone(&state.gallery);
    let lookup =
        tokio::task::spawn_blocking(move || gallery.fetch_single_app(&app_id, &TracingObserver))
            .await;

    match lookup {
        Ok(Ok(record)) => match serde_json::to_value(&record) {
            Ok(v) => (StatusCode::OK, Json(v)),
            Err(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": e.to_string()})),
            ),
        },
        Ok(Err(err)) => (
            status_for(&err),
            Json(json!({"error": err.to_string(), "kind": err.kind()})),
        ),
        Err(e) => {
            warn!(error = %e, "lookup task failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": e.to_string()})),
            )
        }
    }
}

/// `gallery` must be built before entering the runtime.
pub async fn serve(bind: &str, gallery: Gallery) -> anyhow::Result<()> {
    let app = router(AppState::new(gallery));
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!(addr = %listener.local_addr()?, "AppGallery fetcher listening");
    axum::serve(listener, app).await?;
    Ok(())
}
