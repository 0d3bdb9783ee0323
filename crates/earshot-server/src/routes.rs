//! HTTP routes and handlers
//!
//! `GET /health` is constant and never touches the models. The classify
//! endpoints decode the raw body, take an inference permit, and run the
//! blocking classify call on the blocking thread pool so a slow model never
//! stalls request acceptance.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use earshot_core::{pcm, Classification, ModelError};

use crate::state::AppContext;

/// Build the service router. Classifier endpoints are registered only when
/// the matching classifier is configured.
pub fn router(ctx: Arc<AppContext>) -> Router {
    let mut app: Router<Arc<AppContext>> = Router::new().route("/health", get(handle_health));
    if ctx.emotion.is_some() {
        app = app.route("/emotion", post(handle_emotion));
    }
    if ctx.scene.is_some() {
        app = app.route("/scene", post(handle_scene));
    }
    app.with_state(ctx)
}

async fn handle_health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

async fn handle_emotion(State(ctx): State<Arc<AppContext>>, body: Bytes) -> Response {
    let Some(classifier) = ctx.emotion.clone() else {
        return StatusCode::NOT_FOUND.into_response();
    };
    run_classify(ctx, body, move |samples| classifier.classify(samples)).await
}

async fn handle_scene(State(ctx): State<Arc<AppContext>>, body: Bytes) -> Response {
    let Some(classifier) = ctx.scene.clone() else {
        return StatusCode::NOT_FOUND.into_response();
    };
    run_classify(ctx, body, move |samples| classifier.classify(samples)).await
}

/// Decode the body and run the blocking classify call off the request loop,
/// holding an inference permit for the duration.
async fn run_classify<F>(ctx: Arc<AppContext>, body: Bytes, classify: F) -> Response
where
    F: FnOnce(&[f32]) -> Result<Classification, ModelError> + Send + 'static,
{
    let samples = pcm::decode_f32le(&body);

    let _permit = match ctx.inference_permits.clone().acquire_owned().await {
        Ok(permit) => permit,
        Err(_) => {
            return (StatusCode::INTERNAL_SERVER_ERROR, "inference pool closed").into_response()
        }
    };

    match tokio::task::spawn_blocking(move || classify(&samples)).await {
        Ok(Ok(result)) => Json(result).into_response(),
        Ok(Err(e)) => {
            log::error!("classification failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
        Err(e) => {
            log::error!("inference task failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "inference task failed").into_response()
        }
    }
}
