//! HTTP handlers for Video Service
//!
//! Request bodies are parsed into the raw request types from `video_core`,
//! validated, and only then applied to the store.

use actix_web::{error::JsonPayloadError, web, HttpRequest, HttpResponse};
use video_core::{validate_create, validate_update, CreateVideoRequest, UpdateVideoRequest};

use crate::error::{AppError, Result};
use crate::state::AppState;

const GREETING: &str = "Hello incubator. I could make it";

/// Path ids that are not a valid `u64` can never match a record.
fn parse_video_id(raw: &str) -> Result<u64> {
    raw.parse::<u64>().map_err(|_| AppError::not_found())
}

pub async fn greeting() -> HttpResponse {
    HttpResponse::Ok().content_type("text/plain; charset=utf-8").body(GREETING)
}

/// List all videos
pub async fn list_videos(state: web::Data<AppState>) -> Result<HttpResponse> {
    let videos = state.store.read().await.list();
    tracing::debug!(count = videos.len(), "Listing videos");
    Ok(HttpResponse::Ok().json(videos))
}

/// Create a new video
pub async fn create_video(
    state: web::Data<AppState>,
    payload: web::Json<CreateVideoRequest>,
) -> Result<HttpResponse> {
    let fields = validate_create(&payload).map_err(|errors| {
        tracing::warn!(errors = errors.len(), "Rejected video create");
        AppError::from(errors)
    })?;

    let video = state.store.write().await.insert(fields);
    Ok(HttpResponse::Created().json(video))
}

/// Get a single video
pub async fn get_video(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse> {
    let video_id = parse_video_id(&path)?;
    tracing::debug!(video_id, "Getting video");

    let video = state.store.read().await.get(video_id)?;
    Ok(HttpResponse::Ok().json(video))
}

/// Replace a video. A missing id wins over an invalid body.
pub async fn update_video(
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<UpdateVideoRequest>,
) -> Result<HttpResponse> {
    let video_id = parse_video_id(&path)?;
    state.store.read().await.get(video_id)?;

    let fields = validate_update(&payload).map_err(|errors| {
        tracing::warn!(video_id, errors = errors.len(), "Rejected video update");
        AppError::from(errors)
    })?;

    state.store.write().await.replace(video_id, fields)?;
    Ok(HttpResponse::NoContent().finish())
}

/// Delete a video
pub async fn delete_video(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let video_id = parse_video_id(&path)?;
    state.store.write().await.delete(video_id)?;
    Ok(HttpResponse::NoContent().finish())
}

/// Drop every video. Used by test harnesses between runs.
pub async fn delete_all_data(state: web::Data<AppState>) -> HttpResponse {
    state.store.write().await.clear();
    HttpResponse::NoContent().finish()
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::warn!(error = %err, "Rejected request body");
    AppError::BadRequest(err.to_string()).into()
}

/// Configure routes for video service
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .route("/", web::get().to(greeting))
        .route("/health", web::get().to(|| async { "OK" }))
        .service(
            web::scope("/videos")
                .service(
                    web::resource("")
                        .route(web::get().to(list_videos))
                        .route(web::post().to(create_video)),
                )
                .service(
                    web::resource("/{video_id}")
                        .route(web::get().to(get_video))
                        .route(web::put().to(update_video))
                        .route(web::delete().to(delete_video)),
                ),
        )
        .route("/testing/all-data", web::delete().to(delete_all_data));
}
