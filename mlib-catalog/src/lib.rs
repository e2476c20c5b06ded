//! mlib-catalog library - Song catalog service
//!
//! Lists, creates, edits and deletes songs, and serves their lyrics one
//! page of verses at a time. New songs are enriched from an external
//! metadata service.

use std::sync::Arc;

use axum::Router;
use mlib_common::{Song, SongStore};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod api;
pub mod edit;
pub mod enrichment;
pub mod error;
pub mod lyrics;
pub mod pagination;

pub use crate::enrichment::{HttpEnricher, MetadataEnricher};
pub use crate::error::{ApiError, ApiResult};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Song persistence
    pub store: Arc<dyn SongStore>,
    /// Metadata lookup for new songs
    pub enricher: Arc<dyn MetadataEnricher>,
    /// Songs per catalog page
    pub page_size: usize,
}

impl AppState {
    /// Create new application state with the default page size
    pub fn new(store: Arc<dyn SongStore>, enricher: Arc<dyn MetadataEnricher>) -> Self {
        Self {
            store,
            enricher,
            page_size: pagination::PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }
}

/// OpenAPI document assembled from the handler annotations
#[derive(OpenApi)]
#[openapi(
    info(
        title = "mlib-catalog",
        description = "Song catalog with metadata enrichment and paginated lyrics"
    ),
    paths(
        api::songs::list_songs,
        api::songs::add_song,
        api::songs::delete_song,
        api::songs::edit_song,
        api::text::get_song_text,
        api::health::health_check,
    ),
    components(schemas(
        Song,
        api::songs::NewSongRequest,
        api::songs::EditSongBody,
        api::text::SongTextResponse,
        api::health::HealthResponse,
    )),
    tags(
        (name = "Songs", description = "Song catalog"),
        (name = "System", description = "Service status"),
    )
)]
pub struct ApiDoc;

/// Path of the generated OpenAPI document
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Build application router
///
/// Paths keep the names used by existing clients. Requests with the wrong
/// method get 405 from the method router. Swagger UI is served under
/// `/swagger/`.
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{delete, get, post, put};

    Router::new()
        .route("/api/getSongs", get(api::list_songs))
        .route("/api/AddSong", post(api::add_song))
        .route("/api/deleteSong", delete(api::delete_song))
        .route("/api/EditSong", put(api::edit_song))
        .route("/api/GetSongText", get(api::get_song_text))
        .merge(api::health_routes())
        .merge(SwaggerUi::new("/swagger").url(OPENAPI_JSON_PATH, ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
