//! Paginated lyric text endpoint

use axum::{
    extract::State,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use tracing::{debug, info, warn};

use super::params::{parse_song_id, QueryParams};
use super::songs::load_song;
use crate::error::ApiResult;
use crate::lyrics::{lenient_positive, paginate_text, DEFAULT_PAGE, DEFAULT_VERSES_PER_PAGE};
use crate::AppState;

/// Lyric page response
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SongTextResponse {
    pub song: String,
    pub group: String,
    pub verses: Vec<String>,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
}

/// GET /api/GetSongText?songId=&page=&limit=
///
/// `page` and `limit` fall back to 1 and 2 when missing or unusable.
#[utoipa::path(
    get,
    path = "/api/GetSongText",
    tag = "Songs",
    params(
        ("songId" = i64, Query, description = "Id of the song"),
        ("page" = Option<i64>, Query, description = "Verse page, defaults to 1"),
        ("limit" = Option<i64>, Query, description = "Verses per page, defaults to 2"),
    ),
    responses(
        (status = 200, description = "One page of verses", body = SongTextResponse),
        (status = 400, description = "Missing or invalid songId"),
        (status = 404, description = "Song not found or page out of range"),
        (status = 405, description = "Method not allowed"),
        (status = 500, description = "Store failure"),
    )
)]
pub async fn get_song_text(
    State(state): State<AppState>,
    query: QueryParams,
) -> ApiResult<Json<SongTextResponse>> {
    info!("<GetSongText> endpoint");

    let id = parse_song_id(query.get("songId"))?;
    let page = lenient_positive(query.get("page"), DEFAULT_PAGE);
    let per_page = lenient_positive(query.get("limit"), DEFAULT_VERSES_PER_PAGE);
    debug!("songId: {}, page: {}, limit: {}", id, page, per_page);

    let song = load_song(&state, id).await?;

    let window = paginate_text(&song.text, page, per_page).map_err(|e| {
        warn!("{}", e);
        e
    })?;

    info!(
        "Returning {} of {} verses from page {} of song {}",
        window.verses.len(),
        window.total,
        window.page,
        id
    );

    Ok(Json(SongTextResponse {
        song: song.title,
        group: song.group,
        verses: window.verses,
        page: window.page,
        per_page: window.per_page,
        total: window.total,
    }))
}
