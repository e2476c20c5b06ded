//! Catalog endpoints: list, add, delete and edit songs

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    Json,
};
use mlib_common::{time, Song, SongDraft};
use serde::Deserialize;
use tracing::{debug, error, info, warn};
use utoipa::ToSchema;

use super::params::{parse_song_id, QueryParams};
use crate::edit::{parse_field_list, SongPatch};
use crate::error::{ApiError, ApiResult};
use crate::pagination::{parse_page, query_catalog, SongFilter};
use crate::AppState;

/// Body of an add request
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct NewSongRequest {
    #[serde(default)]
    #[schema(example = "Muse")]
    pub group: String,
    #[serde(default)]
    #[schema(example = "Supermassive Black Hole")]
    pub song: String,
}

/// Body of an edit request
///
/// Only the keys named in `paramsToEdit` are read; a named key that is
/// absent counts as an empty string.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditSongBody {
    pub group: Option<String>,
    pub song: Option<String>,
    /// `YYYY-MM-DD`
    #[schema(example = "2006-07-16")]
    pub release_date: Option<String>,
    pub text: Option<String>,
    pub link: Option<String>,
}

/// Fetch a song or fail with 404
pub(crate) async fn load_song(state: &AppState, id: i64) -> ApiResult<Song> {
    state.store.find_by_id(id).await?.ok_or_else(|| {
        warn!("Song with id {} not found", id);
        ApiError::NotFound("Song not found".to_string())
    })
}

/// GET /api/getSongs?group=&song=&page=
///
/// Returns one page of the filtered catalog as a JSON array.
#[utoipa::path(
    get,
    path = "/api/getSongs",
    tag = "Songs",
    params(
        ("group" = Option<String>, Query, description = "Case-insensitive group substring"),
        ("song" = Option<String>, Query, description = "Case-insensitive title substring"),
        ("page" = Option<i64>, Query, description = "Page number, starting at 1"),
    ),
    responses(
        (status = 200, description = "One page of songs", body = [Song]),
        (status = 400, description = "Invalid page parameter or page out of range"),
        (status = 405, description = "Method not allowed"),
        (status = 500, description = "Store failure"),
    )
)]
pub async fn list_songs(
    State(state): State<AppState>,
    query: QueryParams,
) -> ApiResult<Json<Vec<Song>>> {
    info!("<GetSongs> endpoint");

    let page = parse_page(query.get("page")).map_err(|e| {
        warn!("{}", e);
        e
    })?;
    debug!("Page parameter is set to {}", page);

    let songs = state.store.find_all().await.map_err(|e| {
        error!("Failed to load songs from the store: {}", e);
        e
    })?;
    info!("Loaded {} songs from the store", songs.len());

    let filter = SongFilter::new(query.get("group"), query.get("song"));
    let result = query_catalog(songs, &filter, page, state.page_size).map_err(|e| {
        warn!("{}", e);
        e
    })?;

    Ok(Json(result.songs))
}

/// POST /api/AddSong
///
/// Looks up the song's metadata and stores the enriched record.
#[utoipa::path(
    post,
    path = "/api/AddSong",
    tag = "Songs",
    request_body = NewSongRequest,
    responses(
        (status = 201, description = "Song added", body = Song),
        (status = 400, description = "Invalid JSON"),
        (status = 404, description = "Song info not found by the enrichment service"),
        (status = 405, description = "Method not allowed"),
        (status = 500, description = "Enrichment or store failure"),
    )
)]
pub async fn add_song(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<Song>)> {
    info!("<AddSong> endpoint");

    let request: NewSongRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!("Failed to decode JSON body: {}", e);
        ApiError::BadRequest("Invalid JSON".to_string())
    })?;
    debug!("Incoming request: group={:?} song={:?}", request.group, request.song);

    let details = state
        .enricher
        .lookup(&request.group, &request.song)
        .await
        .map_err(|e| {
            error!("Enrichment lookup failed for {:?} / {:?}: {}", request.group, request.song, e);
            e
        })?;

    let draft = SongDraft {
        group: request.group,
        title: request.song,
        release_date: details.release_date,
        text: details.text,
        link: details.link,
    };

    let song = state.store.insert(draft).await.map_err(|e| {
        error!("Failed to save song: {}", e);
        e
    })?;

    info!("Song {} added: {} - {}", song.id, song.group, song.title);
    Ok((StatusCode::CREATED, Json(song)))
}

/// DELETE /api/deleteSong?songId=
///
/// Returns the deleted record.
#[utoipa::path(
    delete,
    path = "/api/deleteSong",
    tag = "Songs",
    params(("songId" = i64, Query, description = "Id of the song to delete")),
    responses(
        (status = 200, description = "Song deleted", body = Song),
        (status = 400, description = "Missing or invalid songId"),
        (status = 404, description = "Song not found"),
        (status = 405, description = "Method not allowed"),
        (status = 500, description = "Store failure"),
    )
)]
pub async fn delete_song(
    State(state): State<AppState>,
    query: QueryParams,
) -> ApiResult<Json<Song>> {
    info!("<DeleteSong> endpoint");

    let id = parse_song_id(query.get("songId"))?;
    let song = load_song(&state, id).await?;

    state.store.delete(&song).await.map_err(|e| {
        error!("Failed to delete song with id {}: {}", id, e);
        e
    })?;

    info!("Song with id {} deleted", id);
    Ok(Json(song))
}

/// PUT /api/EditSong?songId=&paramsToEdit=group,releaseDate
///
/// Body: flat JSON object of string values keyed by field name. Unknown
/// field names are ignored; the record is written once, after every
/// requested field has been validated.
#[utoipa::path(
    put,
    path = "/api/EditSong",
    tag = "Songs",
    params(
        ("songId" = i64, Query, description = "Id of the song to edit"),
        ("paramsToEdit" = String, Query, description = "Comma-separated fields to change, e.g. group,song,releaseDate"),
    ),
    request_body = EditSongBody,
    responses(
        (status = 200, description = "Song updated", body = Song),
        (status = 400, description = "Invalid songId, paramsToEdit, body or releaseDate"),
        (status = 404, description = "Song not found"),
        (status = 405, description = "Method not allowed"),
        (status = 500, description = "Store failure"),
    )
)]
pub async fn edit_song(
    State(state): State<AppState>,
    query: QueryParams,
    body: Bytes,
) -> ApiResult<Json<Song>> {
    info!("<EditSong> endpoint");

    let id = parse_song_id(query.get("songId"))?;
    let song = load_song(&state, id).await?;

    let fields = parse_field_list(query.get("paramsToEdit")).map_err(|e| {
        warn!("{}", e);
        e
    })?;
    debug!("Fields to edit: {:?}", fields);

    let payload: HashMap<String, String> = serde_json::from_slice(&body).map_err(|e| {
        warn!("Invalid JSON body: {}", e);
        ApiError::BadRequest("Invalid JSON body".to_string())
    })?;

    let patch = SongPatch::from_payload(&fields, &payload).map_err(|e| {
        warn!("{}", e);
        e
    })?;
    if patch.is_empty() {
        debug!("No recognized fields in {:?}; only updatedAt changes", fields);
    }

    let updated = patch.apply(&song, time::now());

    state.store.update(&updated).await.map_err(|e| {
        error!("Failed to update song with id {}: {}", id, e);
        e
    })?;

    info!("Song with id {} updated", id);
    Ok(Json(updated))
}
