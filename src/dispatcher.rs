//! Tool dispatcher: one tool call, one Jellyfin request, one compact result
//!
//! Every tool validates the configuration before touching the backend. Errors
//! never escape [`JellyfinTools::call_tool`]; they are turned into
//! `{"error": "..."}` so the assistant always receives a JSON object.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use crate::backend::Backend;
use crate::config::JellyfinConfig;
use crate::error::{JellyfinError, Result};
use crate::projection::Projection;
use crate::types::*;

/// Tool names as advertised over MCP
pub mod names {
    pub const SEARCH_MEDIA: &str = "search_media";
    pub const LIST_ALBUMS: &str = "list_albums";
    pub const LIST_ARTISTS: &str = "list_artists";
    pub const GET_ALBUM_TRACKS: &str = "get_album_tracks";
    pub const GET_ARTIST_ALBUMS: &str = "get_artist_albums";
    pub const LIST_GENRES: &str = "list_genres";
    pub const GET_RECENT: &str = "get_recent";
    pub const GET_FAVORITES: &str = "get_favorites";
    pub const GET_PLAYLISTS: &str = "get_playlists";
    pub const LIST_MOVIES: &str = "list_movies";
    pub const LIST_SERIES: &str = "list_series";
    pub const GET_STREAM_URL: &str = "get_stream_url";
    pub const LIBRARY_STATS: &str = "library_stats";
}

/// Default and upper bound for a tool's `limit` argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitRange {
    default: i64,
    max: i64,
}

impl LimitRange {
    /// Both bounds are raised to at least 1
    pub const fn new(default: i64, max: i64) -> Self {
        let max = if max < 1 { 1 } else { max };
        let default = if default < 1 { 1 } else if default > max { max } else { default };
        Self { default, max }
    }

    pub fn default_limit(&self) -> i64 {
        self.default
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    /// Clamp a requested limit into `1..=max`
    pub fn clamp(&self, requested: Option<i64>) -> usize {
        requested.unwrap_or(self.default).clamp(1, self.max) as usize
    }
}

pub const SEARCH_LIMIT: LimitRange = LimitRange::new(20, 50);
pub const ALBUMS_LIMIT: LimitRange = LimitRange::new(50, 100);
pub const ARTISTS_LIMIT: LimitRange = LimitRange::new(50, 200);
pub const GENRES_LIMIT: LimitRange = LimitRange::new(50, 100);
pub const RECENT_LIMIT: LimitRange = LimitRange::new(20, 50);
pub const FAVORITES_LIMIT: LimitRange = LimitRange::new(50, 100);
pub const PLAYLISTS_LIMIT: LimitRange = LimitRange::new(30, 100);
pub const VIDEOS_LIMIT: LimitRange = LimitRange::new(50, 100);

pub const ALBUM_SORTS: &[SortKey] = &[SortKey::Name, SortKey::Added, SortKey::Year, SortKey::Random];
pub const VIDEO_SORTS: &[SortKey] = &[
    SortKey::Name,
    SortKey::Added,
    SortKey::Year,
    SortKey::Rating,
    SortKey::Random,
];

pub const RECENT_TYPES: &[ItemType] = &[
    ItemType::MusicAlbum,
    ItemType::Audio,
    ItemType::Movie,
    ItemType::Series,
];

/// The Jellyfin tool set
pub struct JellyfinTools<B: Backend> {
    config: JellyfinConfig,
    backend: B,
}

impl<B: Backend> JellyfinTools<B> {
    pub fn new(config: JellyfinConfig, backend: B) -> Self {
        Self { config, backend }
    }

    pub fn config(&self) -> &JellyfinConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Dispatch a tool call by name; the result is always a JSON object
    pub fn call_tool(&self, name: &str, params: Value) -> Value {
        tracing::debug!(tool = name, "Tool call");

        let result = match name {
            names::SEARCH_MEDIA => self.run(params, Self::search_media),
            names::LIST_ALBUMS => self.run(params, Self::list_albums),
            names::LIST_ARTISTS => self.run(params, Self::list_artists),
            names::GET_ALBUM_TRACKS => {
                self.run(params, |t, i: AlbumIdInput| t.get_album_tracks(&i.album_id))
            }
            names::GET_ARTIST_ALBUMS => {
                self.run(params, |t, i: ArtistIdInput| t.get_artist_albums(&i.artist_id))
            }
            names::LIST_GENRES => self.run(params, Self::list_genres),
            names::GET_RECENT => self.run(params, Self::get_recent),
            names::GET_FAVORITES => self.run(params, Self::get_favorites),
            names::GET_PLAYLISTS => self.run(params, Self::get_playlists),
            names::LIST_MOVIES => self.run(params, Self::list_movies),
            names::LIST_SERIES => self.run(params, Self::list_series),
            names::GET_STREAM_URL => {
                self.run(params, |t, i: ItemIdInput| t.get_stream_url(&i.item_id))
            }
            names::LIBRARY_STATS => self.run(params, |t, _: Value| t.library_stats()),
            _ => Err(JellyfinError::InvalidInput(format!("Unknown tool: {}", name))),
        };

        match result {
            Ok(value) => value,
            Err(e) => {
                if e.is_backend() {
                    tracing::warn!(tool = name, error = %e, "Tool call failed");
                } else {
                    tracing::debug!(tool = name, error = %e, "Tool call rejected");
                }
                json!({"error": e.to_string()})
            }
        }
    }

    fn run<I, O, F>(&self, params: Value, tool: F) -> Result<Value>
    where
        I: DeserializeOwned,
        O: Serialize,
        F: FnOnce(&Self, I) -> Result<O>,
    {
        let params = if params.is_null() { json!({}) } else { params };
        let input: I = serde_json::from_value(params)
            .map_err(|e| JellyfinError::InvalidInput(e.to_string()))?;
        let output = tool(self, input)?;
        Ok(serde_json::to_value(output)?)
    }

    fn user_items_path(&self) -> String {
        format!("/Users/{}/Items", self.config.user_id)
    }

    fn fetch_list(
        &self,
        path: &str,
        query: &[(&str, String)],
        projection: Projection,
        limit: usize,
    ) -> Result<ItemList> {
        let value = self.backend.get(path, query)?;
        let response: RawItemsResponse = serde_json::from_value(value)?;
        Ok(self.project_list(response.items, response.total_record_count, projection, limit))
    }

    fn project_list(
        &self,
        raw_items: Vec<RawItem>,
        total: Option<i64>,
        projection: Projection,
        limit: usize,
    ) -> ItemList {
        let total = total.unwrap_or(raw_items.len() as i64);
        let items = raw_items
            .iter()
            .take(limit)
            .map(|raw| projection.apply(raw, &self.config))
            .collect();
        ItemList { total, items }
    }

    // ========================================================================
    // Music
    // ========================================================================

    /// Full-text search filtered by item type
    pub fn search_media(&self, input: SearchMediaInput) -> Result<ItemList> {
        self.config.validate()?;

        let query = input.query.trim();
        if query.is_empty() {
            return Err(JellyfinError::InvalidInput(
                "query must not be empty".to_string(),
            ));
        }
        let item_type = match non_blank(&input.item_type) {
            Some(t) => t.parse::<ItemType>()?,
            None => ItemType::Audio,
        };
        let limit = SEARCH_LIMIT.clamp(input.limit);
        let projection = Projection::for_search(item_type);

        self.fetch_list(
            "/Items",
            &[
                ("searchTerm", query.to_string()),
                ("IncludeItemTypes", item_type.to_string()),
                ("Recursive", "true".to_string()),
                ("Limit", limit.to_string()),
                ("Fields", projection.query_fields()),
            ],
            projection,
            limit,
        )
    }

    /// Music albums, optionally filtered by artist and genre
    pub fn list_albums(&self, input: ListAlbumsInput) -> Result<ItemList> {
        self.config.validate()?;

        let sort = match non_blank(&input.sort) {
            Some(s) => SortKey::parse_allowed(s, ALBUM_SORTS)?,
            None => SortKey::Name,
        };
        let limit = ALBUMS_LIMIT.clamp(input.limit);
        let projection = Projection::Album;

        let mut query = vec![
            ("IncludeItemTypes", "MusicAlbum".to_string()),
            ("Recursive", "true".to_string()),
            ("Limit", limit.to_string()),
            ("SortBy", sort.sort_by().to_string()),
            ("SortOrder", sort.sort_order().to_string()),
            ("Fields", projection.query_fields()),
        ];
        if let Some(artist) = non_blank(&input.artist) {
            query.push(("Artists", artist.to_string()));
        }
        if let Some(genre) = non_blank(&input.genre) {
            query.push(("Genres", genre.to_string()));
        }

        self.fetch_list(&self.user_items_path(), &query, projection, limit)
    }

    pub fn list_artists(&self, input: LimitInput) -> Result<ItemList> {
        self.config.validate()?;

        let limit = ARTISTS_LIMIT.clamp(input.limit);
        let projection = Projection::Artist;
        self.fetch_list(
            "/Artists",
            &[
                ("Limit", limit.to_string()),
                ("Fields", projection.query_fields()),
            ],
            projection,
            limit,
        )
    }

    /// Tracks of an album in track order; an unknown album is an empty list
    pub fn get_album_tracks(&self, album_id: &str) -> Result<ItemList> {
        self.config.validate()?;

        let album_id = validate_id("album_id", album_id)?;
        let projection = Projection::AlbumTrack;
        let result = self.fetch_list(
            &self.user_items_path(),
            &[
                ("ParentId", album_id.to_string()),
                ("IncludeItemTypes", "Audio".to_string()),
                ("SortBy", "IndexNumber".to_string()),
                ("Fields", projection.query_fields()),
            ],
            projection,
            usize::MAX,
        );
        empty_if_not_found(result)
    }

    /// Albums by an artist, newest first; an unknown artist is an empty list
    pub fn get_artist_albums(&self, artist_id: &str) -> Result<ItemList> {
        self.config.validate()?;

        let artist_id = validate_id("artist_id", artist_id)?;
        let projection = Projection::ArtistAlbum;
        let result = self.fetch_list(
            &self.user_items_path(),
            &[
                ("ArtistIds", artist_id.to_string()),
                ("IncludeItemTypes", "MusicAlbum".to_string()),
                ("Recursive", "true".to_string()),
                ("SortBy", "PremiereDate".to_string()),
                ("SortOrder", "Descending".to_string()),
                ("Fields", projection.query_fields()),
            ],
            projection,
            usize::MAX,
        );
        empty_if_not_found(result)
    }

    pub fn list_genres(&self, input: LimitInput) -> Result<ItemList> {
        self.config.validate()?;

        let limit = GENRES_LIMIT.clamp(input.limit);
        self.fetch_list(
            "/MusicGenres",
            &[("Limit", limit.to_string())],
            Projection::Genre,
            limit,
        )
    }

    /// Recently added items.
    ///
    /// `/Items/Latest` returns a bare array, so `total` is the number of
    /// items returned.
    pub fn get_recent(&self, input: GetRecentInput) -> Result<ItemList> {
        self.config.validate()?;

        let item_type = match non_blank(&input.item_type) {
            Some(t) => {
                let parsed = t.parse::<ItemType>()?;
                if !RECENT_TYPES.contains(&parsed) {
                    return Err(JellyfinError::InvalidInput(format!(
                        "Unsupported type '{}' for recent items. Use one of: MusicAlbum, Audio, Movie, Series",
                        t
                    )));
                }
                parsed
            }
            None => ItemType::MusicAlbum,
        };
        let limit = RECENT_LIMIT.clamp(input.limit);
        let projection = Projection::for_recent(item_type);

        let value = self.backend.get(
            &format!("{}/Latest", self.user_items_path()),
            &[
                ("IncludeItemTypes", item_type.to_string()),
                ("Limit", limit.to_string()),
                ("Fields", projection.query_fields()),
            ],
        )?;

        let raw_items: Vec<RawItem> = match value {
            Value::Array(_) => serde_json::from_value(value)?,
            other => serde_json::from_value::<RawItemsResponse>(other)?.items,
        };
        let mut list = self.project_list(raw_items, None, projection, limit);
        list.total = list.items.len() as i64;
        Ok(list)
    }

    /// Favorite tracks and albums
    pub fn get_favorites(&self, input: LimitInput) -> Result<ItemList> {
        self.config.validate()?;

        let limit = FAVORITES_LIMIT.clamp(input.limit);
        let projection = Projection::Favorite;
        self.fetch_list(
            &self.user_items_path(),
            &[
                ("IncludeItemTypes", "Audio,MusicAlbum".to_string()),
                ("Recursive", "true".to_string()),
                ("Filters", "IsFavorite".to_string()),
                ("Limit", limit.to_string()),
                ("Fields", projection.query_fields()),
            ],
            projection,
            limit,
        )
    }

    pub fn get_playlists(&self, input: LimitInput) -> Result<ItemList> {
        self.config.validate()?;

        let limit = PLAYLISTS_LIMIT.clamp(input.limit);
        let projection = Projection::Playlist;
        self.fetch_list(
            &self.user_items_path(),
            &[
                ("IncludeItemTypes", "Playlist".to_string()),
                ("Recursive", "true".to_string()),
                ("Limit", limit.to_string()),
                ("Fields", projection.query_fields()),
            ],
            projection,
            limit,
        )
    }

    // ========================================================================
    // Video
    // ========================================================================

    pub fn list_movies(&self, input: ListVideosInput) -> Result<ItemList> {
        self.list_videos(ItemType::Movie, input)
    }

    pub fn list_series(&self, input: ListVideosInput) -> Result<ItemList> {
        self.list_videos(ItemType::Series, input)
    }

    fn list_videos(&self, item_type: ItemType, input: ListVideosInput) -> Result<ItemList> {
        self.config.validate()?;

        let sort = match non_blank(&input.sort) {
            Some(s) => SortKey::parse_allowed(s, VIDEO_SORTS)?,
            None => SortKey::Added,
        };
        let limit = VIDEOS_LIMIT.clamp(input.limit);
        let projection = Projection::Video;

        let mut query = vec![
            ("IncludeItemTypes", item_type.to_string()),
            ("Recursive", "true".to_string()),
            ("Limit", limit.to_string()),
            ("SortBy", sort.sort_by().to_string()),
            ("SortOrder", sort.sort_order().to_string()),
            ("Fields", projection.query_fields()),
        ];
        if let Some(genre) = non_blank(&input.genre) {
            query.push(("Genres", genre.to_string()));
        }

        self.fetch_list(&self.user_items_path(), &query, projection, limit)
    }

    // ========================================================================
    // Utility
    // ========================================================================

    /// Streaming URL and source info for an item.
    ///
    /// The item is looked up first so an unknown id is reported as an error
    /// instead of producing a URL that does not play.
    pub fn get_stream_url(&self, item_id: &str) -> Result<MediaItem> {
        self.config.validate()?;

        let item_id = validate_id("item_id", item_id)?;
        let projection = Projection::StreamInfo;
        let value = self
            .backend
            .get(
                &format!("{}/{}", self.user_items_path(), item_id),
                &[("Fields", projection.query_fields())],
            )
            .map_err(|e| match e {
                JellyfinError::NotFound(_) => JellyfinError::NotFound(item_id.to_string()),
                other => other,
            })?;

        let raw: RawItem = serde_json::from_value(value)?;
        if raw.id.as_deref().map_or(true, str::is_empty) {
            return Err(JellyfinError::NotFound(item_id.to_string()));
        }
        Ok(projection.apply(&raw, &self.config))
    }

    /// Item counts per category from a single `/Items/Counts` request
    pub fn library_stats(&self) -> Result<LibraryStats> {
        self.config.validate()?;

        let value = self.backend.get("/Items/Counts", &[])?;
        let counts: RawItemCounts = serde_json::from_value(value)?;
        Ok(counts.into())
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Ids are interpolated into URL paths and query strings
fn validate_id<'a>(arg: &str, id: &'a str) -> Result<&'a str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(JellyfinError::InvalidInput(format!("{} must not be empty", arg)));
    }
    if id.contains(['/', '?', '#', '&']) || id.chars().any(char::is_whitespace) {
        return Err(JellyfinError::InvalidInput(format!(
            "{} contains invalid characters: {}",
            arg, id
        )));
    }
    Ok(id)
}

fn empty_if_not_found(result: Result<ItemList>) -> Result<ItemList> {
    match result {
        Err(JellyfinError::NotFound(_)) => Ok(ItemList::empty()),
        other => other,
    }
}
