//! Core types for the Jellyfin MCP server
//!
//! Raw types mirror the subset of the Jellyfin REST schema the tools read.
//! Compact types are what the tools hand back to the assistant.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::JellyfinError;

// ============================================================================
// Raw Jellyfin responses
// ============================================================================

/// A media source attached to a playable item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawMediaSource {
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub container: Option<String>,
}

/// The fields of a Jellyfin `BaseItemDto` that projections read
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawItem {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "Type")]
    pub item_type: Option<String>,
    #[serde(default)]
    pub artists: Option<Vec<String>>,
    #[serde(default)]
    pub album_artist: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub production_year: Option<i64>,
    #[serde(default)]
    pub genres: Option<Vec<String>>,
    #[serde(default)]
    pub index_number: Option<i64>,
    #[serde(default)]
    pub run_time_ticks: Option<i64>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub child_count: Option<i64>,
    #[serde(default)]
    pub community_rating: Option<f64>,
    #[serde(default)]
    pub media_sources: Option<Vec<RawMediaSource>>,
}

/// Paged query result (`/Items`, `/Users/{id}/Items`, `/Artists`, `/MusicGenres`)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawItemsResponse {
    #[serde(default)]
    pub items: Vec<RawItem>,
    #[serde(default)]
    pub total_record_count: Option<i64>,
}

/// `/Items/Counts` response
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawItemCounts {
    #[serde(default)]
    pub song_count: Option<i64>,
    #[serde(default)]
    pub album_count: Option<i64>,
    #[serde(default)]
    pub artist_count: Option<i64>,
    #[serde(default)]
    pub movie_count: Option<i64>,
    #[serde(default)]
    pub series_count: Option<i64>,
    #[serde(default)]
    pub episode_count: Option<i64>,
}

// ============================================================================
// Compact results
// ============================================================================

/// Compact media item.
///
/// Every field is optional and skipped when absent, so a projection only
/// emits what its field table allows and what the backend actually returned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album_artist: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_stream: Option<String>,
}

/// Result of every list/search tool
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemList {
    pub total: i64,
    pub items: Vec<MediaItem>,
}

impl ItemList {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Result of `library_stats`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryStats {
    pub songs: u64,
    pub albums: u64,
    pub artists: u64,
    pub movies: u64,
    pub series: u64,
    pub episodes: u64,
}

impl From<RawItemCounts> for LibraryStats {
    fn from(raw: RawItemCounts) -> Self {
        // Negative counts are not meaningful; treat them like missing ones
        let count = |v: Option<i64>| v.and_then(|n| u64::try_from(n).ok()).unwrap_or(0);
        Self {
            songs: count(raw.song_count),
            albums: count(raw.album_count),
            artists: count(raw.artist_count),
            movies: count(raw.movie_count),
            series: count(raw.series_count),
            episodes: count(raw.episode_count),
        }
    }
}

// ============================================================================
// Item types and sorting
// ============================================================================

/// Jellyfin item kinds the tools can filter on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemType {
    Audio,
    MusicAlbum,
    MusicArtist,
    Movie,
    Series,
}

impl ItemType {
    pub const ALL: [ItemType; 5] = [
        ItemType::Audio,
        ItemType::MusicAlbum,
        ItemType::MusicArtist,
        ItemType::Movie,
        ItemType::Series,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Audio => "Audio",
            ItemType::MusicAlbum => "MusicAlbum",
            ItemType::MusicArtist => "MusicArtist",
            ItemType::Movie => "Movie",
            ItemType::Series => "Series",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = JellyfinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                JellyfinError::InvalidInput(format!(
                    "Unknown item type '{}'. Use one of: {}",
                    s,
                    join(&ItemType::ALL)
                ))
            })
    }
}

/// Tool-level sort names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Name,
    Added,
    Year,
    Rating,
    Random,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Added => "added",
            SortKey::Year => "year",
            SortKey::Rating => "rating",
            SortKey::Random => "random",
        }
    }

    /// Jellyfin `SortBy` value
    pub fn sort_by(&self) -> &'static str {
        match self {
            SortKey::Name => "SortName",
            SortKey::Added => "DateCreated",
            SortKey::Year => "PremiereDate",
            SortKey::Rating => "CommunityRating",
            SortKey::Random => "Random",
        }
    }

    /// Jellyfin `SortOrder` value; newest, latest and best-rated come first
    pub fn sort_order(&self) -> &'static str {
        match self {
            SortKey::Added | SortKey::Year | SortKey::Rating => "Descending",
            SortKey::Name | SortKey::Random => "Ascending",
        }
    }

    /// Parse a sort name, accepting only the keys a tool supports
    pub fn parse_allowed(s: &str, allowed: &[SortKey]) -> Result<Self, JellyfinError> {
        allowed
            .iter()
            .copied()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                JellyfinError::InvalidInput(format!(
                    "Unsupported sort '{}'. Use one of: {}",
                    s,
                    join(allowed)
                ))
            })
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn join<T: fmt::Display>(values: &[T]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Tool inputs
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct SearchMediaInput {
    pub query: String,
    #[serde(rename = "type", default)]
    pub item_type: Option<String>,
    #[serde(default)]
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListAlbumsInput {
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Input for `list_movies` and `list_series`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListVideosInput {
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Input for tools that only take a limit
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LimitInput {
    #[serde(default)]
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GetRecentInput {
    #[serde(rename = "type", default)]
    pub item_type: Option<String>,
    #[serde(default)]
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlbumIdInput {
    pub album_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistIdInput {
    pub artist_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ItemIdInput {
    pub item_id: String,
}
