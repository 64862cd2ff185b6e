//! Field projection: narrowing raw Jellyfin items to compact records
//!
//! Each [`Projection`] owns a static allow-list of [`Field`]s. The tables are
//! the contract tool consumers rely on, so new fields are added here and
//! nowhere else.

use crate::config::JellyfinConfig;
use crate::types::{ItemType, MediaItem, RawItem};

/// Jellyfin run-time ticks per second (ticks are 100 ns units)
pub const TICKS_PER_SECOND: i64 = 10_000_000;

/// A single output field and the rule for extracting it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Id,
    Name,
    Type,
    Index,
    Artist,
    AlbumArtist,
    Album,
    Year,
    Genre,
    Duration,
    Rating,
    Overview,
    ChildCount,
    StreamUrl,
    Container,
    ApiStream,
}

impl Field {
    /// Key used in the compact JSON output
    pub fn key(&self) -> &'static str {
        match self {
            Field::Id => "id",
            Field::Name => "name",
            Field::Type => "type",
            Field::Index => "index",
            Field::Artist => "artist",
            Field::AlbumArtist => "album_artist",
            Field::Album => "album",
            Field::Year => "year",
            Field::Genre => "genre",
            Field::Duration => "duration",
            Field::Rating => "rating",
            Field::Overview => "overview",
            Field::ChildCount => "child_count",
            Field::StreamUrl => "stream_url",
            Field::Container => "container",
            Field::ApiStream => "api_stream",
        }
    }

    /// Jellyfin `Fields` query value needed to populate this field, if any
    pub fn query_field(&self) -> Option<&'static str> {
        match self {
            Field::Artist => Some("Artists"),
            Field::AlbumArtist => Some("AlbumArtist"),
            Field::Album => Some("Album"),
            Field::Year => Some("ProductionYear"),
            Field::Genre => Some("Genres"),
            Field::Duration => Some("RunTimeTicks"),
            Field::Rating => Some("CommunityRating"),
            Field::Overview => Some("Overview"),
            Field::ChildCount => Some("ChildCount"),
            Field::StreamUrl | Field::Container => Some("MediaSources"),
            _ => None,
        }
    }
}

/// Named field tables, one per kind of compact record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Projection {
    SearchAudio,
    Album,
    Artist,
    Video,
    AlbumTrack,
    ArtistAlbum,
    Genre,
    RecentAudio,
    RecentVideo,
    Favorite,
    Playlist,
    StreamInfo,
}

use Field::*;

const SEARCH_AUDIO: &[Field] = &[Id, Name, Artist, Album, Year, Duration, ApiStream];
const ALBUM: &[Field] = &[Id, Name, AlbumArtist, Year, Genre];
const ARTIST: &[Field] = &[Id, Name, Genre, Overview];
const VIDEO: &[Field] = &[Id, Name, Year, Genre, Rating, Overview];
const ALBUM_TRACK: &[Field] = &[Id, Name, Index, Artist, Duration, ApiStream];
const ARTIST_ALBUM: &[Field] = &[Id, Name, Year, Genre];
const GENRE: &[Field] = &[Id, Name];
const RECENT_AUDIO: &[Field] = &[Id, Name, Artist, Album, Year];
const RECENT_VIDEO: &[Field] = &[Id, Name, Year, Genre];
const FAVORITE: &[Field] = &[Id, Name, Type, Artist, Album, Year, Duration];
const PLAYLIST: &[Field] = &[Id, Name, ChildCount, Overview];
const STREAM_INFO: &[Field] = &[Id, Name, StreamUrl, Container, ApiStream];

impl Projection {
    pub fn fields(&self) -> &'static [Field] {
        match self {
            Projection::SearchAudio => SEARCH_AUDIO,
            Projection::Album => ALBUM,
            Projection::Artist => ARTIST,
            Projection::Video => VIDEO,
            Projection::AlbumTrack => ALBUM_TRACK,
            Projection::ArtistAlbum => ARTIST_ALBUM,
            Projection::Genre => GENRE,
            Projection::RecentAudio => RECENT_AUDIO,
            Projection::RecentVideo => RECENT_VIDEO,
            Projection::Favorite => FAVORITE,
            Projection::Playlist => PLAYLIST,
            Projection::StreamInfo => STREAM_INFO,
        }
    }

    /// Projection used by `search_media` for a given item type
    pub fn for_search(item_type: ItemType) -> Self {
        match item_type {
            ItemType::Audio => Projection::SearchAudio,
            ItemType::MusicAlbum => Projection::Album,
            ItemType::MusicArtist => Projection::Artist,
            ItemType::Movie | ItemType::Series => Projection::Video,
        }
    }

    /// Projection used by `get_recent`; artists are reported like search results
    pub fn for_recent(item_type: ItemType) -> Self {
        match item_type {
            ItemType::Audio => Projection::RecentAudio,
            ItemType::MusicAlbum => Projection::Album,
            ItemType::MusicArtist => Projection::Artist,
            ItemType::Movie | ItemType::Series => Projection::RecentVideo,
        }
    }

    /// Comma-separated Jellyfin `Fields` parameter covering this projection
    pub fn query_fields(&self) -> String {
        let mut wanted: Vec<&'static str> = Vec::new();
        for field in self.fields() {
            if let Some(name) = field.query_field() {
                if !wanted.contains(&name) {
                    wanted.push(name);
                }
            }
        }
        wanted.join(",")
    }

    /// Narrow a raw item to this projection's fields
    pub fn apply(&self, raw: &RawItem, config: &JellyfinConfig) -> MediaItem {
        project(raw, self.fields(), config)
    }
}

/// Build a compact item holding only `fields`; absent values stay `None`
pub fn project(raw: &RawItem, fields: &[Field], config: &JellyfinConfig) -> MediaItem {
    let mut item = MediaItem::default();
    let source = raw.media_sources.as_ref().and_then(|s| s.first());

    for field in fields {
        match field {
            Field::Id => item.id = non_empty(&raw.id),
            Field::Name => item.name = non_empty(&raw.name),
            Field::Type => item.item_type = non_empty(&raw.item_type),
            Field::Index => item.index = raw.index_number,
            Field::Artist => item.artist = first(&raw.artists),
            Field::AlbumArtist => item.album_artist = non_empty(&raw.album_artist),
            Field::Album => item.album = non_empty(&raw.album),
            Field::Year => item.year = raw.production_year,
            Field::Genre => item.genre = first(&raw.genres),
            Field::Duration => item.duration = format_duration(raw.run_time_ticks),
            Field::Rating => item.rating = raw.community_rating.filter(|r| r.is_finite()),
            Field::Overview => item.overview = non_empty(&raw.overview),
            Field::ChildCount => item.child_count = raw.child_count,
            Field::StreamUrl => item.stream_url = source.and_then(|s| non_empty(&s.path)),
            Field::Container => item.container = source.and_then(|s| non_empty(&s.container)),
            Field::ApiStream => {
                item.api_stream = non_empty(&raw.id).map(|id| config.audio_stream_url(&id))
            }
        }
    }

    item
}

/// Convert `RunTimeTicks` to an `M:SS` string; missing or zero yields `None`
pub fn format_duration(ticks: Option<i64>) -> Option<String> {
    let ticks = ticks.filter(|t| *t > 0)?;
    let total_seconds = ticks / TICKS_PER_SECOND;
    Some(format!("{}:{:02}", total_seconds / 60, total_seconds % 60))
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|s| !s.is_empty()).map(str::to_string)
}

fn first(values: &Option<Vec<String>>) -> Option<String> {
    values
        .as_ref()
        .and_then(|v| v.first())
        .filter(|s| !s.is_empty())
        .cloned()
}
