//! MCP tool definitions for the Jellyfin server

use serde_json::json;

use super::protocol::ToolDefinition;

/// All tool definitions: (name, description, JSON schema)
pub const TOOL_DEFINITIONS: &[(&str, &str, &str)] = &[
    // Music
    (
        "search_media",
        "Search the Jellyfin media library by title, artist or album name. Audio results include a direct api_stream URL.",
        r#"{
            "type": "object",
            "properties": {
                "query": {"type": "string", "description": "Search term (title, artist, album name)"},
                "type": {"type": "string", "enum": ["Audio", "MusicAlbum", "MusicArtist", "Movie", "Series"], "default": "Audio", "description": "Item type to search"},
                "limit": {"type": "integer", "minimum": 1, "maximum": 50, "default": 20, "description": "Max results"}
            },
            "required": ["query"]
        }"#,
    ),
    (
        "list_albums",
        "List music albums in the library, optionally filtered by artist or genre",
        r#"{
            "type": "object",
            "properties": {
                "artist": {"type": "string", "description": "Filter by artist name"},
                "genre": {"type": "string", "description": "Filter by genre name"},
                "sort": {"type": "string", "enum": ["name", "added", "year", "random"], "default": "name", "description": "Sort order"},
                "limit": {"type": "integer", "minimum": 1, "maximum": 100, "default": 50, "description": "Max results"}
            }
        }"#,
    ),
    (
        "list_artists",
        "List all music artists in the library",
        r#"{
            "type": "object",
            "properties": {
                "limit": {"type": "integer", "minimum": 1, "maximum": 200, "default": 50, "description": "Max results"}
            }
        }"#,
    ),
    (
        "get_album_tracks",
        "Get all tracks of an album in track order. Each track includes a direct api_stream URL.",
        r#"{
            "type": "object",
            "properties": {
                "album_id": {"type": "string", "description": "Jellyfin album ID"}
            },
            "required": ["album_id"]
        }"#,
    ),
    (
        "get_artist_albums",
        "Get all albums by an artist, newest first",
        r#"{
            "type": "object",
            "properties": {
                "artist_id": {"type": "string", "description": "Jellyfin artist ID"}
            },
            "required": ["artist_id"]
        }"#,
    ),
    (
        "list_genres",
        "List all music genres in the library",
        r#"{
            "type": "object",
            "properties": {
                "limit": {"type": "integer", "minimum": 1, "maximum": 100, "default": 50, "description": "Max results"}
            }
        }"#,
    ),
    (
        "get_recent",
        "Get recently added items",
        r#"{
            "type": "object",
            "properties": {
                "type": {"type": "string", "enum": ["MusicAlbum", "Audio", "Movie", "Series"], "default": "MusicAlbum", "description": "Item type"},
                "limit": {"type": "integer", "minimum": 1, "maximum": 50, "default": 20, "description": "Max results"}
            }
        }"#,
    ),
    (
        "get_favorites",
        "Get favorite (hearted) tracks and albums",
        r#"{
            "type": "object",
            "properties": {
                "limit": {"type": "integer", "minimum": 1, "maximum": 100, "default": 50, "description": "Max results"}
            }
        }"#,
    ),
    (
        "get_playlists",
        "List all playlists in the library",
        r#"{
            "type": "object",
            "properties": {
                "limit": {"type": "integer", "minimum": 1, "maximum": 100, "default": 30, "description": "Max results"}
            }
        }"#,
    ),
    // Video
    (
        "list_movies",
        "List movies in the library, optionally filtered by genre",
        r#"{
            "type": "object",
            "properties": {
                "genre": {"type": "string", "description": "Filter by genre name"},
                "sort": {"type": "string", "enum": ["name", "added", "year", "rating", "random"], "default": "added", "description": "Sort order"},
                "limit": {"type": "integer", "minimum": 1, "maximum": 100, "default": 50, "description": "Max results"}
            }
        }"#,
    ),
    (
        "list_series",
        "List TV series in the library, optionally filtered by genre",
        r#"{
            "type": "object",
            "properties": {
                "genre": {"type": "string", "description": "Filter by genre name"},
                "sort": {"type": "string", "enum": ["name", "added", "year", "rating", "random"], "default": "added", "description": "Sort order"},
                "limit": {"type": "integer", "minimum": 1, "maximum": 100, "default": 50, "description": "Max results"}
            }
        }"#,
    ),
    // Utility
    (
        "get_stream_url",
        "Get the streaming URL and source info for a media item. Fails if the item does not exist.",
        r#"{
            "type": "object",
            "properties": {
                "item_id": {"type": "string", "description": "Jellyfin item ID"}
            },
            "required": ["item_id"]
        }"#,
    ),
    (
        "library_stats",
        "Get library statistics (counts of songs, albums, artists, movies, series, episodes)",
        r#"{
            "type": "object",
            "properties": {}
        }"#,
    ),
];

/// Get all tool definitions as ToolDefinition structs
pub fn get_tool_definitions() -> Vec<ToolDefinition> {
    TOOL_DEFINITIONS
        .iter()
        .map(|(name, description, schema)| ToolDefinition {
            name: name.to_string(),
            description: description.to_string(),
            input_schema: serde_json::from_str(schema).unwrap_or(json!({})),
        })
        .collect()
}
