//! Golden tests - fixture-based tests that lock expected tool output
//!
//! Each case feeds a canned Jellyfin response to a tool and compares the
//! compact result with the fixture. Any change in the projection contract
//! will cause these tests to fail.
//!
//! Run with: cargo test --test golden_tests

use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};

use pretty_assertions::assert_eq;
use serde::Deserialize;
use serde_json::{json, Value};

use jellyfin_mcp::backend::{Backend, Query};
use jellyfin_mcp::mcp::{JellyfinHandler, McpServer};
use jellyfin_mcp::{JellyfinConfig, JellyfinError, JellyfinTools, Result};

/// Backend that answers every request with one canned HTTP outcome
struct FixtureBackend {
    status: u16,
    body: Value,
    calls: AtomicUsize,
}

impl FixtureBackend {
    fn new(status: u16, body: Value) -> Self {
        Self {
            status,
            body,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Backend for FixtureBackend {
    fn get(&self, path: &str, _query: &Query<'_>) -> Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.status {
            200..=299 => Ok(self.body.clone()),
            404 => Err(JellyfinError::NotFound(path.to_string())),
            status => Err(JellyfinError::Api {
                status,
                message: self.body.as_str().unwrap_or_default().to_string(),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct FixtureConfig {
    base_url: String,
    api_key: String,
    user_id: String,
}

#[derive(Debug, Deserialize)]
struct BackendFixture {
    status: u16,
    body: Value,
}

#[derive(Debug, Deserialize)]
struct TestCase {
    name: String,
    tool: String,
    arguments: Value,
    backend: BackendFixture,
    expected: Value,
}

#[derive(Debug, Deserialize)]
struct Fixture {
    config: FixtureConfig,
    test_cases: Vec<TestCase>,
}

fn load_fixture() -> Fixture {
    let fixture_path = concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/tool_scenarios.json"
    );
    let content =
        fs::read_to_string(fixture_path).expect("Failed to read tool_scenarios.json fixture");
    serde_json::from_str(&content).expect("Failed to parse fixture JSON")
}

fn config_from(fixture: &FixtureConfig) -> JellyfinConfig {
    JellyfinConfig::new(&fixture.base_url, &fixture.api_key, &fixture.user_id)
}

// ============================================================================
// TOOL OUTPUT GOLDEN TESTS
// ============================================================================

#[test]
fn test_tool_scenarios_golden() {
    let fixture = load_fixture();
    assert!(!fixture.test_cases.is_empty());

    for case in fixture.test_cases {
        let tools = JellyfinTools::new(
            config_from(&fixture.config),
            FixtureBackend::new(case.backend.status, case.backend.body),
        );
        let result = tools.call_tool(&case.tool, case.arguments);
        assert_eq!(result, case.expected, "Case '{}'", case.name);
    }
}

#[test]
fn test_projection_is_idempotent_for_fixtures() {
    let fixture = load_fixture();

    for case in fixture.test_cases {
        let tools = JellyfinTools::new(
            config_from(&fixture.config),
            FixtureBackend::new(case.backend.status, case.backend.body),
        );
        let first = tools.call_tool(&case.tool, case.arguments.clone());
        let second = tools.call_tool(&case.tool, case.arguments);
        assert_eq!(first, second, "Case '{}'", case.name);
    }
}

#[test]
fn test_missing_config_never_reaches_backend() {
    let fixture = load_fixture();
    let incomplete = [
        JellyfinConfig::new("", "test-api-key", "test-user-id"),
        JellyfinConfig::new("http://jellyfin.local:8096", "", "test-user-id"),
        JellyfinConfig::new("http://jellyfin.local:8096", "test-api-key", ""),
    ];

    for config in incomplete {
        for case in &fixture.test_cases {
            let tools = JellyfinTools::new(
                config.clone(),
                FixtureBackend::new(case.backend.status, case.backend.body.clone()),
            );
            let result = tools.call_tool(&case.tool, case.arguments.clone());
            let error = result["error"]
                .as_str()
                .unwrap_or_else(|| panic!("Case '{}': expected error, got {result}", case.name));
            assert!(!error.is_empty());
            assert_eq!(tools.backend().calls(), 0, "Case '{}'", case.name);
        }
    }
}

#[test]
fn test_missing_config_message_names_variable() {
    let tools = JellyfinTools::new(
        JellyfinConfig::new("http://jellyfin.local:8096", "test-api-key", ""),
        FixtureBackend::new(200, json!({})),
    );
    let result = tools.call_tool("library_stats", json!({}));
    assert_eq!(
        result,
        json!({"error": "Configuration error: JELLYFIN_USER_ID not configured"})
    );
}

#[test]
fn test_malformed_payload_becomes_error() {
    let tools = JellyfinTools::new(
        JellyfinConfig::new("http://jellyfin.local:8096", "k", "u"),
        FixtureBackend::new(200, json!({"Items": "not-a-list"})),
    );
    let result = tools.call_tool("list_albums", json!({}));
    assert!(result["error"]
        .as_str()
        .unwrap()
        .starts_with("Serialization error"));
}

#[test]
fn test_audio_items_carry_stream_urls() {
    let config = JellyfinConfig::new("http://media:8096", "k3y", "u");
    let tools = JellyfinTools::new(
        config,
        FixtureBackend::new(
            200,
            json!({"TotalRecordCount": 3, "Items": [{"Id": "a"}, {"Id": "b"}, {"Id": "c"}]}),
        ),
    );

    for (tool, args) in [
        ("search_media", json!({"query": "x", "type": "Audio"})),
        ("get_album_tracks", json!({"album_id": "album"})),
    ] {
        let result = tools.call_tool(tool, args);
        let items = result["items"].as_array().unwrap();
        assert_eq!(items.len(), 3);
        for item in items {
            let id = item["id"].as_str().unwrap();
            assert_eq!(
                item["api_stream"],
                format!("http://media:8096/Audio/{}/universal?api_key=k3y", id)
            );
        }
    }
}

// ============================================================================
// RESPONSE SIZE TESTS
// ============================================================================

#[test]
fn test_search_20_results_under_5kb() {
    let items: Vec<Value> = (0..20)
        .map(|i| {
            json!({
                "Id": format!("id-{:04}", i),
                "Name": format!("Song Title Number {}", i),
                "Artists": [format!("Artist Name {}", i)],
                "Album": format!("Album Name {}", i),
                "ProductionYear": 2020 + (i % 5),
                "RunTimeTicks": (180 + i * 7) * 10_000_000i64,
                "Overview": "A long description the compact output leaves out entirely.",
                "MediaSources": [{"Path": "/music/file.flac", "Container": "flac"}]
            })
        })
        .collect();
    let tools = JellyfinTools::new(
        JellyfinConfig::new("http://jellyfin.local:8096", "test-api-key", "test-user-id"),
        FixtureBackend::new(200, json!({"TotalRecordCount": 20, "Items": items})),
    );

    let result = tools.call_tool("search_media", json!({"query": "song"}));
    let size = serde_json::to_string(&result).unwrap().len();
    assert_eq!(result["items"].as_array().unwrap().len(), 20);
    assert!(size < 5120, "Response is {} bytes, exceeds 5KB", size);
}

#[test]
fn test_library_stats_under_200_bytes() {
    let tools = JellyfinTools::new(
        JellyfinConfig::new("http://jellyfin.local:8096", "test-api-key", "test-user-id"),
        FixtureBackend::new(
            200,
            json!({
                "SongCount": 12345,
                "AlbumCount": 890,
                "ArtistCount": 456,
                "MovieCount": 678,
                "SeriesCount": 123,
                "EpisodeCount": 2345
            }),
        ),
    );
    let result = tools.call_tool("library_stats", Value::Null);
    let size = serde_json::to_string(&result).unwrap().len();
    assert!(size < 200, "Stats response is {} bytes, exceeds 200", size);
}

// ============================================================================
// STDIO SESSION TESTS
// ============================================================================

fn run_session(lines: &[Value], backend: FixtureBackend) -> Vec<Value> {
    let tools = JellyfinTools::new(
        JellyfinConfig::new("http://jellyfin.local:8096", "test-api-key", "test-user-id"),
        backend,
    );
    let server = McpServer::new(JellyfinHandler::new(tools));
    let input: String = lines.iter().map(|l| format!("{}\n", l)).collect();
    let mut output = Vec::new();
    server.serve(input.as_bytes(), &mut output).unwrap();
    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[test]
fn test_stdio_session() {
    let responses = run_session(
        &[
            json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}),
            json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
            json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}),
            json!({"jsonrpc": "2.0", "id": 3, "method": "tools/call", "params": {"name": "library_stats", "arguments": {}}}),
            json!({"jsonrpc": "2.0", "id": 4, "method": "tools/call", "params": {"name": "get_stream_url", "arguments": {"item_id": "gone"}}}),
            json!({"jsonrpc": "2.0", "id": 5, "method": "resources/list"}),
        ],
        FixtureBackend::new(404, Value::Null),
    );

    // The notification gets no reply
    assert_eq!(responses.len(), 5);

    assert_eq!(responses[0]["id"], 1);
    assert_eq!(responses[0]["result"]["serverInfo"]["name"], "jellyfin-mcp");
    assert_eq!(responses[0]["result"]["serverInfo"]["version"], jellyfin_mcp::VERSION);

    let tools = responses[1]["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 13);
    assert!(tools.iter().all(|t| t["inputSchema"]["type"] == "object"));

    // Every call against a 404 backend reports a tool-level error, not a protocol error
    assert_eq!(responses[2]["result"]["isError"], true);
    assert_eq!(responses[3]["result"]["isError"], true);
    let text = responses[3]["result"]["content"][0]["text"].as_str().unwrap();
    let payload: Value = serde_json::from_str(text).unwrap();
    assert_eq!(payload, json!({"error": "Item not found: gone"}));

    assert_eq!(responses[4]["error"]["code"], -32601);
}

#[test]
fn test_stdio_tool_call_success() {
    let responses = run_session(
        &[json!({
            "jsonrpc": "2.0",
            "id": "abc",
            "method": "tools/call",
            "params": {"name": "list_genres"}
        })],
        FixtureBackend::new(
            200,
            json!({"TotalRecordCount": 1, "Items": [{"Id": "g1", "Name": "Rock"}]}),
        ),
    );

    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["id"], "abc");
    assert!(responses[0]["result"].get("isError").is_none());
    let text = responses[0]["result"]["content"][0]["text"].as_str().unwrap();
    let payload: Value = serde_json::from_str(text).unwrap();
    assert_eq!(payload, json!({"total": 1, "items": [{"id": "g1", "name": "Rock"}]}));
    assert!(!text.contains('\n'), "tool output should be compact: {text}");
}

#[test]
fn test_stdio_call_without_tool_name() {
    let responses = run_session(
        &[json!({"jsonrpc": "2.0", "id": 9, "method": "tools/call", "params": {}})],
        FixtureBackend::new(200, json!({})),
    );
    assert_eq!(responses[0]["error"]["code"], -32602);
}
