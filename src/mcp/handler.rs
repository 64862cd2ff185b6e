//! MCP request handler backed by the Jellyfin tool set

use serde_json::{json, Value};

use super::protocol::{
    error_codes, methods, InitializeResult, McpHandler, McpRequest, McpResponse, ToolCallResult,
};
use super::tools::get_tool_definitions;
use crate::backend::Backend;
use crate::dispatcher::JellyfinTools;

/// Routes MCP methods to the Jellyfin tools
pub struct JellyfinHandler<B: Backend> {
    tools: JellyfinTools<B>,
}

impl<B: Backend> JellyfinHandler<B> {
    pub fn new(tools: JellyfinTools<B>) -> Self {
        Self { tools }
    }

    pub fn tools(&self) -> &JellyfinTools<B> {
        &self.tools
    }
}

impl<B: Backend> McpHandler for JellyfinHandler<B> {
    fn handle_request(&self, request: McpRequest) -> Option<McpResponse> {
        if request.is_notification() {
            if request.method != methods::INITIALIZED {
                tracing::debug!(method = %request.method, "Ignoring notification");
            }
            return None;
        }

        let response = match request.method.as_str() {
            methods::INITIALIZE => {
                let result = InitializeResult::default();
                McpResponse::success(request.id, json!(result))
            }
            methods::PING => McpResponse::success(request.id, json!({})),
            methods::LIST_TOOLS => {
                let tools = get_tool_definitions();
                McpResponse::success(request.id, json!({"tools": tools}))
            }
            methods::CALL_TOOL => {
                let Some(name) = request.params.get("name").and_then(|v| v.as_str()) else {
                    return Some(McpResponse::error(
                        request.id,
                        error_codes::INVALID_PARAMS,
                        "Missing tool name".to_string(),
                    ));
                };
                let arguments = request
                    .params
                    .get("arguments")
                    .cloned()
                    .unwrap_or(Value::Null);

                let result = self.tools.call_tool(name, arguments);
                let tool_result = ToolCallResult::json(&result);
                McpResponse::success(request.id, json!(tool_result))
            }
            _ => McpResponse::error(
                request.id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            ),
        };

        Some(response)
    }
}
