//! MCP server surface: advertises the `submit_urls` tool over stdio and
//! forwards calls to the submission service.

use std::sync::Arc;

use anyhow::Result;
use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, ServiceExt,
    model::{
        CallToolRequestParam, CallToolResult, Content, Implementation, JsonObject,
        ListToolsResult, PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo,
        Tool,
    },
    schemars::{JsonSchema, schema_for},
    service::RequestContext,
    transport::stdio,
};
use serde::Deserialize;
use serde_json::Value;

use crate::client::ApiClient;
use crate::service::IndexNowService;

pub const SUBMIT_URLS_TOOL: &str = "submit_urls";

const SUBMIT_URLS_DESCRIPTION: &str = "Submit one or more URLs to search engines using the \
IndexNow protocol. Accepts a list of URLs, an optional secret key (falls back to the configured \
default), an optional host (inferred from the first URL when omitted) and an optional key file \
location. Returns {\"status\": 200|202, \"message\": ...} on success or \
{\"status\": 4xx|5xx, \"error\": ...} on failure.";

/// Arguments accepted by the `submit_urls` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SubmitUrlsArgs {
    /// URLs to submit (e.g. ["https://example.com/page1", "https://example.com/page2"])
    pub urls: Vec<String>,
    /// IndexNow secret key (optional if a default key is configured)
    #[serde(default)]
    pub key: Option<String>,
    /// Host of the website (e.g. "example.com"); inferred from the first URL when omitted
    #[serde(default)]
    pub host: Option<String>,
    /// Location of the key file (e.g. "https://example.com/key.txt")
    #[serde(default)]
    pub key_location: Option<String>,
}

/// All tool names this server exposes.
pub fn available_tools() -> Vec<&'static str> {
    vec![SUBMIT_URLS_TOOL]
}

/// MCP server over stdio transport.
pub struct IndexNowServer {
    service: IndexNowService<ApiClient>,
}

impl IndexNowServer {
    pub fn new(service: IndexNowService<ApiClient>) -> Self {
        Self { service }
    }

    /// Serve the stdio transport until the client disconnects.
    pub async fn serve_stdio(self) -> Result<()> {
        log::info!("Starting IndexNow MCP server on stdio");

        let service = self.serve(stdio()).await.inspect_err(|e| {
            log::error!("serving error: {e:?}");
        })?;
        service.waiting().await?;

        log::info!("Stdio server stopped");
        Ok(())
    }

    fn submit_urls_schema() -> Arc<serde_json::Map<String, Value>> {
        match serde_json::to_value(schema_for!(SubmitUrlsArgs)) {
            Ok(Value::Object(obj)) => Arc::new(obj),
            _ => Arc::new(serde_json::Map::new()),
        }
    }
}

/// Validate the tool name and deserialize call arguments.
///
/// Absent arguments are treated as an empty object, so a call without `urls`
/// fails deserialization rather than panicking downstream.
fn parse_submit_args(
    name: &str,
    arguments: Option<JsonObject>,
) -> Result<SubmitUrlsArgs, McpError> {
    if name != SUBMIT_URLS_TOOL {
        return Err(McpError::invalid_params(
            format!("Unknown tool: {name}"),
            None,
        ));
    }
    let arguments = Value::Object(arguments.unwrap_or_default());
    serde_json::from_value(arguments).map_err(|e| {
        McpError::invalid_params(
            format!("Invalid arguments for {SUBMIT_URLS_TOOL}: {e}"),
            None,
        )
    })
}

impl ServerHandler for IndexNowServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "IndexNow MCP server - notify search engines of changed URLs via the submit_urls tool"
                    .to_string(),
            ),
        }
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let args = parse_submit_args(request.name.as_ref(), request.arguments)?;

        log::debug!(
            "Tool call {SUBMIT_URLS_TOOL} with {} URL(s)",
            args.urls.len()
        );

        let outcome = self
            .service
            .submit_urls(
                &args.urls,
                args.key.as_deref(),
                args.host.as_deref(),
                args.key_location.as_deref(),
            )
            .await;

        // The outcome is the tool's contract, success or failure alike; it is
        // passed through unchanged rather than converted to a protocol error.
        let payload = serde_json::to_string(&outcome).map_err(|e| {
            McpError::internal_error(format!("Failed to serialize outcome: {e}"), None)
        })?;
        Ok(CallToolResult::success(vec![Content::text(payload)]))
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        let tools = vec![Tool {
            name: SUBMIT_URLS_TOOL.into(),
            title: None,
            description: Some(SUBMIT_URLS_DESCRIPTION.into()),
            input_schema: Self::submit_urls_schema(),
            output_schema: None,
            annotations: None,
            icons: None,
            meta: None,
        }];
        Ok(ListToolsResult::with_all_items(tools))
    }
}
