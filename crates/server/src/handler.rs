//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use std::sync::Arc;

use crate::tools::fetch::{FetchParams, fetch_impl};
use crate::tools::search::{SearchParams, search_impl};

use jina_mcp_core::{AppConfig, Memoizer, Store};
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

/// The main MCP server handler for mcp-jina.
#[derive(Clone)]
pub struct JinaMcpServer {
    tool_router: ToolRouter<Self>,
    config: Arc<AppConfig>,
    memoizer: Memoizer,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl JinaMcpServer {
    /// Create a new server handler.
    ///
    /// The store is constructed here, once, and shared through the memoizer
    /// by all tool calls for the process lifetime.
    pub fn new(config: AppConfig) -> Self {
        let store = Arc::new(Store::new(config.redis_url.clone()));
        let memoizer = Memoizer::new(store, config.cache_ttl, config.cache_empty_results);

        Self { tool_router: Self::tool_router(), config: Arc::new(config), memoizer }
    }

    /// Fetch the rendered content of a web page via the Jina reader.
    #[tool(description = "Fetches the content of a web page.")]
    async fn fetch(&self, params: Parameters<FetchParams>) -> Result<CallToolResult, McpError> {
        fetch_impl(&self.memoizer, &self.config, params.0).await
    }

    /// Search the web via the Jina search endpoint.
    #[tool(description = "Searches the web for a given query.")]
    async fn search(&self, params: Parameters<SearchParams>) -> Result<CallToolResult, McpError> {
        search_impl(&self.memoizer, &self.config, params.0).await
    }
}

impl ServerHandler for JinaMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "mcp-jina".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}
