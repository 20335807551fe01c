//! fetch tool implementation.
//!
//! Fetches a page's rendered content through the Jina reader, memoized so
//! repeated fetches of the same URL within the TTL window skip the upstream
//! call entirely.

use super::map_client_err;
use jina_mcp_client::{JinaClient, JinaConfig, canonicalize};
use jina_mcp_core::{AppConfig, CallArgs, Error, Memoizer};
use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Cache TTL for fetched page content.
pub const FETCH_TTL: u64 = 1800;

/// Input parameters for the fetch tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct FetchParams {
    /// The URL of the webpage to fetch.
    pub url: String,
}

/// Implementation of the fetch tool.
pub async fn fetch_impl(
    memo: &Memoizer, config: &AppConfig, params: FetchParams,
) -> Result<CallToolResult, McpError> {
    if params.url.is_empty() {
        return Err(Error::InvalidInput("url cannot be empty".into()).into());
    }

    let url = canonicalize(&params.url).map_err(|e| Error::InvalidUrl(e.to_string()))?;
    let args = CallArgs::new().arg(url.as_str())?;

    let config = config.clone();
    let target = url.to_string();
    let content: String = memo
        .call("fetch_content", &args, Some(FETCH_TTL), move || async move {
            let client = JinaClient::new(JinaConfig {
                api_key: config
                    .require_jina_api_key()
                    .map_err(|e| Error::JinaAuthError(e.to_string()))?
                    .to_string(),
                timeout: config.timeout(),
                user_agent: config.user_agent.clone(),
                ..Default::default()
            })
            .map_err(map_client_err)?;

            client.fetch_content(&target).await.map_err(map_client_err)
        })
        .await?;

    Ok(CallToolResult::success(vec![Content::text(content)]))
}
