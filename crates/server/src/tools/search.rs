//! search tool implementation.
//!
//! Performs web searches through the Jina search endpoint, memoized with a
//! shorter TTL than fetch since result freshness matters more for queries.

use super::map_client_err;
use jina_mcp_client::{JinaClient, JinaConfig};
use jina_mcp_core::{AppConfig, CallArgs, Error, Memoizer};
use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Cache TTL for search results.
pub const SEARCH_TTL: u64 = 900;

/// Input parameters for the search tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct SearchParams {
    /// The search query.
    pub query: String,
}

/// Implementation of the search tool.
pub async fn search_impl(
    memo: &Memoizer, config: &AppConfig, params: SearchParams,
) -> Result<CallToolResult, McpError> {
    if params.query.trim().is_empty() {
        return Err(Error::InvalidInput("query cannot be empty".into()).into());
    }

    let query = params.query.trim().to_string();
    let args = CallArgs::new().arg(&query)?;

    let config = config.clone();
    let q = query.clone();
    let results: String = memo
        .call("search_web", &args, Some(SEARCH_TTL), move || async move {
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

            client.search(&q).await.map_err(map_client_err)
        })
        .await?;

    Ok(CallToolResult::success(vec![Content::text(results)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jina_mcp_core::{Memoizer, Store};
    use std::sync::Arc;

    fn test_memoizer() -> Memoizer {
        Memoizer::new(Arc::new(Store::new(None)), 3600, false)
    }

    #[tokio::test]
    async fn test_empty_query() {
        let memo = test_memoizer();
        let config = AppConfig::default();
        let params = SearchParams { query: "".into() };

        let result = search_impl(&memo, &config, params).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_whitespace_query() {
        let memo = test_memoizer();
        let config = AppConfig::default();
        let params = SearchParams { query: "   ".into() };

        let result = search_impl(&memo, &config, params).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let memo = test_memoizer();
        let config = AppConfig::default(); // No jina_api_key set
        let params = SearchParams { query: "rust async cache".into() };

        let result = search_impl(&memo, &config, params).await;
        assert!(result.is_err());
    }
}
