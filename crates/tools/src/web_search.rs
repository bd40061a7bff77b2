//! Web search tool, Tavily-backed with a placeholder fallback.
//!
//! When a Tavily API key is provided, queries go to the Tavily search API
//! and results are formatted as an optional AI answer followed by numbered
//! sources. Without a key the tool returns a clearly-labelled simulated
//! response instead of failing, so the agent stays usable offline.

use async_trait::async_trait;
use reagent_core::error::ToolError;
use reagent_core::tool::{Tool, ToolResult};
use serde::Deserialize;
use tracing::debug;

const TAVILY_SEARCH_URL: &str = "https://api.tavily.com/search";
const MAX_RESULTS: u8 = 5;

pub struct WebSearchTool {
    backend: Backend,
}

enum Backend {
    Tavily(TavilyClient),
    Placeholder,
}

impl WebSearchTool {
    /// Create the tool. A `Some` key selects the live Tavily backend.
    pub fn new(tavily_api_key: Option<String>) -> Self {
        let backend = match tavily_api_key {
            Some(key) => Backend::Tavily(TavilyClient::new(key)),
            None => {
                debug!("TAVILY_API_KEY not set, web_search will return placeholder results");
                Backend::Placeholder
            }
        };
        Self { backend }
    }

    /// Whether this instance is backed by the live search API.
    pub fn is_live(&self) -> bool {
        matches!(self.backend, Backend::Tavily(_))
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Search the web for information on a given query. Returns search results as a string."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query to look up on the web"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let query = arguments["query"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'query' argument".into()))?;

        match &self.backend {
            Backend::Placeholder => Ok(ToolResult::ok(placeholder_results(query))),
            Backend::Tavily(client) => match client.search(query).await {
                Ok(response) => Ok(ToolResult::ok(format_results(query, &response))),
                // Upstream search failures are reported to the model as an
                // observation, not raised as a loop error.
                Err(e) => Ok(ToolResult::failure(format!(
                    "Error performing web search: {e}"
                ))),
            },
        }
    }
}

/// Simulated output used when no search credential is configured.
fn placeholder_results(query: &str) -> String {
    let current_date = chrono::Utc::now().format("%Y-%m-%d");
    format!(
        "Web search results for '{query}' (as of {current_date}):\n\
         This is a simulated response. In a real implementation, this would \
         return actual search results from a search engine API."
    )
}

/// Format a Tavily response: AI answer first (when present), then numbered
/// sources with URL and content.
fn format_results(query: &str, response: &TavilyResponse) -> String {
    let mut out = format!("Web search results for '{query}':\n\n");

    if let Some(answer) = &response.answer
        && !answer.is_empty()
    {
        out.push_str(&format!("Answer: {answer}\n\n"));
    }

    if response.results.is_empty() {
        out.push_str("No search results found. Try refining your query.\n");
        return out;
    }

    out.push_str("Sources:\n");
    for (i, result) in response.results.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, result.title));
        out.push_str(&format!("   URL: {}\n", result.url));
        if !result.content.is_empty() {
            out.push_str(&format!("   Content: {}\n", result.content));
        }
        out.push('\n');
    }

    out
}

/// Minimal Tavily search API client.
struct TavilyClient {
    api_key: String,
    client: reqwest::Client,
}

impl TavilyClient {
    fn new(api_key: String) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
        }
    }

    async fn search(&self, query: &str) -> Result<TavilyResponse, String> {
        let body = serde_json::json!({
            "api_key": self.api_key,
            "query": query,
            "search_depth": "advanced",
            "include_answer": true,
            "include_images": false,
            "max_results": MAX_RESULTS,
        });

        debug!(%query, "Sending Tavily search request");

        let response = self
            .client
            .post(TAVILY_SEARCH_URL)
            .json(&body)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(format!("Tavily returned {status}: {text}"));
        }

        response
            .json::<TavilyResponse>()
            .await
            .map_err(|e| format!("Failed to parse Tavily response: {e}"))
    }
}

#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    answer: Option<String>,
    #[serde(default)]
    results: Vec<TavilySearchResult>,
}

#[derive(Debug, Deserialize)]
struct TavilySearchResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    content: String,
}
