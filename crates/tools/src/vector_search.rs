//! Vector search tool: placeholder semantic lookup.
//!
//! A real deployment would embed the query and run a similarity search
//! against a vector database. This stub returns labelled simulated chunks
//! so the agent loop can be exercised end-to-end without one.

use async_trait::async_trait;
use reagent_core::error::ToolError;
use reagent_core::tool::{Tool, ToolResult};

const DEFAULT_LIMIT: u64 = 5;

pub struct VectorSearchTool;

#[async_trait]
impl Tool for VectorSearchTool {
    fn name(&self) -> &str {
        "vector_search"
    }

    fn description(&self) -> &str {
        "Search for information in a vector database using semantic similarity. Returns the most relevant stored documents."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query to look up in the vector database"
                },
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of results to return (default 5)",
                    "default": 5
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<ToolResult, ToolError> {
        let query = arguments["query"]
            .as_str()
            .ok_or_else(|| ToolError::InvalidArguments("Missing 'query' argument".into()))?;

        let limit = arguments["limit"].as_u64().unwrap_or(DEFAULT_LIMIT).min(20);

        let output = format!(
            "Vector database search results for '{query}' (limit: {limit}):\n\
             This is a simulated response. In a real implementation, this would \
             return actual results from a vector database using semantic similarity search."
        );

        Ok(ToolResult::ok(output))
    }
}
