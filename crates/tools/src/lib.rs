//! Built-in tool implementations for reagent.
//!
//! Three tools back the agent: `web_search` (Tavily API when a key is
//! available, a labelled placeholder otherwise), `vector_search` (a
//! placeholder semantic lookup), and `calculator` (safe arithmetic
//! evaluation, registered only on request).

pub mod calculator;
pub mod vector_search;
pub mod web_search;

pub use calculator::CalculatorTool;
pub use vector_search::VectorSearchTool;
pub use web_search::WebSearchTool;

use reagent_core::tool::ToolRegistry;

/// Compose the tool registry for an agent.
///
/// Always includes `web_search` and `vector_search`; appends `calculator`
/// when asked. `tavily_api_key` selects the live web search backend;
/// pass `None` to get the placeholder implementation.
pub fn registry(include_calculator: bool, tavily_api_key: Option<String>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(WebSearchTool::new(tavily_api_key)));
    registry.register(Box::new(VectorSearchTool));
    if include_calculator {
        registry.register(Box::new(CalculatorTool));
    }
    registry
}
