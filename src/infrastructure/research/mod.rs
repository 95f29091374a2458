//! Research backed by a tool-calling chat model and a web search provider

mod search_tool;
mod tool_loop;

pub use search_tool::{SearchBudget, WebSearchTool, WEB_SEARCH_TOOL};
pub use tool_loop::ToolCallingResearcher;
