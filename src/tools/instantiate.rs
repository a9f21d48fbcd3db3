use crate::tools::{ClockTool, EchoTool, SearchTool, SummarizeTool, ToolRegistry};

/// Registry with the built-in local tools. Callers may register more.
pub fn default_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(EchoTool));
    registry.register(Box::new(ClockTool));
    registry.register(Box::new(SearchTool));
    registry.register(Box::new(SummarizeTool));
    registry
}
