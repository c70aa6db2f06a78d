//! Explicit tool registry
//!
//! Tools are exposed to the agent through a registry of named factories built
//! at startup, rather than any reflection or attribute magic. The default
//! registry carries the seven filesystem tools.

use crate::tools::{Tool, ToolExecutor};
use std::collections::HashMap;

/// Factory trait for creating tool instances
pub trait ToolFactory: Send + Sync {
    /// Create a new instance of the tool
    fn create(&self) -> Box<dyn Tool>;

    /// Name of the tool this factory creates
    fn tool_name(&self) -> &str;

    /// Description of the tool this factory creates
    fn tool_description(&self) -> &str;
}

/// Registry mapping tool names to factories
pub struct ToolRegistry {
    factories: HashMap<String, Box<dyn ToolFactory>>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a tool factory
    pub fn register_factory(&mut self, factory: Box<dyn ToolFactory>) {
        self.factories
            .insert(factory.tool_name().to_string(), factory);
    }

    /// Create a tool by name
    pub fn create_tool(&self, name: &str) -> Option<Box<dyn Tool>> {
        self.factories.get(name).map(|factory| factory.create())
    }

    /// List all available tool names
    pub fn list_tools(&self) -> Vec<&str> {
        self.factories.keys().map(|name| name.as_str()).collect()
    }

    /// Get the (name, description) pair for a tool
    pub fn get_tool_info(&self, name: &str) -> Option<(&str, &str)> {
        self.factories
            .get(name)
            .map(|factory| (factory.tool_name(), factory.tool_description()))
    }

    /// Create a tool executor with the named tools
    pub fn create_executor(&self, tool_names: &[String]) -> ToolExecutor {
        let mut executor = ToolExecutor::new();

        for name in tool_names {
            if let Some(tool) = self.create_tool(name) {
                executor.register_tool(tool);
            }
        }

        executor
    }

    /// Create a tool executor with every registered tool
    pub fn create_executor_with_all(&self) -> ToolExecutor {
        let mut executor = ToolExecutor::new();

        for factory in self.factories.values() {
            executor.register_tool(factory.create());
        }

        executor
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        let mut registry = Self::new();

        // Register built-in tools
        registry.register_factory(Box::new(crate::tools::builtin::ListFilesToolFactory));
        registry.register_factory(Box::new(crate::tools::builtin::SearchFilesToolFactory));
        registry.register_factory(Box::new(crate::tools::builtin::ReadFileToolFactory));
        registry.register_factory(Box::new(crate::tools::builtin::ReadMultipleFilesToolFactory));
        registry.register_factory(Box::new(crate::tools::builtin::WriteFileToolFactory));
        registry.register_factory(Box::new(crate::tools::builtin::ReplaceContentToolFactory));
        registry.register_factory(Box::new(crate::tools::builtin::MakeDirectoryToolFactory));

        registry
    }
}

/// Macro to implement a tool factory for a unit-constructible tool
#[macro_export]
macro_rules! impl_tool_factory {
    ($factory:ident, $tool:ident, $name:expr, $description:expr) => {
        pub struct $factory;

        impl $crate::tools::ToolFactory for $factory {
            fn create(&self) -> Box<dyn $crate::tools::Tool> {
                Box::new($tool::new())
            }

            fn tool_name(&self) -> &str {
                $name
            }

            fn tool_description(&self) -> &str {
                $description
            }
        }
    };
}
