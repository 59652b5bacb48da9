//! Tool registry -- named lookup of the available tool adapters.

use std::collections::HashMap;
use std::sync::Arc;

use super::ProvisioningTool;
use super::terraform::{OpenTofu, Terraform};

/// The tool used when none is named.
pub const DEFAULT_TOOL: &str = "terraform";

/// Names of the built-in tool adapters.
pub const KNOWN_TOOLS: &[&str] = &["terraform", "tofu"];

/// A collection of registered [`ProvisioningTool`] adapters, keyed by name.
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn ProvisioningTool>>,
}

impl ToolRegistry {
    /// Registry with the built-in adapters (terraform, tofu) registered.
    pub fn builtin() -> Self {
        let mut registry = Self {
            tools: HashMap::new(),
        };
        registry.register(Arc::new(Terraform::new()));
        registry.register(Arc::new(OpenTofu::new()));
        registry
    }

    /// Register an adapter under the name it reports.
    ///
    /// Replaces and returns any adapter already registered under that name.
    pub fn register(
        &mut self,
        tool: Arc<dyn ProvisioningTool>,
    ) -> Option<Arc<dyn ProvisioningTool>> {
        self.tools.insert(tool.name().to_owned(), tool)
    }

    /// Look up an adapter by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn ProvisioningTool>> {
        self.tools.get(name).cloned()
    }

    /// Sorted names of all registered adapters.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tools.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.names())
            .finish()
    }
}

/// Build an adapter by name with an overridden binary path.
///
/// Returns `None` for unknown tool names.
pub fn tool_with_binary(name: &str, binary: &str) -> Option<Arc<dyn ProvisioningTool>> {
    match name {
        "terraform" => Some(Arc::new(Terraform::with_binary(binary))),
        "tofu" => Some(Arc::new(OpenTofu::with_binary(binary))),
        _ => None,
    }
}
