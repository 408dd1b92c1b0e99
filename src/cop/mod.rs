pub mod registry;
pub mod rspec;
pub mod walker;

use crate::diagnostic::{Diagnostic, Location, Severity};
use crate::parse::source::SourceFile;

/// Per-cop overrides supplied by the host. Loading these from a config
/// file is the host's business, not ours.
#[derive(Debug, Clone)]
pub struct CopConfig {
    pub enabled: bool,
    pub severity: Option<Severity>,
}

impl Default for CopConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            severity: None,
        }
    }
}

/// A lint rule. Implementations must be Send + Sync so they can be shared
/// across rayon worker threads.
pub trait Cop: Send + Sync {
    /// The fully-qualified cop name, e.g. "RSpec/ExpectActual".
    fn name(&self) -> &'static str;

    fn default_severity(&self) -> Severity {
        Severity::Convention
    }

    /// Node-based check — called once for every call-expression node during
    /// traversal. Findings are appended to `diagnostics`.
    fn check_node(
        &self,
        source: &SourceFile,
        node: &ruby_prism::Node<'_>,
        config: &CopConfig,
        diagnostics: &mut Vec<Diagnostic>,
    );

    fn diagnostic(
        &self,
        source: &SourceFile,
        config: &CopConfig,
        line: usize,
        column: usize,
        message: String,
    ) -> Diagnostic {
        Diagnostic {
            path: source.path_str().to_string(),
            location: Location { line, column },
            severity: config.severity.unwrap_or(self.default_severity()),
            cop_name: self.name().to_string(),
            message,
        }
    }
}
