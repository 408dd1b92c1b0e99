use ruby_prism::Visit;

use crate::cop::{Cop, CopConfig};
use crate::diagnostic::Diagnostic;
use crate::parse::source::SourceFile;

/// Traversal driver: visits every call-expression node in a parsed tree
/// exactly once and hands it to the cop. Cops are stateless, so one walk
/// per cop is all the coordination needed.
pub struct CopWalker<'a> {
    pub cop: &'a dyn Cop,
    pub source: &'a SourceFile,
    pub cop_config: &'a CopConfig,
    pub diagnostics: Vec<Diagnostic>,
}

impl<'pr> Visit<'pr> for CopWalker<'_> {
    fn visit_call_node(&mut self, node: &ruby_prism::CallNode<'pr>) {
        self.cop.check_node(
            self.source,
            &node.as_node(),
            self.cop_config,
            &mut self.diagnostics,
        );
        // Continue walking into receiver, arguments, and block
        ruby_prism::visit_call_node(self, node);
    }
}
