use crate::cop::rspec::matchers::{
    expectation, matcher_with_blockpass_or_hash, matcher_with_configured_response,
    matcher_with_return_block,
};
use crate::cop::{Cop, CopConfig};
use crate::diagnostic::{Diagnostic, Severity};
use crate::parse::source::SourceFile;

pub struct StubbedMock;

/// Flags `expect(foo).to receive(:bar).and_return(...)` and similar chains
/// where a message expectation also configures a response. Expecting a call
/// and stubbing its answer are different concerns; the stub belongs on
/// `allow`.
impl Cop for StubbedMock {
    fn name(&self) -> &'static str {
        "RSpec/StubbedMock"
    }

    fn default_severity(&self) -> Severity {
        Severity::Convention
    }

    fn check_node(
        &self,
        source: &SourceFile,
        node: &ruby_prism::Node<'_>,
        config: &CopConfig,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let expectation = match expectation(node) {
            Some(e) => e,
            None => return,
        };

        // Fixed precedence; the shapes are mutually exclusive by
        // construction, and at most one diagnostic is emitted per chain.
        let configured = matcher_with_configured_response(&expectation.matcher)
            || matcher_with_return_block(&expectation.matcher)
            || matcher_with_blockpass_or_hash(&expectation.matcher);
        if !configured {
            return;
        }

        let location = source.prism_location_to_location(&expectation.entry_node.location());
        diagnostics.push(self.diagnostic(
            source,
            config,
            location.line,
            location.column,
            format!(
                "Prefer `{}` to `{}` when configuring a response.",
                expectation.entry.replacement(),
                expectation.entry.method_name(),
            ),
        ));
    }
}
