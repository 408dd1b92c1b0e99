use crate::cop::rspec::literal::is_literal;
use crate::cop::rspec::matchers::expectation_argument;
use crate::cop::{Cop, CopConfig};
use crate::diagnostic::{Diagnostic, Severity};
use crate::parse::source::SourceFile;

pub struct ExpectActual;

const MSG: &str = "Provide the actual value you are testing to `expect(...)`.";

/// Flags `expect(5).to eq(price)` and similar chains where the "actual"
/// position holds a literal. The offense is anchored at the literal
/// argument, not the `expect` call. `nil` is a literal like any other;
/// `expect(nil)` is flagged.
impl Cop for ExpectActual {
    fn name(&self) -> &'static str {
        "RSpec/ExpectActual"
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
        let argument = match expectation_argument(node) {
            Some(a) => a,
            None => return,
        };
        if !is_literal(&argument) {
            return;
        }

        let location = source.prism_location_to_location(&argument.location());
        diagnostics.push(self.diagnostic(
            source,
            config,
            location.line,
            location.column,
            MSG.to_string(),
        ));
    }
}
