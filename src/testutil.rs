use ruby_prism::Visit;

use crate::cop::walker::CopWalker;
use crate::cop::{Cop, CopConfig};
use crate::diagnostic::Diagnostic;
use crate::parse::source::SourceFile;

/// An expected offense parsed from a fixture annotation.
#[derive(Debug, Clone)]
pub struct ExpectedOffense {
    pub line: usize,
    pub column: usize,
    pub cop_name: String,
    pub message: String,
}

struct RawAnnotation {
    column: usize,
    cop_name: String,
    message: String,
}

/// Try to parse an annotation line.
///
/// Annotation format: optional leading whitespace, then one or more `^`
/// characters, then a space, then `Department/CopName: Message`.
///
/// The column of the offense is the byte position of the first `^` in the
/// line. Lines that merely contain `^` in other contexts (Ruby XOR, caret
/// in strings) are rejected: the `^` must be the first non-whitespace
/// character and must be followed by a `/`-qualified cop name and `: `.
fn try_parse_annotation(line: &str) -> Option<RawAnnotation> {
    let trimmed = line.trim_start();
    if !trimmed.starts_with('^') {
        return None;
    }

    let caret_count = trimmed.bytes().take_while(|&b| b == b'^').count();
    let after_carets = &trimmed[caret_count..];
    if !after_carets.starts_with(' ') {
        return None;
    }

    let rest = after_carets[1..].trim_end();
    let colon_space = rest.find(": ")?;
    let cop_name = &rest[..colon_space];
    let message = &rest[colon_space + 2..];

    if !cop_name.contains('/') {
        return None;
    }

    let column = line.len() - trimmed.len();

    Some(RawAnnotation {
        column,
        cop_name: cop_name.to_string(),
        message: message.to_string(),
    })
}

/// Parse fixture content into clean source bytes and expected offenses.
///
/// Annotation lines are stripped from the source; line numbers in expected
/// offenses refer to the clean source (1-indexed). Annotations must appear
/// *after* the source line they reference.
///
/// # Panics
///
/// Panics if an annotation appears before any source line.
pub fn parse_fixture(raw: &[u8]) -> (Vec<u8>, Vec<ExpectedOffense>) {
    let text = std::str::from_utf8(raw).expect("fixture must be valid UTF-8");
    let elements: Vec<&str> = text.split('\n').collect();

    let mut source_lines: Vec<&str> = Vec::new();
    let mut expected: Vec<ExpectedOffense> = Vec::new();

    for (raw_idx, element) in elements.iter().enumerate() {
        if let Some(annotation) = try_parse_annotation(element) {
            assert!(
                !source_lines.is_empty(),
                "Annotation on raw line {} appears before any source line.\nLine: {:?}",
                raw_idx + 1,
                element,
            );
            let source_line_number = source_lines.len(); // 1-indexed
            expected.push(ExpectedOffense {
                line: source_line_number,
                column: annotation.column,
                cop_name: annotation.cop_name,
                message: annotation.message,
            });
        } else {
            source_lines.push(element);
        }
    }

    let clean = source_lines.join("\n");
    (clean.into_bytes(), expected)
}

/// Run a cop on raw source bytes and return the diagnostics.
pub fn run_cop(cop: &dyn Cop, source_bytes: &[u8]) -> Vec<Diagnostic> {
    run_cop_with_config(cop, source_bytes, CopConfig::default())
}

/// Run a cop on raw source bytes with a specific config.
pub fn run_cop_with_config(
    cop: &dyn Cop,
    source_bytes: &[u8],
    config: CopConfig,
) -> Vec<Diagnostic> {
    let source = SourceFile::from_bytes("test.rb", source_bytes.to_vec());
    let parse_result = ruby_prism::parse(source.as_bytes());
    let mut walker = CopWalker {
        cop,
        source: &source,
        cop_config: &config,
        diagnostics: Vec::new(),
    };
    walker.visit(&parse_result.node());
    walker.diagnostics
}

/// Run a cop on fixture bytes (with annotations) and assert offenses match.
///
/// Both expected and actual diagnostics are sorted by (line, column) before
/// comparison, so annotation order in the fixture doesn't need to match the
/// cop's emission order.
pub fn assert_cop_offenses(cop: &dyn Cop, fixture_bytes: &[u8]) {
    let (clean_source, mut expected) = parse_fixture(fixture_bytes);
    let mut diagnostics = run_cop(cop, &clean_source);

    expected.sort_by_key(|e| (e.line, e.column));
    diagnostics.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

    assert_eq!(
        diagnostics.len(),
        expected.len(),
        "Expected {} offense(s) but got {}.\nExpected:\n{}\nActual:\n{}",
        expected.len(),
        diagnostics.len(),
        format_expected(&expected),
        format_diagnostics(&diagnostics),
    );

    for (i, (diag, exp)) in diagnostics.iter().zip(expected.iter()).enumerate() {
        assert_eq!(
            (diag.location.line, diag.location.column),
            (exp.line, exp.column),
            "Offense #{}: position mismatch\n  expected: {}:{} {}: {}\n  actual:   {d}",
            i + 1,
            exp.line,
            exp.column,
            exp.cop_name,
            exp.message,
            d = diag,
        );
        assert_eq!(
            diag.cop_name,
            exp.cop_name,
            "Offense #{}: cop name mismatch",
            i + 1,
        );
        assert_eq!(
            diag.message,
            exp.message,
            "Offense #{}: message mismatch for {}",
            i + 1,
            exp.cop_name,
        );
    }
}

/// Assert a cop produces no offenses on the given source bytes.
pub fn assert_cop_no_offenses(cop: &dyn Cop, source_bytes: &[u8]) {
    let diagnostics = run_cop(cop, source_bytes);
    assert!(
        diagnostics.is_empty(),
        "Expected no offenses but got {}:\n{}",
        diagnostics.len(),
        format_diagnostics(&diagnostics),
    );
}

fn format_expected(expected: &[ExpectedOffense]) -> String {
    expected
        .iter()
        .map(|e| format!("  {}:{} {}: {}", e.line, e.column, e.cop_name, e.message))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_diagnostics(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(|d| format!("  {d}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_annotation_with_carets() {
        let ann = try_parse_annotation("     ^^^ RSpec/Foo: some message").unwrap();
        assert_eq!(ann.column, 5);
        assert_eq!(ann.cop_name, "RSpec/Foo");
        assert_eq!(ann.message, "some message");
    }

    #[test]
    fn parse_annotation_at_column_zero() {
        let ann = try_parse_annotation("^^^ RSpec/Bar: msg").unwrap();
        assert_eq!(ann.column, 0);
        assert_eq!(ann.cop_name, "RSpec/Bar");
        assert_eq!(ann.message, "msg");
    }

    #[test]
    fn rejects_caret_in_other_contexts() {
        assert!(try_parse_annotation("x = a ^ b").is_none());
        assert!(try_parse_annotation("^^^ no cop name here").is_none());
        assert!(try_parse_annotation("^^^NoSpace/Cop: msg").is_none());
    }

    #[test]
    fn parse_fixture_strips_annotations_and_tracks_lines() {
        let raw = b"expect(5).to eq(price)\n       ^ RSpec/ExpectActual: msg\nexpect(price).to eq(5)\n";
        let (clean, expected) = parse_fixture(raw);
        assert_eq!(clean, b"expect(5).to eq(price)\nexpect(price).to eq(5)\n");
        assert_eq!(expected.len(), 1);
        assert_eq!(expected[0].line, 1);
        assert_eq!(expected[0].column, 7);
        assert_eq!(expected[0].message, "msg");
    }

    #[test]
    #[should_panic(expected = "before any source line")]
    fn annotation_before_source_panics() {
        parse_fixture(b"^ RSpec/Foo: msg\nexpect(5)\n");
    }
}
