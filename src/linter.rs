use std::collections::HashMap;

use rayon::prelude::*;
use ruby_prism::Visit;

use crate::cop::registry::CopRegistry;
use crate::cop::walker::CopWalker;
use crate::cop::CopConfig;
use crate::diagnostic::Diagnostic;
use crate::parse::source::SourceFile;

pub struct LintResult {
    pub diagnostics: Vec<Diagnostic>,
    pub file_count: usize,
}

/// Run every enabled cop over one source file. Diagnostics come back in
/// source order regardless of which cop produced them.
pub fn lint_source(
    source: &SourceFile,
    registry: &CopRegistry,
    configs: &HashMap<String, CopConfig>,
) -> Vec<Diagnostic> {
    let parse_result = ruby_prism::parse(source.as_bytes());
    let default_config = CopConfig::default();
    let mut diagnostics = Vec::new();

    for cop in registry.cops() {
        let config = configs.get(cop.name()).unwrap_or(&default_config);
        if !config.enabled {
            continue;
        }
        let mut walker = CopWalker {
            cop: cop.as_ref(),
            source,
            cop_config: config,
            diagnostics: Vec::new(),
        };
        walker.visit(&parse_result.node());
        diagnostics.extend(walker.diagnostics);
    }

    diagnostics.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
    diagnostics
}

/// Lint many files on the rayon thread pool. Files are independent (cops
/// are stateless and trees are read-only), so the only merge point is
/// concatenating the per-file result vecs. Ordering across files follows
/// the input slice; ordering within a file is source order.
pub fn run_linter(
    sources: &[SourceFile],
    registry: &CopRegistry,
    configs: &HashMap<String, CopConfig>,
) -> LintResult {
    let diagnostics: Vec<Diagnostic> = sources
        .par_iter()
        .map(|source| lint_source(source, registry, configs))
        .flatten()
        .collect();

    LintResult {
        diagnostics,
        file_count: sources.len(),
    }
}
