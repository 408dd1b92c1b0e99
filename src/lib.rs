pub mod cop;
pub mod diagnostic;
pub mod linter;
pub mod parse;

#[cfg(test)]
pub mod testutil;
