//! Markup to Go code generation.
//!
//! Callers depend on [`CodeGenerator`] only; [`HtmlGoGenerator`] is the
//! bundled implementation and tests are free to substitute their own.

mod htmlgo;
mod naming;

pub use htmlgo::HtmlGoGenerator;

use crate::error::GeneratorError;

pub const DEFAULT_PRIMARY_PREFIX: &str = "v";
pub const DEFAULT_SECONDARY_PREFIX: &str = "vx";

/// Naming prefixes and layout mode handed to a generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Qualifier for plain HTML tags (`h` gives `h.Div(`); empty means unqualified.
    pub package_prefix: String,
    /// Qualifier for the `v-*` component family.
    pub primary_prefix: String,
    /// Qualifier for the `vx-*` component family.
    pub secondary_prefix: String,
    /// Emit children through `.Children(...)` instead of call arguments.
    pub children_mode: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            package_prefix: String::new(),
            primary_prefix: DEFAULT_PRIMARY_PREFIX.to_string(),
            secondary_prefix: DEFAULT_SECONDARY_PREFIX.to_string(),
            children_mode: false,
        }
    }
}

/// Turns a markup fragment into Go source text.
///
/// The output is expected to carry the generator scaffold: a package
/// declaration, then an assignment of a `Body(...)` call whose arguments
/// mirror the markup tree.
pub trait CodeGenerator: Send + Sync {
    fn generate(&self, markup: &str, options: &GeneratorOptions)
        -> Result<String, GeneratorError>;
}
