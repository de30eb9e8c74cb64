//! Markup to builder-style Go code conversion.
//!
//! The generator produces raw `htmlgo` source wrapped in a package
//! declaration and a `var n = Body(...)` scaffold; the normalization
//! pipeline strips that scaffold and optionally repairs and checks the
//! remaining expression.

pub mod error;
pub mod generator;
pub mod normalize;

pub use error::{ConversionError, GeneratorError, ImbalancedDelimiters};
pub use generator::{CodeGenerator, GeneratorOptions, HtmlGoGenerator};
pub use normalize::{
    check_balance, repair_syntax, strip_wrappers, NormalizePipeline, ValidationMode,
    GENERATED_HEADER,
};
