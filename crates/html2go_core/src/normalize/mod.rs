//! Post-processing of generated builder code.

mod balance;
mod repair;
mod strip;

use std::fmt;
use std::str::FromStr;

pub use balance::check_balance;
pub use repair::{repair_syntax, GENERATED_HEADER};
pub use strip::strip_wrappers;

use crate::error::ImbalancedDelimiters;

/// What to do with the delimiter balance check after stripping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Skip the check.
    Off,
    /// Log imbalance and return the code anyway.
    #[default]
    Warn,
    /// Fail the conversion on imbalance.
    Enforce,
}

impl FromStr for ValidationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" | "none" => Ok(ValidationMode::Off),
            "warn" => Ok(ValidationMode::Warn),
            "enforce" | "strict" => Ok(ValidationMode::Enforce),
            other => Err(format!("unknown validation mode '{other}'")),
        }
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValidationMode::Off => "off",
            ValidationMode::Warn => "warn",
            ValidationMode::Enforce => "enforce",
        };
        f.write_str(name)
    }
}

/// Strip, then optionally repair and balance-check generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NormalizePipeline {
    pub repair: bool,
    pub validation: ValidationMode,
}

impl NormalizePipeline {
    pub fn new(repair: bool, validation: ValidationMode) -> Self {
        Self { repair, validation }
    }

    pub fn run(&self, generated: &str) -> Result<String, ImbalancedDelimiters> {
        let mut code = strip_wrappers(generated);
        if self.repair {
            code = repair_syntax(&code);
        }

        match self.validation {
            ValidationMode::Off => {}
            ValidationMode::Warn => {
                if let Err(err) = check_balance(&code) {
                    tracing::warn!(
                        error = %err,
                        "syntax validation failed, returning code anyway"
                    );
                }
            }
            ValidationMode::Enforce => check_balance(&code)?,
        }

        Ok(code)
    }
}
