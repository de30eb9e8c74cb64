//! Wire types of the conversion endpoint.
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Body of `POST /convert`. Every field may be omitted.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ConversionRequest {
    pub html: String,
    pub package_prefix: String,
    pub vuetify_prefix: String,
    #[serde(rename = "vuetifyXPrefix")]
    pub vuetify_x_prefix: String,
    pub direction: String,
    pub children_mode: bool,
}

/// Exactly one of `code` and `error` is set.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ConversionResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ConversionResponse {
    pub fn success(code: String) -> Self {
        Self {
            code: Some(code),
            error: None,
        }
    }

    pub fn failure(error: String) -> Self {
        Self {
            code: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Html2Go,
    Go2Html,
}

impl FromStr for Direction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "html2go" => Ok(Direction::Html2Go),
            "go2html" => Ok(Direction::Go2Html),
            _ => Err(()),
        }
    }
}
