//! Common enums shared across crates.

use serde::{Deserialize, Serialize};

/// Line terminator used when rendering source text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewLineKind {
    /// `\n`
    #[default]
    #[serde(alias = "lf")]
    LineFeed,
    /// `\r\n`
    #[serde(alias = "crlf")]
    CarriageReturnLineFeed,
}

impl NewLineKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            NewLineKind::LineFeed => "\n",
            NewLineKind::CarriageReturnLineFeed => "\r\n",
        }
    }
}
