//! Rendering options for `SourcePrinter`.

use jsast_common::common::NewLineKind;
use jsast_common::limits::DEFAULT_INDENT_UNIT;
use serde::{Deserialize, Serialize};

/// Whitespace settings for source rendering.
///
/// Loadable from a JSON document; missing fields keep their defaults:
///
/// ```json
/// { "indentUnit": "  ", "newline": "crlf" }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrinterOptions {
    /// Text repeated once per indentation level.
    pub indent_unit: String,
    pub newline: NewLineKind,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        PrinterOptions {
            indent_unit: DEFAULT_INDENT_UNIT.to_string(),
            newline: NewLineKind::LineFeed,
        }
    }
}

impl PrinterOptions {
    /// Parse options from a JSON configuration document.
    pub fn from_json(text: &str) -> Result<PrinterOptions, serde_json::Error> {
        serde_json::from_str(text)
    }

    #[must_use]
    pub fn with_indent_unit(mut self, unit: impl Into<String>) -> Self {
        self.indent_unit = unit.into();
        self
    }

    #[must_use]
    pub fn with_newline(mut self, newline: NewLineKind) -> Self {
        self.newline = newline;
        self
    }
}
