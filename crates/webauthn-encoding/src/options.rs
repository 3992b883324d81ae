//! Transcoder configuration.

use serde::{Deserialize, Serialize};

/// Output variant of the bytes -> text direction.
///
/// Deserializes from the same JSON object a browser-side caller would pass,
/// e.g. `{"base64Safe": true}`; missing members default to `false`.
/// Decoding ignores these flags and accepts every variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    /// Emit `-` and `_` in place of `+` and `/`.
    pub base64_safe: bool,
    /// Strip trailing `=` padding.
    pub base64_no_padding: bool,
}

impl Options {
    /// URL-safe alphabet without padding, the usual base64url.
    pub fn url_safe_no_pad() -> Self {
        Self {
            base64_safe: true,
            base64_no_padding: true,
        }
    }
}
