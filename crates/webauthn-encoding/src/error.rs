//! Error type for text-to-bytes conversion.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The text is not base64 after `-`/`_` normalization, or has a length or
    /// padding the decoder rejects.
    #[error("invalid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
    /// A binary field holds something other than text or a byte array.
    #[error("{field} is neither base64 text nor a byte array")]
    NotBinary { field: String },
    /// An `allowCredentials` entry is not an object or carries no `id`.
    #[error("allowCredentials[{index}] has no id")]
    MissingCredentialId { index: usize },
}
