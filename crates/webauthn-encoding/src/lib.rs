//! Base64 transcoding for WebAuthn ceremonies.
//!
//! A relying party backend hands out `navigator.credentials.create()` /
//! `navigator.credentials.get()` options as JSON, with every binary field
//! (challenge, user handle, credential ids) written as base64 text. The
//! platform credential API wants raw buffers in those places, and hands back
//! results whose binary fields have to be turned into base64 again before they
//! can travel back to the backend.
//!
//! This crate provides:
//! - [`Transcoder::encode`] / [`Transcoder::decode`]: the byte <-> text
//!   primitives. Output follows the configured [`Options`]; input is accepted
//!   in either alphabet, padded or not.
//! - [`Transcoder::decode_creation_request`] and
//!   [`Transcoder::encode_creation_response`] for registration.
//! - [`Transcoder::decode_credential_request`] and
//!   [`Transcoder::encode_credential_response`] for authentication.
//!
//! # Example
//!
//! ```
//! use webauthn_encoding::{Binary, CredentialCreationOptions, Nested, Transcoder};
//!
//! let wire: CredentialCreationOptions = serde_json::from_value(serde_json::json!({
//!     "publicKey": {
//!         "challenge": "AA==",
//!         "user": { "id": "AQ==", "name": "alice" }
//!     }
//! }))
//! .unwrap();
//!
//! let decoded = Transcoder::default().decode_creation_request(&wire).unwrap();
//! let Some(Nested::Object(public_key)) = &decoded.public_key else { panic!() };
//! assert_eq!(public_key.challenge, Some(Binary::Raw(vec![0])));
//! ```

pub mod binary;
pub mod cli;
pub mod creation;
pub mod credential;
pub mod error;
pub mod options;
pub mod transcoder;

pub use binary::{Binary, Nested};
pub use creation::{
    AttestationResponseJson, AuthenticatorAttestationResponse, CredentialCreationOptions,
    PublicKeyCredentialCreationOptions, PublicKeyCredentialUserEntity,
};
pub use credential::{
    AssertionResponseJson, AuthenticatorAssertionResponse, CredentialRequestOptions,
    PublicKeyCredentialDescriptor, PublicKeyCredentialRequestOptions,
};
pub use error::DecodeError;
pub use options::Options;
pub use transcoder::{
    AuthenticatorResponse, PublicKeyCredential, PublicKeyCredentialJson, Transcoder,
};
