//! Core logic of the `webauthn-transcode` command-line tool.
//!
//! The tool reads one JSON document, applies one transform and prints the
//! JSON result. Raw buffers appear as arrays of byte numbers on both sides.

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::creation::{AuthenticatorAttestationResponse, CredentialCreationOptions};
use crate::credential::{AuthenticatorAssertionResponse, CredentialRequestOptions};
use crate::error::DecodeError;
use crate::options::Options;
use crate::transcoder::{PublicKeyCredential, Transcoder};

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Decode(#[from] DecodeError),
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    DecodeCreationRequest,
    EncodeCreationResponse,
    DecodeCredentialRequest,
    EncodeCredentialResponse,
}

impl Operation {
    pub const NAMES: [&'static str; 4] = [
        "decode-creation-request",
        "encode-creation-response",
        "decode-credential-request",
        "encode-credential-response",
    ];

    pub fn parse(name: &str) -> Result<Self, CliError> {
        match name {
            "decode-creation-request" => Ok(Operation::DecodeCreationRequest),
            "encode-creation-response" => Ok(Operation::EncodeCreationResponse),
            "decode-credential-request" => Ok(Operation::DecodeCredentialRequest),
            "encode-credential-response" => Ok(Operation::EncodeCredentialResponse),
            other => Err(CliError::UnknownOperation(other.to_string())),
        }
    }
}

/// Parses command-line arguments (without the program name) into an
/// operation and options.
pub fn parse_args<I, S>(args: I) -> Result<(Operation, Options), CliError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = Options::default();
    let mut operation = None;
    for arg in args {
        match arg.as_ref() {
            "--safe" => options.base64_safe = true,
            "--no-padding" => options.base64_no_padding = true,
            name => operation = Some(Operation::parse(name)?),
        }
    }
    let operation = operation.ok_or_else(|| CliError::UnknownOperation(String::new()))?;
    Ok((operation, options))
}

/// Applies `operation` to the JSON document `input`.
pub fn run(operation: Operation, input: &str, options: Options) -> Result<String, CliError> {
    let transcoder = Transcoder::new(options);
    match operation {
        Operation::DecodeCreationRequest => {
            let req: CredentialCreationOptions = parse(input)?;
            render(&transcoder.decode_creation_request(&req)?)
        }
        Operation::EncodeCreationResponse => {
            let src: PublicKeyCredential<AuthenticatorAttestationResponse> = parse(input)?;
            render(&transcoder.encode_creation_response(&src))
        }
        Operation::DecodeCredentialRequest => {
            let req: CredentialRequestOptions = parse(input)?;
            render(&transcoder.decode_credential_request(&req)?)
        }
        Operation::EncodeCredentialResponse => {
            let src: PublicKeyCredential<AuthenticatorAssertionResponse> = parse(input)?;
            render(&transcoder.encode_credential_response(&src))
        }
    }
}

fn parse<T: DeserializeOwned>(input: &str) -> Result<T, CliError> {
    Ok(serde_json::from_str(input.trim())?)
}

fn render<T: Serialize>(value: &T) -> Result<String, CliError> {
    Ok(serde_json::to_string(value)?)
}
