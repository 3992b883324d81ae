//! Authentication: `navigator.credentials.get()` options and results.

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::binary::{present, Binary, Nested};
use crate::error::DecodeError;
use crate::transcoder::{
    AuthenticatorResponse, PublicKeyCredential, PublicKeyCredentialJson, Transcoder,
};

/// Options for a credential request (assertion) ceremony.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialRequestOptions {
    #[serde(
        rename = "publicKey",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub public_key: Option<Nested<PublicKeyCredentialRequestOptions>>,
    /// Members other than `publicKey`, such as `mediation`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicKeyCredentialRequestOptions {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub challenge: Option<Binary>,
    #[serde(
        rename = "allowCredentials",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub allow_credentials: Option<Nested<Vec<Nested<PublicKeyCredentialDescriptor>>>>,
    /// `rpId`, `timeout`, `userVerification`, `extensions`, ...
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicKeyCredentialDescriptor {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub id: Option<Binary>,
    /// `type`, `transports`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of an assertion ceremony, as produced by the authenticator.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatorAssertionResponse {
    #[serde(rename = "authenticatorData", default, skip_serializing_if = "Option::is_none")]
    pub authenticator_data: Option<Vec<u8>>,
    #[serde(rename = "clientDataJSON", default, skip_serializing_if = "Option::is_none")]
    pub client_data_json: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<Vec<u8>>,
    #[serde(rename = "userHandle", default, skip_serializing_if = "Option::is_none")]
    pub user_handle: Option<Vec<u8>>,
}

/// Wire form of [`AuthenticatorAssertionResponse`].
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionResponseJson {
    #[serde(rename = "authenticatorData", default, skip_serializing_if = "Option::is_none")]
    pub authenticator_data: Option<String>,
    #[serde(rename = "clientDataJSON", default, skip_serializing_if = "Option::is_none")]
    pub client_data_json: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(rename = "userHandle", default, skip_serializing_if = "Option::is_none")]
    pub user_handle: Option<String>,
}

impl AuthenticatorResponse for AuthenticatorAssertionResponse {
    type Json = AssertionResponseJson;

    fn encode(&self, transcoder: &Transcoder) -> AssertionResponseJson {
        AssertionResponseJson {
            authenticator_data: transcoder.encode_optional(self.authenticator_data.as_deref()),
            client_data_json: transcoder.encode_optional(self.client_data_json.as_deref()),
            signature: transcoder.encode_optional(self.signature.as_deref()),
            user_handle: transcoder.encode_optional(self.user_handle.as_deref()),
        }
    }
}

impl Transcoder {
    /// Turns request options received from the backend into options for the
    /// platform's credential get call.
    ///
    /// `publicKey.challenge` is decoded unless missing or empty. Every
    /// `allowCredentials` entry has its `id` decoded, order preserved; an
    /// `allowCredentials` that is not a list is copied as is.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::InvalidBase64`] for malformed text,
    /// [`DecodeError::NotBinary`] for a binary field holding some other JSON
    /// value, and [`DecodeError::MissingCredentialId`] for an entry that is
    /// not an object or has no `id`.
    pub fn decode_credential_request(
        &self,
        req: &CredentialRequestOptions,
    ) -> Result<CredentialRequestOptions, DecodeError> {
        let public_key = match &req.public_key {
            Some(public_key) => Some(public_key.try_map(|public_key| {
                self.decode_request_public_key(public_key)
            })?),
            None => None,
        };
        Ok(CredentialRequestOptions {
            public_key,
            extra: req.extra.clone(),
        })
    }

    fn decode_request_public_key(
        &self,
        public_key: &PublicKeyCredentialRequestOptions,
    ) -> Result<PublicKeyCredentialRequestOptions, DecodeError> {
        let challenge =
            self.decode_optional("publicKey.challenge", public_key.challenge.as_ref())?;
        let allow_credentials = match &public_key.allow_credentials {
            Some(list) => Some(list.try_map(|descriptors| {
                descriptors
                    .iter()
                    .enumerate()
                    .map(|(index, descriptor)| self.decode_descriptor(index, descriptor))
                    .collect::<Result<Vec<_>, _>>()
            })?),
            None => None,
        };
        Ok(PublicKeyCredentialRequestOptions {
            challenge,
            allow_credentials,
            extra: public_key.extra.clone(),
        })
    }

    /// Each entry stands on its own: an entry that is not an object, or has no
    /// `id`, fails the whole request instead of being passed through.
    fn decode_descriptor(
        &self,
        index: usize,
        descriptor: &Nested<PublicKeyCredentialDescriptor>,
    ) -> Result<Nested<PublicKeyCredentialDescriptor>, DecodeError> {
        let Nested::Object(descriptor) = descriptor else {
            warn!("allowCredentials[{index}] is not an object");
            return Err(DecodeError::MissingCredentialId { index });
        };
        let id = descriptor
            .id
            .as_ref()
            .ok_or(DecodeError::MissingCredentialId { index })?;
        let field = format!("publicKey.allowCredentials[{index}].id");
        Ok(Nested::Object(PublicKeyCredentialDescriptor {
            id: Some(self.decode_leaf(&field, id)?),
            extra: descriptor.extra.clone(),
        }))
    }

    /// Turns the result of an assertion ceremony into the envelope sent back
    /// to the backend.
    ///
    /// Only `authenticatorData`, `clientDataJSON`, `signature` and
    /// `userHandle` are kept in `response`; members missing from the source
    /// are left out of the output.
    pub fn encode_credential_response(
        &self,
        src: &PublicKeyCredential<AuthenticatorAssertionResponse>,
    ) -> PublicKeyCredentialJson<AssertionResponseJson> {
        self.encode_response(src)
    }
}
