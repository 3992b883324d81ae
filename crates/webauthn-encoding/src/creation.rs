//! Registration: `navigator.credentials.create()` options and results.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::binary::{present, Binary, Nested};
use crate::error::DecodeError;
use crate::transcoder::{
    AuthenticatorResponse, PublicKeyCredential, PublicKeyCredentialJson, Transcoder,
};

/// Options for a credential creation ceremony.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialCreationOptions {
    #[serde(
        rename = "publicKey",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub public_key: Option<Nested<PublicKeyCredentialCreationOptions>>,
    /// Members other than `publicKey`, such as `signal`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicKeyCredentialCreationOptions {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub challenge: Option<Binary>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub user: Option<Nested<PublicKeyCredentialUserEntity>>,
    /// `rp`, `pubKeyCredParams`, `timeout`, `excludeCredentials`,
    /// `authenticatorSelection`, `attestation`, `extensions`, ...
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicKeyCredentialUserEntity {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub id: Option<Binary>,
    /// `name`, `displayName`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of a creation ceremony, as produced by the authenticator.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatorAttestationResponse {
    #[serde(rename = "attestationObject", default, skip_serializing_if = "Option::is_none")]
    pub attestation_object: Option<Vec<u8>>,
    #[serde(rename = "clientDataJSON", default, skip_serializing_if = "Option::is_none")]
    pub client_data_json: Option<Vec<u8>>,
}

/// Wire form of [`AuthenticatorAttestationResponse`].
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttestationResponseJson {
    #[serde(rename = "attestationObject", default, skip_serializing_if = "Option::is_none")]
    pub attestation_object: Option<String>,
    #[serde(rename = "clientDataJSON", default, skip_serializing_if = "Option::is_none")]
    pub client_data_json: Option<String>,
}

impl AuthenticatorResponse for AuthenticatorAttestationResponse {
    type Json = AttestationResponseJson;

    fn encode(&self, transcoder: &Transcoder) -> AttestationResponseJson {
        AttestationResponseJson {
            attestation_object: transcoder.encode_optional(self.attestation_object.as_deref()),
            client_data_json: transcoder.encode_optional(self.client_data_json.as_deref()),
        }
    }
}

impl Transcoder {
    /// Turns creation options received from the backend into options for the
    /// platform's credential creation call.
    ///
    /// `publicKey.challenge` and `publicKey.user.id` become raw buffers; every
    /// other member is copied unchanged. Missing, empty, `null` or oddly
    /// shaped members are copied as they are.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] if either field is not valid base64, or holds
    /// a truthy JSON value that is neither text nor a byte array.
    pub fn decode_creation_request(
        &self,
        req: &CredentialCreationOptions,
    ) -> Result<CredentialCreationOptions, DecodeError> {
        let public_key = match &req.public_key {
            Some(public_key) => Some(public_key.try_map(|public_key| {
                self.decode_creation_public_key(public_key)
            })?),
            None => None,
        };
        Ok(CredentialCreationOptions {
            public_key,
            extra: req.extra.clone(),
        })
    }

    fn decode_creation_public_key(
        &self,
        public_key: &PublicKeyCredentialCreationOptions,
    ) -> Result<PublicKeyCredentialCreationOptions, DecodeError> {
        let challenge =
            self.decode_optional("publicKey.challenge", public_key.challenge.as_ref())?;
        let user = match &public_key.user {
            Some(user) => Some(user.try_map(|user| {
                Ok::<_, DecodeError>(PublicKeyCredentialUserEntity {
                    id: self.decode_optional("publicKey.user.id", user.id.as_ref())?,
                    extra: user.extra.clone(),
                })
            })?),
            None => None,
        };
        Ok(PublicKeyCredentialCreationOptions {
            challenge,
            user,
            extra: public_key.extra.clone(),
        })
    }

    /// Turns the result of a creation ceremony into the envelope sent back to
    /// the backend.
    ///
    /// Only `attestationObject` and `clientDataJSON` are kept in `response`;
    /// members missing from the source are left out of the output.
    pub fn encode_creation_response(
        &self,
        src: &PublicKeyCredential<AuthenticatorAttestationResponse>,
    ) -> PublicKeyCredentialJson<AttestationResponseJson> {
        self.encode_response(src)
    }
}
