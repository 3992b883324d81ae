//! The transcoder: byte <-> base64 primitives and the response envelope.

use base64::alphabet;
use base64::engine::general_purpose::{
    GeneralPurpose, GeneralPurposeConfig, STANDARD, STANDARD_NO_PAD, URL_SAFE, URL_SAFE_NO_PAD,
};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::binary::Binary;
use crate::error::DecodeError;
use crate::options::Options;

/// Standard alphabet, padding optional, trailing bits ignored. Input is
/// normalized to this alphabet before decoding. Partial padding is rejected
/// separately in [`Transcoder::decode`].
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Converts binary fields of WebAuthn envelopes between raw buffers and
/// base64 text.
///
/// Stateless apart from its [`Options`]; every operation borrows its input and
/// returns a freshly built value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Transcoder {
    options: Options,
}

impl Transcoder {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    pub fn options(&self) -> Options {
        self.options
    }

    /// Encodes bytes as base64 in the configured alphabet and padding.
    ///
    /// # Example
    ///
    /// ```
    /// use webauthn_encoding::{Options, Transcoder};
    ///
    /// assert_eq!(Transcoder::default().encode(&[0xfb, 0xff]), "+/8=");
    /// assert_eq!(Transcoder::new(Options::url_safe_no_pad()).encode(&[0xfb, 0xff]), "-_8");
    /// ```
    pub fn encode(&self, bytes: &[u8]) -> String {
        let engine = match (self.options.base64_safe, self.options.base64_no_padding) {
            (false, false) => &STANDARD,
            (false, true) => &STANDARD_NO_PAD,
            (true, false) => &URL_SAFE,
            (true, true) => &URL_SAFE_NO_PAD,
        };
        engine.encode(bytes)
    }

    /// Decodes base64 text in either alphabet, with or without padding.
    ///
    /// ASCII whitespace is skipped. Padding may be left out entirely, but if
    /// present it must be complete (`"AA=="`, not `"AA="`). The configured
    /// options play no part here.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::InvalidBase64`] when the text holds a symbol
    /// outside the alphabet or has an impossible length or padding.
    ///
    /// # Example
    ///
    /// ```
    /// use webauthn_encoding::Transcoder;
    ///
    /// let transcoder = Transcoder::default();
    /// assert_eq!(transcoder.decode("-_8").unwrap(), vec![0xfb, 0xff]);
    /// assert_eq!(transcoder.decode("+/8=").unwrap(), vec![0xfb, 0xff]);
    /// assert!(transcoder.decode("not base64!!").is_err());
    /// ```
    pub fn decode(&self, text: &str) -> Result<Vec<u8>, DecodeError> {
        let normalized: String = text
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .map(|c| match c {
                '-' => '+',
                '_' => '/',
                other => other,
            })
            .collect();
        // Padding, when present, must complete the last quantum.
        if normalized.ends_with('=') && normalized.len() % 4 != 0 {
            return Err(base64::DecodeError::InvalidPadding.into());
        }
        Ok(LENIENT.decode(normalized)?)
    }

    /// Decodes a text leaf; raw leaves are already in platform form.
    pub(crate) fn decode_leaf(&self, field: &str, leaf: &Binary) -> Result<Binary, DecodeError> {
        match leaf {
            Binary::Text(text) => match self.decode(text) {
                Ok(bytes) => {
                    debug!("decoded {field} ({} bytes)", bytes.len());
                    Ok(Binary::Raw(bytes))
                }
                Err(err) => {
                    warn!("failed to decode {field}: {err}");
                    Err(err)
                }
            },
            Binary::Raw(bytes) => Ok(Binary::Raw(bytes.clone())),
            Binary::Other(value) => {
                warn!("failed to decode {field}: unexpected {value}");
                Err(DecodeError::NotBinary {
                    field: field.to_string(),
                })
            }
        }
    }

    /// Like [`Transcoder::decode_leaf`], but absent and empty leaves are
    /// copied as they are.
    pub(crate) fn decode_optional(
        &self,
        field: &str,
        leaf: Option<&Binary>,
    ) -> Result<Option<Binary>, DecodeError> {
        match leaf {
            Some(leaf) if !leaf.is_empty() => self.decode_leaf(field, leaf).map(Some),
            other => {
                debug!("skipping {field}");
                Ok(other.cloned())
            }
        }
    }

    /// Encodes a response buffer if it is present and non-empty.
    pub(crate) fn encode_optional(&self, bytes: Option<&[u8]>) -> Option<String> {
        bytes
            .filter(|bytes| !bytes.is_empty())
            .map(|bytes| self.encode(bytes))
    }

    /// Converts a ceremony result into its JSON wire envelope.
    ///
    /// `id` and `type` are copied, `rawId` is encoded when present, and the
    /// response keeps only the members its [`AuthenticatorResponse`]
    /// implementation lists.
    pub fn encode_response<R: AuthenticatorResponse>(
        &self,
        src: &PublicKeyCredential<R>,
    ) -> PublicKeyCredentialJson<R::Json> {
        PublicKeyCredentialJson {
            id: src.id.clone(),
            raw_id: self.encode_optional(src.raw_id.as_deref()),
            r#type: src.r#type.clone(),
            response: src.response.as_ref().map(|response| response.encode(self)),
        }
    }
}

/// An authenticator response as returned by the platform, with raw buffers.
pub trait AuthenticatorResponse {
    /// The wire form with base64 members.
    type Json;

    fn encode(&self, transcoder: &Transcoder) -> Self::Json;
}

/// A ceremony result as produced by the platform credential API.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKeyCredential<R> {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "rawId", default, skip_serializing_if = "Option::is_none")]
    pub raw_id: Option<Vec<u8>>,
    #[serde(default)]
    pub r#type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<R>,
}

/// A ceremony result ready to be sent to the backend.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKeyCredentialJson<R> {
    pub id: String,
    #[serde(rename = "rawId", default, skip_serializing_if = "Option::is_none")]
    pub raw_id: Option<String>,
    pub r#type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<R>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_options() -> Vec<Options> {
        let mut all = Vec::new();
        for base64_safe in [false, true] {
            for base64_no_padding in [false, true] {
                all.push(Options {
                    base64_safe,
                    base64_no_padding,
                });
            }
        }
        all
    }

    #[test]
    fn test_encode_empty() {
        for options in all_options() {
            assert_eq!(Transcoder::new(options).encode(b""), "");
        }
    }

    #[test]
    fn test_decode_empty() {
        assert_eq!(Transcoder::default().decode("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_encode_variants() {
        let bytes = [0xfb, 0xef, 0xff, 0x01];
        let expect = [
            (Options::default(), "++//AQ=="),
            (
                Options {
                    base64_safe: false,
                    base64_no_padding: true,
                },
                "++//AQ",
            ),
            (
                Options {
                    base64_safe: true,
                    base64_no_padding: false,
                },
                "--__AQ==",
            ),
            (Options::url_safe_no_pad(), "--__AQ"),
        ];
        for (options, text) in expect {
            assert_eq!(Transcoder::new(options).encode(&bytes), text, "{options:?}");
        }
    }

    #[test]
    fn test_decode_ignores_options() {
        for options in all_options() {
            let transcoder = Transcoder::new(options);
            for text in ["++//AQ==", "++//AQ", "--__AQ==", "--__AQ", "-+_/AQ"] {
                assert_eq!(transcoder.decode(text).unwrap(), vec![0xfb, 0xef, 0xff, 0x01]);
            }
        }
    }

    #[test]
    fn test_decode_skips_whitespace() {
        let transcoder = Transcoder::default();
        assert_eq!(transcoder.decode(" Zm9v\nYmFy ").unwrap(), b"foobar");
    }

    #[test]
    fn test_decode_ignores_trailing_bits() {
        // "Zh" carries a non-zero bit after the single decoded byte.
        assert_eq!(Transcoder::default().decode("Zh").unwrap(), b"f");
    }

    #[test]
    fn test_decode_invalid() {
        let transcoder = Transcoder::default();
        assert!(matches!(
            transcoder.decode("not base64!!"),
            Err(DecodeError::InvalidBase64(_))
        ));
        assert!(transcoder.decode("Z").is_err());
        assert!(transcoder.decode("Zg=a").is_err());
    }

    #[test]
    fn test_decode_rejects_partial_padding() {
        let transcoder = Transcoder::default();
        assert_eq!(
            transcoder.decode("AA="),
            Err(DecodeError::InvalidBase64(base64::DecodeError::InvalidPadding))
        );
        assert!(transcoder.decode("AAA==").is_err());
        assert_eq!(transcoder.decode("AA==").unwrap(), vec![0]);
        assert_eq!(transcoder.decode("AA").unwrap(), vec![0]);
    }

    #[test]
    fn test_decode_leaf_rejects_other_values() {
        let transcoder = Transcoder::default();
        let err = transcoder
            .decode_leaf("publicKey.challenge", &Binary::Other(serde_json::json!(5)))
            .unwrap_err();
        assert_eq!(
            err,
            DecodeError::NotBinary {
                field: "publicKey.challenge".to_string()
            }
        );
    }

    #[test]
    fn test_decode_optional_keeps_falsy_other_values() {
        let transcoder = Transcoder::default();
        for value in [serde_json::json!(null), serde_json::json!(false)] {
            let leaf = Binary::Other(value);
            assert_eq!(transcoder.decode_optional("x", Some(&leaf)).unwrap(), Some(leaf));
        }
        assert!(transcoder
            .decode_optional("x", Some(&Binary::Other(serde_json::json!(true))))
            .is_err());
    }

    #[test]
    fn test_decode_optional_skips_empty() {
        let transcoder = Transcoder::default();
        assert_eq!(transcoder.decode_optional("x", None).unwrap(), None);
        assert_eq!(
            transcoder.decode_optional("x", Some(&Binary::from(""))).unwrap(),
            Some(Binary::from(""))
        );
        assert_eq!(
            transcoder.decode_optional("x", Some(&Binary::from("AQ=="))).unwrap(),
            Some(Binary::Raw(vec![1]))
        );
    }

    #[test]
    fn test_encode_optional_skips_empty() {
        let transcoder = Transcoder::default();
        assert_eq!(transcoder.encode_optional(None), None);
        assert_eq!(transcoder.encode_optional(Some(&[][..])), None);
        assert_eq!(transcoder.encode_optional(Some(&[1u8][..])), Some("AQ==".to_string()));
    }
}
