// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use prost::Message;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("base64 decode error")]
    Base64(#[from] base64::DecodeError),
    #[error("envelope parse error")]
    Envelope(#[from] prost::DecodeError),
}

#[derive(Error, Debug)]
pub enum EnvelopeError {
    #[error("decode error")]
    Decode(#[from] DecodeError),
    #[error("envelope serialization error")]
    Encode(#[from] prost::EncodeError),
}

/// A payload and the signature over it, as the device-side attestation
/// primitive expects them: one protobuf message with `data` in field 1 and
/// `signature` in field 2.
///
/// Fields missing from a parsed message read as empty, unknown fields are
/// skipped. Nothing about the signature is checked here.
#[derive(Clone, PartialEq, Eq, Hash, Message)]
pub struct SignedData {
    #[prost(bytes = "vec", tag = "1")]
    data: Vec<u8>,
    #[prost(bytes = "vec", tag = "2")]
    signature: Vec<u8>,
}

/// The same pair as it travels in the remote service's JSON, each field
/// standard base64 encoded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedSignedData {
    pub data: String,
    pub signature: String,
}

impl SignedData {
    pub fn new(data: Vec<u8>, signature: Vec<u8>) -> Self {
        Self { data, signature }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Split into `(data, signature)`.
    pub fn into_parts(self) -> (Vec<u8>, Vec<u8>) {
        (self.data, self.signature)
    }

    /// Decode the two base64 fields of a wire-level pair.
    pub fn from_encoded(encoded: &EncodedSignedData) -> Result<Self, DecodeError> {
        let data = STANDARD.decode(&encoded.data)?;
        let signature = STANDARD.decode(&encoded.signature)?;
        Ok(Self::new(data, signature))
    }

    /// Encode both fields as standard base64 for the remote service.
    pub fn to_encoded(&self) -> EncodedSignedData {
        EncodedSignedData {
            data: STANDARD.encode(&self.data),
            signature: STANDARD.encode(&self.signature),
        }
    }

    /// Parse a base64 token holding the serialized message.
    pub fn from_token(token: &str) -> Result<Self, DecodeError> {
        let bytes = STANDARD.decode(token)?;
        let signed_data = Self::decode(bytes.as_slice())?;
        Ok(signed_data)
    }

    /// Serialize the message and base64 encode it into a single token.
    pub fn to_token(&self) -> Result<String, prost::EncodeError> {
        let mut bytes = Vec::with_capacity(self.encoded_len());
        self.encode(&mut bytes)?;
        Ok(STANDARD.encode(bytes))
    }
}

/// Join two separately base64 encoded fields into one base64 token.
pub fn pack(data: &str, signature: &str) -> Result<String, EnvelopeError> {
    let encoded = EncodedSignedData {
        data: data.to_owned(),
        signature: signature.to_owned(),
    };
    let signed_data = SignedData::from_encoded(&encoded)?;
    let token = signed_data.to_token()?;
    Ok(token)
}

/// Split a base64 token back into its raw `data` and `signature`.
pub fn unpack(token: &str) -> Result<SignedData, DecodeError> {
    SignedData::from_token(token)
}
