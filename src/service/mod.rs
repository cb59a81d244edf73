// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::envelope::EncodedSignedData;
use serde::{Deserialize, Serialize};

/// Body of a challenge creation response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub challenge: EncodedSignedData,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyChallengeResponseRequest {
    pub challenge_response: EncodedSignedData,
    /// User email for user keys, optionally a domain for device keys.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub expected_identity: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyChallengeResponseResult {
    #[serde(default)]
    pub device_permanent_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signed_public_key_and_challenge: Option<String>,
}

/// The two calls the remote Verified Access service offers.
///
/// Implementations carry their own authenticated transport. Any failure,
/// including a rejected signature or an identity mismatch, is reported
/// through `Self::Error`.
pub trait ChallengeService {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Request a fresh challenge. The request body is empty.
    fn create_challenge(&self) -> Result<Challenge, Self::Error>;

    /// Ask the service to check a signed challenge response.
    fn verify_challenge_response(
        &self,
        request: &VerifyChallengeResponseRequest,
    ) -> Result<VerifyChallengeResponseResult, Self::Error>;
}

impl<S: ChallengeService + ?Sized> ChallengeService for &S {
    type Error = S::Error;

    fn create_challenge(&self) -> Result<Challenge, Self::Error> {
        (**self).create_challenge()
    }

    fn verify_challenge_response(
        &self,
        request: &VerifyChallengeResponseRequest,
    ) -> Result<VerifyChallengeResponseResult, Self::Error> {
        (**self).verify_challenge_response(request)
    }
}
