// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use super::{Vas, VasError};
use crate::envelope::SignedData;
use crate::service::{ChallengeService, VerifyChallengeResponseRequest, VerifyChallengeResponseResult};
use log::{debug, warn};

impl<S: ChallengeService> Vas<S> {
    /// Verify a response token produced by `challengeMachineKey` or
    /// `challengeUserKey` and return the device's permanent id.
    ///
    /// # Arguments
    ///
    /// * `response` - The base64 serialized ArrayBuffer sent by the device
    ///
    /// * `expected_identity` - The user's email when verifying a user key. For
    ///   device keys this may be empty or name the domain the device belongs to.
    ///
    /// A token that does not decode fails with [`VasError::Decode`] before the
    /// service is contacted. Everything the service rejects, whatever the
    /// reason, is a [`VasError::Transport`].
    pub fn verify_response(
        &self,
        response: &str,
        expected_identity: &str,
    ) -> Result<String, VasError> {
        let result = self.verify_response_full(response, expected_identity)?;
        Ok(result.device_permanent_id)
    }

    /// Like [`Vas::verify_response`], but returns everything the service
    /// reported.
    pub fn verify_response_full(
        &self,
        response: &str,
        expected_identity: &str,
    ) -> Result<VerifyChallengeResponseResult, VasError> {
        let signed_data = SignedData::from_token(response).map_err(|err| {
            warn!("response token could not be unpacked: {err}");
            err
        })?;

        let request = VerifyChallengeResponseRequest {
            challenge_response: signed_data.to_encoded(),
            expected_identity: expected_identity.to_owned(),
        };

        debug!("verifying challenge response");
        let result = self
            .service
            .verify_challenge_response(&request)
            .map_err(VasError::transport)?;
        Ok(result)
    }
}
