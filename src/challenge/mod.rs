// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::envelope::{DecodeError, EnvelopeError};
use crate::service::ChallengeService;
use thiserror::Error;

#[cfg(feature = "issuer")]
use log::{debug, warn};

#[cfg(feature = "verifier")]
mod verify;

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum VasError {
    #[error("challenge service error")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("decode error")]
    Decode(#[from] DecodeError),
    #[error("envelope serialization error")]
    Encode(#[from] prost::EncodeError),
}

impl From<EnvelopeError> for VasError {
    fn from(err: EnvelopeError) -> Self {
        match err {
            EnvelopeError::Decode(err) => Self::Decode(err),
            EnvelopeError::Encode(err) => Self::Encode(err),
        }
    }
}

impl VasError {
    fn transport<E: std::error::Error + Send + Sync + 'static>(err: E) -> Self {
        Self::Transport(Box::new(err))
    }
}

/// Handle to the Verified Access service.
///
/// Holds no per-call state, so one value can serve any number of
/// concurrent `get_challenge` and `verify_response` calls.
#[derive(Clone, Debug)]
pub struct Vas<S> {
    service: S,
}

impl<S: ChallengeService> Vas<S> {
    /// Wrap a challenge service constructed by the caller, e.g. one
    /// authenticated with an API key or an OAuth access token.
    pub fn new(service: S) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Fetch a fresh challenge and return it as a single base64 token.
    ///
    /// The token is to be handed verbatim to the device, which decodes it
    /// into an ArrayBuffer for `chrome.enterprise.platformKeys.challengeMachineKey`
    /// or `challengeUserKey`.
    #[cfg(feature = "issuer")]
    pub fn get_challenge(&self) -> Result<String, VasError> {
        debug!("requesting challenge");
        let response = self
            .service
            .create_challenge()
            .map_err(VasError::transport)?;

        let challenge = &response.challenge;
        let token = crate::envelope::pack(&challenge.data, &challenge.signature).map_err(|err| {
            warn!("challenge from service could not be packed: {err}");
            err
        })?;
        Ok(token)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::envelope::{EncodedSignedData, SignedData};
    use crate::service::{Challenge, VerifyChallengeResponseRequest, VerifyChallengeResponseResult};
    use std::sync::Mutex;

    #[derive(Error, Debug)]
    #[error("service unavailable")]
    pub struct Unavailable;

    /// In-memory stand-in for the remote service, recording verify requests.
    #[derive(Default)]
    pub struct FakeService {
        pub challenge: Option<Challenge>,
        pub device_id: Option<String>,
        pub requests: Mutex<Vec<VerifyChallengeResponseRequest>>,
    }

    impl ChallengeService for FakeService {
        type Error = Unavailable;

        fn create_challenge(&self) -> Result<Challenge, Unavailable> {
            self.challenge.clone().ok_or(Unavailable)
        }

        fn verify_challenge_response(
            &self,
            request: &VerifyChallengeResponseRequest,
        ) -> Result<VerifyChallengeResponseResult, Unavailable> {
            self.requests.lock().unwrap().push(request.clone());
            let device_permanent_id = self.device_id.clone().ok_or(Unavailable)?;
            Ok(VerifyChallengeResponseResult {
                device_permanent_id,
                ..Default::default()
            })
        }
    }

    fn challenge(data: &str, signature: &str) -> Challenge {
        Challenge {
            challenge: EncodedSignedData {
                data: data.into(),
                signature: signature.into(),
            },
        }
    }

    #[cfg(feature = "issuer")]
    #[test]
    fn get_challenge_packs_response() {
        let service = FakeService {
            challenge: Some(challenge("YQ==", "Yg==")),
            ..Default::default()
        };
        let vas = Vas::new(service);

        let token = vas.get_challenge().unwrap();
        let signed_data = SignedData::from_token(&token).unwrap();
        assert_eq!(signed_data.data(), b"a");
        assert_eq!(signed_data.signature(), b"b");
    }

    #[cfg(feature = "issuer")]
    #[test]
    fn get_challenge_service_failure() {
        let vas = Vas::new(FakeService::default());
        let error = vas.get_challenge().unwrap_err();
        assert!(
            matches!(error, VasError::Transport(_)),
            "Expected transport error"
        );
        let source = std::error::Error::source(&error).unwrap();
        assert!(source.is::<Unavailable>());
    }

    #[cfg(feature = "issuer")]
    #[test]
    fn get_challenge_bad_base64() {
        let service = FakeService {
            challenge: Some(challenge("YQ==", "%%%")),
            ..Default::default()
        };
        let vas = Vas::new(service);
        let error = vas.get_challenge().unwrap_err();
        assert!(
            matches!(error, VasError::Decode(DecodeError::Base64(_))),
            "Expected decode error"
        );
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn shareable_across_threads() {
        assert_send_sync::<Vas<FakeService>>();
        assert_send_sync::<Vas<&FakeService>>();
        assert_send_sync::<VasError>();
    }

    #[cfg(feature = "issuer")]
    #[test]
    fn concurrent_get_challenge() {
        let service = FakeService {
            challenge: Some(challenge("YQ==", "Yg==")),
            ..Default::default()
        };
        let vas = Vas::new(service);

        let tokens: Vec<String> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| vas.get_challenge().unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        assert!(tokens.iter().all(|token| token == "CgFhEgFi"));
    }
}
