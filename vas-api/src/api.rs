// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::HttpError;
use log::debug;
use std::fmt;
use verified_access::service::{
    Challenge, ChallengeService, VerifyChallengeResponseRequest, VerifyChallengeResponseResult,
};

pub const VAS_ENDPOINT: &str = "https://verifiedaccess.googleapis.com";
const CHALLENGE_PATH: &str = "/v1/challenge";
const VERIFY_PATH: &str = "/v1/challenge:verify";

#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// OAuth access token, sent as `Authorization: Bearer`.
    BearerToken(String),
    /// API key, sent in the `X-Goog-Api-Key` header so it stays out of
    /// request URLs and the errors that quote them.
    ApiKey(String),
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BearerToken(_) => f.write_str("BearerToken(..)"),
            Self::ApiKey(_) => f.write_str("ApiKey(..)"),
        }
    }
}

/// Authenticated client for the Verified Access challenge endpoints.
///
/// Cloning is cheap, clones share the underlying connection pool.
#[derive(Clone, Debug)]
pub struct ChallengeApi {
    agent: ureq::Agent,
    endpoint: String,
    credential: Credential,
}

impl ChallengeApi {
    pub fn new(credential: Credential) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
            endpoint: VAS_ENDPOINT.to_string(),
            credential,
        }
    }

    pub fn with_bearer_token(token: impl Into<String>) -> Self {
        Self::new(Credential::BearerToken(token.into()))
    }

    pub fn with_api_key(key: impl Into<String>) -> Self {
        Self::new(Credential::ApiKey(key.into()))
    }

    /// Use a different service base URL, e.g. a proxy or a test server.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        let endpoint: String = endpoint.into();
        self.endpoint = endpoint.trim_end_matches('/').to_string();
        self
    }

    /// Use a preconfigured agent. Timeouts and proxies are set there.
    pub fn with_agent(mut self, agent: ureq::Agent) -> Self {
        self.agent = agent;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn post(&self, path: &str) -> ureq::Request {
        let url = format!("{}{path}", self.endpoint);
        let request = self.agent.post(&url);
        match &self.credential {
            Credential::BearerToken(token) => {
                request.set("Authorization", &format!("Bearer {token}"))
            }
            Credential::ApiKey(key) => request.set("X-Goog-Api-Key", key),
        }
    }
}

impl ChallengeService for ChallengeApi {
    type Error = HttpError;

    fn create_challenge(&self) -> Result<Challenge, HttpError> {
        debug!("POST {}{CHALLENGE_PATH}", self.endpoint);
        let challenge: Challenge = self
            .post(CHALLENGE_PATH)
            .send_json(ureq::json!({}))
            .map_err(Box::new)?
            .into_json()?;
        Ok(challenge)
    }

    fn verify_challenge_response(
        &self,
        request: &VerifyChallengeResponseRequest,
    ) -> Result<VerifyChallengeResponseResult, HttpError> {
        debug!("POST {}{VERIFY_PATH}", self.endpoint);
        let result: VerifyChallengeResponseResult = self
            .post(VERIFY_PATH)
            .send_json(request)
            .map_err(Box::new)?
            .into_json()?;
        Ok(result)
    }
}
