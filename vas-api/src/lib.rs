// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//!  HTTP transport for the [Chrome Verified Access API](https://developers.google.com/chrome/verified-access/reference/rest).
//!
//!  [`api::ChallengeApi`] implements [`ChallengeService`](verified_access::service::ChallengeService)
//!  on top of a blocking `ureq` agent. Credentials are minted by the caller: pass an OAuth
//!  access token with the `verifiedaccess` scope, or an API key. API key clients can usually
//!  only create challenges, verification requires a token.
//!
//!  #
//!  ```no_run
//!  use vas_api::api::ChallengeApi;
//!  use vas_api::Vas;
//!  use std::error::Error;
//!
//!  fn main() -> Result<(), Box<dyn Error>> {
//!    let token = std::env::var("VAS_ACCESS_TOKEN")?;
//!    let vas = Vas::new(ChallengeApi::with_bearer_token(token));
//!
//!    let challenge = vas.get_challenge()?;
//!    println!("{challenge}");
//!    Ok(())
//!  }
//!  ```

pub use verified_access::{envelope, service, Vas, VasError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HttpError {
    #[error("HTTP error")]
    Http(#[from] Box<ureq::Error>),
    #[error("failed to read HTTP response")]
    Io(#[from] std::io::Error),
}

pub mod api;
