// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//!  This library brokers the challenge/response handshake of the [Chrome Verified Access API](https://developers.google.com/chrome/verified-access).
//!
//!  The service hands out challenges as two base64 fields, `data` and `signature`. A ChromeOS
//!  device expects them joined into one serialized `SignedData` message, and answers with the
//!  same kind of message. [`Vas`] does the conversion both ways: `get_challenge()` returns a
//!  token to forward to the device, `verify_response()` splits the device's answer up again and
//!  asks the service to check it. No signature is checked locally.
//!
//!  #
//!  ```no_run
//!  use verified_access::service::ChallengeService;
//!  use verified_access::Vas;
//!  use std::error::Error;
//!
//!  fn handshake<S: ChallengeService>(vas: &Vas<S>) -> Result<String, Box<dyn Error>> {
//!    let challenge = vas.get_challenge()?;
//!
//!    // `challenge` goes to the device, which returns `response`
//!    let response = send_to_device(&challenge)?;
//!
//!    let device_id = vas.verify_response(&response, "example.com")?;
//!    Ok(device_id)
//!  }
//!  # fn send_to_device(_: &str) -> Result<String, Box<dyn Error>> { unimplemented!() }
//!  ```

pub mod challenge;
pub mod envelope;
pub mod service;

pub use challenge::{Vas, VasError};
pub use envelope::{pack, unpack, DecodeError, SignedData};
