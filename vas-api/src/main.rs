// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use clap::Parser;
use log::info;
use std::error::Error;
use vas_api::api::{ChallengeApi, Credential, VAS_ENDPOINT};
use vas_api::{envelope, Vas};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Verified Access service base URL
    #[arg(short, long, default_value = VAS_ENDPOINT)]
    endpoint: String,

    /// OAuth access token with the verifiedaccess scope
    #[arg(short, long, env = "VAS_ACCESS_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// API key, used when no access token is given
    #[arg(short = 'k', long, env = "VAS_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(clap::Subcommand)]
enum Action {
    /// Print a fresh challenge token for a device
    Challenge,
    /// Verify a device's response and print its permanent id
    Verify {
        /// Base64 response token from the device
        #[arg(short, long)]
        response: String,

        /// Expected user email, or device domain
        #[arg(short = 'i', long, default_value = "")]
        expected_identity: String,
    },
    /// Unpack a challenge or response token without contacting the service
    Inspect {
        /// Base64 token
        token: String,
    },
}

impl Args {
    fn credential(&self) -> Result<Credential, Box<dyn Error>> {
        match (&self.token, &self.api_key) {
            (Some(token), _) => Ok(Credential::BearerToken(token.clone())),
            (None, Some(key)) => Ok(Credential::ApiKey(key.clone())),
            (None, None) => Err("either --token or --api-key is required".into()),
        }
    }

    fn vas(&self) -> Result<Vas<ChallengeApi>, Box<dyn Error>> {
        let api = ChallengeApi::new(self.credential()?).with_endpoint(&self.endpoint);
        Ok(Vas::new(api))
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    match &args.action {
        Action::Challenge => {
            let challenge = args.vas()?.get_challenge()?;
            println!("{challenge}");
        }
        Action::Verify {
            response,
            expected_identity,
        } => {
            let device_id = args.vas()?.verify_response(response, expected_identity)?;
            info!("challenge response verified");
            println!("{device_id}");
        }
        Action::Inspect { token } => {
            let signed_data = envelope::unpack(token)?;
            println!("data: {}", hex::encode(signed_data.data()));
            println!("signature: {}", hex::encode(signed_data.signature()));
        }
    }

    Ok(())
}
