//! Send a one-time code by SMS and check the code the user typed back.
//!
//! # Running
//!
//! ```bash
//! export TELESIGN_CUSTOMER_ID="your-customer-id"
//! export TELESIGN_API_KEY="your-base64-api-key"
//! cargo run --example verify_sms -- 15555551234
//! ```
//!
//! The example reads the code from stdin once the SMS arrives.

use std::io::BufRead;
use telesign_auth::{
    generate_code, ClientConfig, SmsOptions, TelesignClient, TelesignError, UseCaseCode, Verify,
};

fn main() {
    let customer_id =
        std::env::var("TELESIGN_CUSTOMER_ID").expect("Set TELESIGN_CUSTOMER_ID environment variable");
    let api_key = std::env::var("TELESIGN_API_KEY").expect("Set TELESIGN_API_KEY environment variable");
    let phone_number = std::env::args()
        .nth(1)
        .expect("Usage: verify_sms <phone_number>");

    let config = ClientConfig::new(customer_id, api_key);
    let client = match TelesignClient::new(&config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let options = SmsOptions {
        verify_code: Some(generate_code(5).expect("non-zero length")),
        use_case_code: Some(UseCaseCode::Atck),
        ..SmsOptions::default()
    };

    let verify = Verify::new(&client);
    let sent = match verify.sms(&phone_number, &options) {
        Ok(response) => response,
        Err(e) => {
            report(&e);
            std::process::exit(1);
        }
    };

    let Some(reference_id) = sent.reference_id() else {
        eprintln!("No reference_id in response: {}", sent.raw_body);
        std::process::exit(1);
    };
    println!("SMS sent, reference_id {}", reference_id);

    print!("Enter the code you received: ");
    std::io::Write::flush(&mut std::io::stdout()).ok();
    let mut entered = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut entered)
        .expect("read from stdin");
    let entered = entered.trim();

    // The service checks the code; the local copy is only for display.
    match verify.status(reference_id, Some(entered), None) {
        Ok(status) => {
            println!("Service status: {:?}", status.status_code());
            if sent.verify_code.as_deref() == Some(entered) {
                println!("Code matches what was sent.");
            } else {
                println!("Code does not match.");
            }
        }
        Err(e) => {
            report(&e);
            std::process::exit(1);
        }
    }
}

fn report(error: &TelesignError) {
    match error {
        TelesignError::AuthorizationError { body, .. } => {
            eprintln!("Rejected credentials; check customer id and key: {}", body);
        }
        TelesignError::ServiceError { status, body } => {
            eprintln!("Service answered {}: {}", status, body);
        }
        TelesignError::Transport(msg) => {
            eprintln!("Could not reach TeleSign: {}", msg);
        }
        other => eprintln!("Error: {}", other),
    }
}
