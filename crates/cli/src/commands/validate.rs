//! `smartchip validate`: Check a request without computing chips.

use super::{CmdResult, load_settings, read_input};
use smartchip_engine::{hydrate_request_with_merchant_config, validate_request};

pub fn run(input: Option<String>) -> CmdResult {
    let settings = load_settings()?;
    let store = settings.merchant_store()?;
    let request = read_input(input.as_deref())?;

    let outcome = hydrate_request_with_merchant_config(request, &store)
        .map_err(|e| e.to_string())
        .and_then(|req| validate_request(&req).map_err(|issues| issues.to_string()));

    match outcome {
        Ok(()) => {
            println!("ok");
            Ok(())
        }
        Err(diagnostic) => {
            println!("{diagnostic}");
            std::process::exit(1);
        }
    }
}
