//! `smartchip merchants`: Inspect the merchant catalog.

use super::{CmdResult, load_settings};
use smartchip_config::{MerchantStore, resolve_merchant_config};
use smartchip_core::Error;

pub fn list() -> CmdResult {
    let store = load_settings()?.merchant_store()?;
    let ids = store.merchant_ids();
    if ids.is_empty() {
        println!("No merchants configured");
    }
    for id in ids {
        println!("{id}");
    }
    Ok(())
}

pub fn show(id: &str) -> CmdResult {
    let store = load_settings()?.merchant_store()?;
    let merchant =
        resolve_merchant_config(&store, id).ok_or_else(|| Error::UnknownMerchant(id.to_string()))?;
    println!("{}", serde_json::to_string_pretty(&merchant.to_engine_config())?);
    Ok(())
}
