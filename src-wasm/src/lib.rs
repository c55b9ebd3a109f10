//! `sphincs-bridge-wasm`: thin WebAssembly shell.
//!
//! On instantiation the start function reads optional host settings,
//! installs the console logger, and registers `GenerateSphincsKeyPair` and
//! `SignMessage` on `globalThis`. All cryptography and error mapping lives
//! in `sphincs-bridge-core`.
//!
//! ```text
//! const kp = GenerateSphincsKeyPair();
//! const sig = SignMessage(kp.privateKey, new TextEncoder().encode("hello world"));
//! if (sig.error) { ... }
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod commands;
pub mod globals;
pub mod logging;
pub mod transport;

use js_sys::{Object, Reflect, JSON};
use wasm_bindgen::prelude::*;

use sphincs_bridge_core::BridgeSettings;

/// Global the host may set before instantiation to configure the bridge.
pub const SETTINGS_GLOBAL: &str = "SPHINCS_BRIDGE_CONFIG";

/// Instance start: settings → logging → global registration.
///
/// # Errors
///
/// Returns the JS exception if the entry points cannot be registered.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let global = js_sys::global();
    let settings = load_settings(&global);
    logging::init(settings.level());

    if settings.register_globals {
        globals::register_globals(&global)?.keep_resident();
    } else {
        tracing::info!("global registration disabled; module exports only");
    }
    Ok(())
}

/// Read `globalThis.SPHINCS_BRIDGE_CONFIG`, falling back to defaults.
fn load_settings(global: &Object) -> BridgeSettings {
    Reflect::get(global, &JsValue::from_str(SETTINGS_GLOBAL))
        .ok()
        .filter(JsValue::is_object)
        .and_then(|value| JSON::stringify(&value).ok())
        .map_or_else(BridgeSettings::default, |json| {
            BridgeSettings::from_json(&String::from(json))
        })
}
