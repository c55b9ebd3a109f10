//! Global registration and residency of the host entry points.
//!
//! [`register_globals`] installs `GenerateSphincsKeyPair` and `SignMessage`
//! on the host's global object and hands back the closures that back them.
//! [`ResidentExports::keep_resident`] then leaves those closures alive for
//! the lifetime of the instance, so the names stay callable after the start
//! function returns. No thread blocks to keep the runtime up: the host keeps
//! the instance, and the instance keeps the closures.

use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::prelude::*;

use sphincs_bridge_core::binding::{GENERATE_KEYPAIR_NAME, SIGN_MESSAGE_NAME};

use crate::commands;

/// Wraps the forwarding closure in a real variadic JS function, so that
/// `SignMessage()` with any argument count reaches the arity check.
const VARIADIC_SHIM: &str =
    "return function SignMessage() { return forward(Array.prototype.slice.call(arguments)); };";

/// Closures currently installed on the global object.
pub struct ResidentExports {
    generate: Closure<dyn Fn() -> JsValue>,
    sign: Closure<dyn Fn(Array) -> JsValue>,
}

impl ResidentExports {
    /// Keep both entry points alive until the instance is torn down.
    pub fn keep_resident(self) {
        self.generate.forget();
        self.sign.forget();
        tracing::debug!("host entry points resident");
    }
}

/// Install both entry points on `global`.
///
/// # Errors
///
/// Returns the JS exception if the global object rejects a property or the
/// variadic shim cannot be built (for example under a CSP without
/// `unsafe-eval`).
pub fn register_globals(global: &Object) -> Result<ResidentExports, JsValue> {
    let generate = Closure::<dyn Fn() -> JsValue>::new(commands::generate_sphincs_keypair);
    Reflect::set(
        global,
        &JsValue::from_str(GENERATE_KEYPAIR_NAME),
        generate.as_ref(),
    )?;

    let sign = Closure::<dyn Fn(Array) -> JsValue>::new(commands::sign_message_with_args);
    let variadic = Function::new_with_args("forward", VARIADIC_SHIM)
        .call1(&JsValue::UNDEFINED, sign.as_ref())?;
    Reflect::set(global, &JsValue::from_str(SIGN_MESSAGE_NAME), &variadic)?;

    tracing::info!(
        generate = GENERATE_KEYPAIR_NAME,
        sign = SIGN_MESSAGE_NAME,
        "host entry points registered"
    );

    Ok(ResidentExports { generate, sign })
}
