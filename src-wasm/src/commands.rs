//! Host entry points as seen from JavaScript.
//!
//! Each function drives [`sphincs_bridge_core::binding`] and flattens its
//! tagged result into the host convention:
//! - `GenerateSphincsKeyPair()` → `{ privateKey: string, publicKey: Uint8Array }`
//! - `SignMessage(privateKeyPem, message)` → `Uint8Array`
//! - any failure → `{ error: string }`
//!
//! Callers distinguish success from failure by checking for `error`.

use js_sys::{Array, Object, Reflect};
use wasm_bindgen::prelude::*;

use sphincs_bridge_core::binding::{self, HostOperationResult, KeyPairPayload};
use sphincs_bridge_core::params;

use crate::transport::{JsArgument, JsBytes};

/// `GenerateSphincsKeyPair()`; also exported from the module.
#[must_use]
#[wasm_bindgen(js_name = generateSphincsKeyPair)]
pub fn generate_sphincs_keypair() -> JsValue {
    match binding::generate_sphincs_keypair::<JsBytes>() {
        HostOperationResult::Success(payload) => keypair_object(payload),
        HostOperationResult::Failure(payload) => error_object(&payload.error),
    }
}

/// `SignMessage(...)` with its arguments collected into an array.
///
/// The global `SignMessage` forwards `arguments` here so the arity check
/// sees exactly what the caller passed.
#[must_use]
#[allow(clippy::needless_pass_by_value)]
#[wasm_bindgen(js_name = signMessageWithArgs)]
pub fn sign_message_with_args(args: Array) -> JsValue {
    let args: Vec<JsArgument> = args.iter().map(JsArgument).collect();
    match binding::sign_message::<JsArgument, JsBytes>(&args) {
        HostOperationResult::Success(signature) => signature.into(),
        HostOperationResult::Failure(payload) => error_object(&payload.error),
    }
}

/// The fixed parameter configuration as a JSON string (sizes, name, shape).
#[must_use]
#[wasm_bindgen(js_name = parameterConfiguration)]
pub fn parameter_configuration() -> String {
    serde_json::to_string(params::fixed()).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Flattening
// ---------------------------------------------------------------------------

fn keypair_object(payload: KeyPairPayload<JsBytes>) -> JsValue {
    let object = Object::new();
    let built = Reflect::set(
        &object,
        &JsValue::from_str("privateKey"),
        &JsValue::from_str(&payload.private_key),
    )
    .and_then(|_| Reflect::set(&object, &JsValue::from_str("publicKey"), &payload.public_key.0));

    match built {
        Ok(_) => object.into(),
        Err(_) => {
            tracing::error!("failed to build keypair result object");
            error_object("failed to build keypair result object")
        }
    }
}

fn error_object(message: &str) -> JsValue {
    let object = Object::new();
    let built = Reflect::set(
        &object,
        &JsValue::from_str("error"),
        &JsValue::from_str(message),
    );
    if built.is_err() {
        tracing::error!(error = message, "failed to build error result object");
    }
    object.into()
}
