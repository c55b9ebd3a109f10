//! JavaScript side of the byte transport.
//!
//! [`JsBytes`] is the host buffer (`Uint8Array`). [`JsArgument`] wraps an
//! arbitrary call argument and decides whether it is byte-like.

use js_sys::{Array, ArrayBuffer, Uint8Array};
use wasm_bindgen::{JsCast, JsValue};
use zeroize::Zeroizing;

use sphincs_bridge_core::transport::{copy_to_native, HostArgument, HostBuffer};
use sphincs_bridge_core::BridgeError;

/// A `Uint8Array` owned by the JS heap.
pub struct JsBytes(pub Uint8Array);

impl HostBuffer for JsBytes {
    fn reported_len(&self) -> usize {
        self.0.length() as usize
    }

    fn copy_to_slice(&self, dst: &mut [u8]) {
        self.0.copy_to(dst);
    }

    fn from_slice(src: &[u8]) -> Self {
        Self(Uint8Array::from(src))
    }
}

impl From<JsBytes> for JsValue {
    fn from(bytes: JsBytes) -> Self {
        bytes.0.into()
    }
}

/// One positional argument of a host call.
///
/// Accepted shapes:
/// - `Uint8Array` (including Node `Buffer`)
/// - `ArrayBuffer`
/// - plain arrays whose elements are all integers in `0..=255`
/// - strings, read as UTF-8 (the PEM from `GenerateSphincsKeyPair` is text)
pub struct JsArgument(pub JsValue);

impl HostArgument for JsArgument {
    fn read_bytes(&self, position: usize) -> Result<Zeroizing<Vec<u8>>, BridgeError> {
        let value = &self.0;

        if let Some(text) = value.as_string() {
            return Ok(Zeroizing::new(text.into_bytes()));
        }
        if let Some(array) = value.dyn_ref::<Uint8Array>() {
            return Ok(copy_to_native(&JsBytes(array.clone())));
        }
        if value.is_instance_of::<ArrayBuffer>() {
            return Ok(copy_to_native(&JsBytes(Uint8Array::new(value))));
        }
        if let Some(array) = value.dyn_ref::<Array>() {
            return array_bytes(array).ok_or(BridgeError::ArgumentType { position });
        }

        Err(BridgeError::ArgumentType { position })
    }
}

/// Element-wise copy of a plain array. `None` if any element is not a byte.
fn array_bytes(array: &Array) -> Option<Zeroizing<Vec<u8>>> {
    let mut bytes = Zeroizing::new(Vec::with_capacity(array.length() as usize));
    for element in array.iter() {
        bytes.push(byte_value(element.as_f64()?)?);
    }
    Some(bytes)
}

/// Exact integers in `0..=255` only; the saturating cast round-trips
/// for nothing else.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::float_cmp
)]
fn byte_value(number: f64) -> Option<u8> {
    let byte = number as u8;
    (f64::from(byte) == number).then_some(byte)
}
