//! Byte transport between host buffers and native memory.
//!
//! The host (a JavaScript engine, or plain `Vec<u8>` in native tests)
//! reports a length; the adapter allocates exactly that many native bytes
//! and copies into them, or the reverse. Nothing here knows about keys or
//! signatures.

use crate::error::BridgeError;
use zeroize::Zeroizing;

/// A host-side byte array.
pub trait HostBuffer: Sized {
    /// Length the host reports for this value.
    fn reported_len(&self) -> usize;

    /// Copy the host bytes into `dst`. `dst.len()` equals [`Self::reported_len`].
    fn copy_to_slice(&self, dst: &mut [u8]);

    /// Build a host value holding an exact copy of `src`.
    fn from_slice(src: &[u8]) -> Self;
}

/// A host call argument that may or may not be byte-like.
pub trait HostArgument {
    /// Read the argument at `position` into an owned native buffer.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::ArgumentType`] when the value is not byte-like.
    fn read_bytes(&self, position: usize) -> Result<Zeroizing<Vec<u8>>, BridgeError>;
}

/// Copy a host buffer into an owned native buffer of identical length.
///
/// The returned buffer is zeroized on drop, since arguments may carry
/// private key material.
#[must_use]
pub fn copy_to_native<B: HostBuffer>(src: &B) -> Zeroizing<Vec<u8>> {
    let mut dst = Zeroizing::new(vec![0u8; src.reported_len()]);
    src.copy_to_slice(&mut dst);
    dst
}

/// Copy native bytes into a new host buffer.
#[must_use]
pub fn copy_to_host<B: HostBuffer>(src: &[u8]) -> B {
    B::from_slice(src)
}

impl HostBuffer for Vec<u8> {
    fn reported_len(&self) -> usize {
        self.len()
    }

    fn copy_to_slice(&self, dst: &mut [u8]) {
        dst.copy_from_slice(self);
    }

    fn from_slice(src: &[u8]) -> Self {
        src.to_vec()
    }
}

impl HostArgument for Vec<u8> {
    fn read_bytes(&self, _position: usize) -> Result<Zeroizing<Vec<u8>>, BridgeError> {
        Ok(copy_to_native(self))
    }
}
