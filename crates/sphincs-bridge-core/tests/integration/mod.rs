mod host_roundtrip;
mod key_independence;
mod signing_roundtrip;
