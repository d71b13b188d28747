//! Ed25519 request signature verification.
//!
//! Discord signs `timestamp ++ body` with the application's key and sends
//! the hex signature and timestamp as headers.

use ed25519_dalek::{Signature, Verifier, VerifyingKey};

/// Header carrying the hex-encoded signature.
pub const SIGNATURE_HEADER: &str = "x-signature-ed25519";

/// Header carrying the timestamp that prefixes the signed message.
pub const TIMESTAMP_HEADER: &str = "x-signature-timestamp";

/// Verify that `body` was signed by the holder of `public_key`.
///
/// Malformed hex or key material yields `false`.
pub fn verify_request(body: &[u8], signature: &str, timestamp: &str, public_key: &str) -> bool {
    let Some(key) = decode_fixed::<32>(public_key).and_then(|b| VerifyingKey::from_bytes(&b).ok())
    else {
        return false;
    };
    let Some(signature) = decode_fixed::<64>(signature).map(|b| Signature::from_bytes(&b)) else {
        return false;
    };

    let mut message = Vec::with_capacity(timestamp.len() + body.len());
    message.extend_from_slice(timestamp.as_bytes());
    message.extend_from_slice(body);

    key.verify(&message, &signature).is_ok()
}

fn decode_fixed<const N: usize>(value: &str) -> Option<[u8; N]> {
    hex::decode(value.trim()).ok()?.try_into().ok()
}
