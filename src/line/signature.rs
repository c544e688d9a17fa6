use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

fn keyed_mac(channel_secret: &str, body: &[u8]) -> Option<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(channel_secret.as_bytes()).ok()?;
    mac.update(body);
    Some(mac)
}

/// Base64 HMAC-SHA256 of `body` keyed with the channel secret, or `None`
/// if the key is rejected.
pub fn sign(channel_secret: &str, body: &[u8]) -> Option<String> {
    let mac = keyed_mac(channel_secret, body)?;
    Some(STANDARD.encode(mac.finalize().into_bytes()))
}

/// Checks an `x-line-signature` header value against the raw request body.
/// The comparison is constant time.
pub fn verify_signature(channel_secret: &str, body: &[u8], signature: &str) -> bool {
    let Ok(expected) = STANDARD.decode(signature.trim()) else {
        return false;
    };
    keyed_mac(channel_secret, body).is_some_and(|mac| mac.verify_slice(&expected).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "channel-secret";
    const BODY: &[u8] = br#"{"destination":"U123","events":[]}"#;

    #[test]
    fn test_signature_round_trip() {
        let signature = sign(SECRET, BODY).unwrap();
        assert!(verify_signature(SECRET, BODY, &signature));
    }

    #[test]
    fn test_known_vector() {
        // RFC 4231 test case 2
        let signature = sign("Jefe", b"what do ya want for nothing?").unwrap();
        assert_eq!(signature, "W9zBRr9gdU5qBCQmCJV1x1oAPwidJzmDnexYuWTsOEM=");
    }

    #[test]
    fn test_rejects_tampered_body() {
        let signature = sign(SECRET, BODY).unwrap();
        assert!(!verify_signature(SECRET, br#"{"events":[1]}"#, &signature));
    }

    #[test]
    fn test_rejects_wrong_secret() {
        let signature = sign("other-secret", BODY).unwrap();
        assert!(!verify_signature(SECRET, BODY, &signature));
    }

    #[test]
    fn test_empty_secret_still_signs() {
        // HMAC pads short keys, so no key length is rejected
        let signature = sign("", BODY).unwrap();
        assert_eq!(STANDARD.decode(&signature).unwrap().len(), 32);
        assert!(verify_signature("", BODY, &signature));
    }

    #[test]
    fn test_rejects_garbage_header() {
        assert!(!verify_signature(SECRET, BODY, "not base64 at all!"));
        assert!(!verify_signature(SECRET, BODY, ""));
    }
}
