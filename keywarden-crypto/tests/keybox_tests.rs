use keywarden_crypto::keybox::{generate_keypair, open, seal};
use keywarden_crypto::CryptoError;

#[test]
fn keypair_generation_produces_valid_keys() {
    let kp = generate_keypair();
    assert_eq!(kp.public_bytes().len(), 32);
    // Public key must not equal the secret scalar
    assert_ne!(kp.public_bytes(), kp.secret.to_bytes());
}

#[test]
fn keypair_roundtrip_from_secret_bytes() {
    let kp1 = generate_keypair();
    let kp2 = keywarden_crypto::KeyPair::from_secret_bytes(kp1.secret.to_bytes());
    assert_eq!(kp1.public_bytes(), kp2.public_bytes());
}

#[test]
fn seal_open_roundtrip() {
    let sender = generate_keypair();
    let recipient = generate_keypair();
    let message = b"a1b2c3d4e5f6a1b2c3d4e5f6a1b2c3d4";

    let sealed = seal(message, &recipient.public, &sender.secret).unwrap();
    let opened = open(&sealed, &sender.public, &recipient.secret).unwrap();

    assert_eq!(opened.as_slice(), message.as_slice());
}

#[test]
fn seal_open_empty_message() {
    let sender = generate_keypair();
    let recipient = generate_keypair();

    let sealed = seal(b"", &recipient.public, &sender.secret).unwrap();
    let opened = open(&sealed, &sender.public, &recipient.secret).unwrap();

    assert!(opened.is_empty());
}

#[test]
fn seal_open_large_message() {
    let sender = generate_keypair();
    let recipient = generate_keypair();
    let message = vec![0xABu8; 4096];

    let sealed = seal(&message, &recipient.public, &sender.secret).unwrap();
    let opened = open(&sealed, &sender.public, &recipient.secret).unwrap();

    assert_eq!(opened.as_slice(), message.as_slice());
}

// ── Wrong Keys ──

#[test]
fn wrong_recipient_key_fails_to_open() {
    let sender = generate_keypair();
    let recipient = generate_keypair();
    let interloper = generate_keypair();

    let sealed = seal(b"project key material", &recipient.public, &sender.secret).unwrap();
    let result = open(&sealed, &sender.public, &interloper.secret);

    assert!(matches!(result.unwrap_err(), CryptoError::Authentication));
}

#[test]
fn wrong_sender_key_fails_to_open() {
    let sender = generate_keypair();
    let recipient = generate_keypair();
    let impostor = generate_keypair();

    let sealed = seal(b"project key material", &recipient.public, &sender.secret).unwrap();
    let result = open(&sealed, &impostor.public, &recipient.secret);

    assert!(matches!(result.unwrap_err(), CryptoError::Authentication));
}

// ── Tampering ──

#[test]
fn tampered_ciphertext_detected_at_every_byte() {
    let sender = generate_keypair();
    let recipient = generate_keypair();
    let sealed = seal(b"integrity matters", &recipient.public, &sender.secret).unwrap();

    for i in 0..sealed.ciphertext.len() {
        let mut tampered = sealed.clone();
        tampered.ciphertext[i] ^= 0x01;
        assert!(
            open(&tampered, &sender.public, &recipient.secret).is_err(),
            "bit flip at byte {i} should be detected"
        );
    }
}

#[test]
fn tampered_nonce_fails() {
    let sender = generate_keypair();
    let recipient = generate_keypair();

    let mut sealed = seal(b"nonce-bound", &recipient.public, &sender.secret).unwrap();
    sealed.nonce[0] ^= 0xFF;

    assert!(open(&sealed, &sender.public, &recipient.secret).is_err());
}

#[test]
fn truncated_ciphertext_fails() {
    let sender = generate_keypair();
    let recipient = generate_keypair();

    let mut sealed = seal(b"do not truncate", &recipient.public, &sender.secret).unwrap();
    sealed.ciphertext.pop();

    assert!(open(&sealed, &sender.public, &recipient.secret).is_err());
}

// ── Nonce Freshness ──

#[test]
fn each_seal_produces_different_nonce_and_ciphertext() {
    let sender = generate_keypair();
    let recipient = generate_keypair();
    let message = b"same message every time";

    let s1 = seal(message, &recipient.public, &sender.secret).unwrap();
    let s2 = seal(message, &recipient.public, &sender.secret).unwrap();

    assert_ne!(s1.nonce, s2.nonce);
    assert_ne!(s1.ciphertext, s2.ciphertext);

    assert_eq!(
        open(&s1, &sender.public, &recipient.secret).unwrap().as_slice(),
        message.as_slice()
    );
    assert_eq!(
        open(&s2, &sender.public, &recipient.secret).unwrap().as_slice(),
        message.as_slice()
    );
}

// Property-based tests
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn seal_open_always_roundtrips(message in proptest::collection::vec(any::<u8>(), 0..512)) {
            let sender = generate_keypair();
            let recipient = generate_keypair();

            let sealed = seal(&message, &recipient.public, &sender.secret).unwrap();
            let opened = open(&sealed, &sender.public, &recipient.secret).unwrap();
            prop_assert_eq!(opened.as_slice(), message.as_slice());
        }
    }
}
