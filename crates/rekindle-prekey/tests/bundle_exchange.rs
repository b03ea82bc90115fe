//! Publish a bundle on one side, ship its byte buffers, and materialize it on
//! the other side, using real Ed25519/X25519 keys throughout.

use rekindle_prekey::{
    BundleError, BundleField, Ed25519Verifier, IdentityKeyPair, LocalPreKey, LocalSignedPreKey,
    PreKeyBundle,
};

const DEVICE_ID: u32 = 1;

fn published() -> (IdentityKeyPair, PreKeyBundle) {
    let identity = IdentityKeyPair::generate();
    let signed = LocalSignedPreKey::generate(7, &identity);
    let one_time = LocalPreKey::generate_batch(100, 10);
    let bundle = PreKeyBundle::publish(12345, &identity, &signed, one_time.first());
    (identity, bundle)
}

#[test]
fn peer_materializes_published_bundle() {
    let (identity, bundle) = published();
    let parts = bundle.to_parts().expect("encode bundle");

    let received = PreKeyBundle::from_bytes(
        parts.registration_id,
        DEVICE_ID,
        parts.pre_key.as_deref(),
        &parts.signed_pre_key,
        &parts.identity_key,
    )
    .expect("peer should decode a published bundle");

    assert_eq!(received, bundle);
    assert_eq!(received.pre_key_id(), Some(100));
    assert_eq!(received.identity_key(), &identity.public_key());
    received
        .verify_signature(&Ed25519Verifier)
        .expect("signature should verify");
}

#[test]
fn exhausted_bundle_still_materializes() {
    let (_, bundle) = published();
    let parts = bundle.without_pre_key().to_parts().expect("encode bundle");

    let received = PreKeyBundle::from_bytes(
        parts.registration_id,
        DEVICE_ID,
        None,
        &parts.signed_pre_key,
        &parts.identity_key,
    )
    .expect("bundle without one-time key is valid");

    assert!(received.pre_key_public().is_none());
    assert!(received.verify_signature(&Ed25519Verifier).is_ok());
}

#[test]
fn corrupt_buffer_yields_no_bundle() {
    let (_, bundle) = published();
    let parts = bundle.to_parts().expect("encode bundle");

    let mut identity = parts.identity_key.clone();
    identity[0] = 0xFF;
    let result = PreKeyBundle::from_bytes(
        parts.registration_id,
        DEVICE_ID,
        parts.pre_key.as_deref(),
        &parts.signed_pre_key,
        &identity,
    );
    assert!(matches!(
        result,
        Err(BundleError::Decode {
            field: BundleField::IdentityKey,
            ..
        })
    ));

    let truncated = &parts.signed_pre_key[..parts.signed_pre_key.len() - 32];
    let result = PreKeyBundle::from_bytes(
        parts.registration_id,
        DEVICE_ID,
        parts.pre_key.as_deref(),
        truncated,
        &parts.identity_key,
    );
    assert_eq!(
        result.map_err(|e| e.field()),
        Err(Some(BundleField::SignedPreKey))
    );
}
