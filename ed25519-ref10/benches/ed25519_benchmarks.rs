// -*- mode: rust; -*-
//
// This file is part of ed25519-dalek.
// Copyright (c) 2018 Isis Lovecruft
// See LICENSE for licensing information.
//
// Authors:
// - Isis Agora Lovecruft <isis@patternsinthevoid.net>

use criterion::{criterion_group, criterion_main, Criterion};

mod helpers {
    use rand::CryptoRng;
    use rand::Error;
    use rand::RngCore;

    /// A fake RNG which simply returns zeroes.
    pub struct ZeroRng;

    impl RngCore for ZeroRng {
        fn next_u32(&mut self) -> u32 {
            0u32
        }

        fn next_u64(&mut self) -> u64 {
            0u64
        }

        fn fill_bytes(&mut self, bytes: &mut [u8]) {
            bytes.fill(0);
        }

        fn try_fill_bytes(&mut self, bytes: &mut [u8]) -> Result<(), Error> {
            self.fill_bytes(bytes);
            Ok(())
        }
    }

    impl CryptoRng for ZeroRng {}
}

mod ed25519_benches {
    use super::helpers::ZeroRng;
    use super::*;
    use ed25519_ref10::{Signature, SigningKey};
    use rand::rngs::OsRng;

    fn sign(c: &mut Criterion) {
        let signing_key = SigningKey::generate(&mut OsRng).unwrap();
        let msg: &[u8] = b"";

        c.bench_function("Ed25519 signing", move |b| b.iter(|| signing_key.sign(msg)));
    }

    fn sign_attached(c: &mut Criterion) {
        let signing_key = SigningKey::generate(&mut OsRng).unwrap();
        let msg = [0x5au8; 1024];

        c.bench_function("Ed25519 attached signing, 1KiB message", move |b| {
            b.iter(|| signing_key.sign_attached(&msg))
        });
    }

    fn verify(c: &mut Criterion) {
        let signing_key = SigningKey::generate(&mut OsRng).unwrap();
        let verifying_key = signing_key.verifying_key();
        let msg: &[u8] = b"";
        let sig: Signature = signing_key.sign(msg);

        c.bench_function("Ed25519 signature verification", move |b| {
            b.iter(|| verifying_key.verify(msg, &sig))
        });
    }

    fn verify_bytes(c: &mut Criterion) {
        let signing_key = SigningKey::generate(&mut OsRng).unwrap();
        let public = signing_key.verifying_key().to_bytes();
        let msg: &[u8] = b"";
        let sig = signing_key.sign(msg).to_bytes();

        c.bench_function("Ed25519 verification from raw bytes", move |b| {
            b.iter(|| ed25519_ref10::verify(&sig, &public, msg))
        });
    }

    fn key_generation(c: &mut Criterion) {
        let mut rng = ZeroRng;

        c.bench_function("Ed25519 keypair generation", move |b| {
            b.iter(|| SigningKey::generate(&mut rng))
        });
    }

    criterion_group! {
        name = ed25519_benches;
        config = Criterion::default();
        targets =
            sign,
            sign_attached,
            verify,
            verify_bytes,
            key_generation,
    }
}

criterion_main!(ed25519_benches::ed25519_benches);
