// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Property tests for the sample-level codec.

use proptest::prelude::*;
use wavhide::stego::extract::extract_header;
use wavhide::stego::HEADER_BITS;
use wavhide::{extract, hide, HideOptions, Reporter};

fn cover(cells: usize, seed: u8) -> Vec<u8> {
    (0..cells).map(|i| (i as u8).wrapping_mul(73).wrapping_add(seed)).collect()
}

#[test]
fn exact_fit_hello() {
    let cover = cover(HEADER_BITS + 40, 3);
    let stego = hide(&cover, b"hello", "a.txt", &HideOptions::default(), &mut Reporter::silent()).unwrap();
    let out = extract(&stego, None, &mut Reporter::silent()).unwrap();
    assert_eq!(out.data, b"hello");
    assert_eq!(out.filename, "a.txt");
}

#[test]
fn flags_mapping() {
    let cover = cover(HEADER_BITS + 8 * 400, 9);
    for (compress, password, flags) in [(false, None, 0u8), (true, None, 1), (false, Some("p"), 2), (true, Some("p"), 3)] {
        let mut options = HideOptions::new().with_compression(compress);
        if let Some(p) = password {
            options = options.with_password(p);
        }
        let stego = hide(&cover, b"flags", "f", &options, &mut Reporter::silent()).unwrap();
        assert_eq!(extract_header(&stego).unwrap().flags(), flags);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn plain_roundtrip(
        secret in proptest::collection::vec(any::<u8>(), 0..300),
        name in "[a-z0-9_.-]{0,40}",
        slack in 0usize..200,
        seed in any::<u8>(),
    ) {
        let cover = cover(HEADER_BITS + secret.len() * 8 + slack, seed);
        let stego = hide(&cover, &secret, &name, &HideOptions::default(), &mut Reporter::silent()).unwrap();
        prop_assert_eq!(stego.len(), cover.len());
        let out = extract(&stego, None, &mut Reporter::silent()).unwrap();
        prop_assert_eq!(out.data, secret);
        prop_assert_eq!(out.filename, name);
    }

    #[test]
    fn capacity_guard_leaves_cover_alone(extra in 1usize..64, secret_len in 1usize..64) {
        let cells = HEADER_BITS + secret_len * 8 - extra.min(secret_len * 8);
        let cover = cover(cells, 1);
        let snapshot = cover.clone();
        let secret = vec![0xA5u8; secret_len];
        let result = hide(&cover, &secret, "x", &HideOptions::default(), &mut Reporter::silent());
        let is_capacity_error = matches!(result, Err(wavhide::StegoError::CapacityExceeded { .. }));
        prop_assert!(is_capacity_error);
        prop_assert_eq!(cover, snapshot);
    }

    #[test]
    fn compressed_payload_flip_fails_or_is_harmless(
        flip in 0usize..600,
        seed in any::<u8>(),
    ) {
        let secret: Vec<u8> = (0..2000usize).map(|i| b"wave"[i % 4].wrapping_add((i / 50) as u8)).collect();
        let cover = cover(HEADER_BITS + 8 * 3000, seed);
        let options = HideOptions::new().with_compression(true);
        let mut stego = hide(&cover, &secret, "w", &options, &mut Reporter::silent()).unwrap();
        stego[HEADER_BITS + flip] ^= 1;
        match extract(&stego, None, &mut Reporter::silent()) {
            Ok(out) => prop_assert_eq!(out.data, secret),
            Err(e) => prop_assert!(matches!(e, wavhide::StegoError::DecompressionFailed), "{:?}", e),
        }
    }

    #[test]
    fn payload_corruption_never_changes_header(
        flips in proptest::collection::vec(0usize..800, 1..50),
        name in "[A-Za-z]{1,30}",
    ) {
        let cover = cover(HEADER_BITS + 800, 5);
        let mut stego = hide(&cover, b"some payload bytes", &name, &HideOptions::default(), &mut Reporter::silent()).unwrap();
        let before = extract_header(&stego).unwrap();
        for f in flips {
            stego[HEADER_BITS + f] ^= 1;
        }
        let after = extract_header(&stego).unwrap();
        prop_assert_eq!(after, before);
    }
}
