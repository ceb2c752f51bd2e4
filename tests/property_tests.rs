//! tests/property_tests.rs
//! Property checks for the codec, the engine and the comparator

use pbkdf2_md5_rs::consts::{BINARY_SIZE, MAX_BINARY_SIZE, MAX_SALT_LEN};
use pbkdf2_md5_rs::{
    compare_binary, derive_batch, encode_record, parse_record, screen, DerivedDigest,
    LaneBackend, SaltDescriptor, ScalarBackend, TargetDigest,
};
use proptest::collection::vec;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn record_round_trip(
        salt in vec(any::<u8>(), 0..=MAX_SALT_LEN),
        rounds in 1u32..=1_000_000,
        digest in vec(any::<u8>(), BINARY_SIZE..=MAX_BINARY_SIZE),
    ) {
        let descriptor = SaltDescriptor::new(&salt, rounds).unwrap();
        let target = TargetDigest::new(digest.clone()).unwrap();
        let parsed = parse_record(&encode_record(&descriptor, &target)).unwrap();

        prop_assert_eq!(parsed.descriptor().salt(), salt.as_slice());
        prop_assert_eq!(parsed.descriptor().rounds(), rounds);
        prop_assert_eq!(parsed.target().as_bytes(), digest.as_slice());
    }

    #[test]
    fn equal_digests_always_pass_screen(
        bytes in prop::array::uniform16(any::<u8>()),
        noise in vec(prop::array::uniform16(any::<u8>()), 0..8),
        at in 0usize..8,
    ) {
        let target = TargetDigest::new(bytes.to_vec()).unwrap();
        let mut batch: Vec<DerivedDigest> = noise.into_iter().map(DerivedDigest::new).collect();
        let at = at.min(batch.len());
        batch.insert(at, DerivedDigest::new(bytes));

        prop_assert!(screen(&target, &batch));
        prop_assert!(compare_binary(&target, &batch[at]));
    }

    #[test]
    fn swapping_candidates_swaps_digests(
        a in vec(any::<u8>(), 0..40),
        b in vec(any::<u8>(), 0..40),
        salt in vec(any::<u8>(), 0..16),
    ) {
        let descriptor = SaltDescriptor::new(&salt, 2).unwrap();
        let ab = derive_batch(&descriptor, &[a.as_slice(), b.as_slice()], &LaneBackend).unwrap();
        let ba = derive_batch(&descriptor, &[b.as_slice(), a.as_slice()], &ScalarBackend).unwrap();

        prop_assert_eq!(ab[0], ba[1]);
        prop_assert_eq!(ab[1], ba[0]);
    }
}
