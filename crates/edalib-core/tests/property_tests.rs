//! Property-based tests for hashing, pattern matching and symbol names.

#![allow(clippy::unwrap_used)]

use edalib_core::ContentCheck;
use edalib_core::NormalizeRule;
use edalib_core::sha256_hex;
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_digest_is_deterministic(data in proptest::collection::vec(any::<u8>(), 0..4096)) {
        let first = sha256_hex(&data);
        prop_assert_eq!(&first, &sha256_hex(&data));
        prop_assert_eq!(first.len(), 64);
        prop_assert!(first.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b)));
    }

    #[test]
    fn prop_timestamp_names_are_recognized(
        year in 1000u32..10000,
        month in 1u32..13,
        day in 1u32..32,
        hour in 0u32..24,
        minute in 0u32..60,
        second in 0u32..60,
    ) {
        let rule = NormalizeRule::default();
        let name = format!(
            "{year:04}-{month:02}-{day:02}_{hour:02}-{minute:02}-{second:02}.kicad_sym"
        );
        prop_assert!(rule.is_timestamp_name(&name));
        let other_extension = name.replace(".kicad_sym", ".kicad_mod");
        prop_assert!(!rule.is_timestamp_name(&other_extension));
    }

    #[test]
    fn prop_literal_pattern_matches_only_itself(
        name in "[A-Za-z0-9_./+&-]{1,40}",
        suffix in "[A-Za-z0-9]{1,8}",
    ) {
        let check = ContentCheck::new(&regex::escape(&name), &sha256_hex(b"")).unwrap();
        prop_assert!(check.matches(&name));
        let longer = format!("{name}{suffix}");
        prop_assert!(!check.matches(&longer));
        let nested = format!("{suffix}/{name}");
        prop_assert!(!check.matches(&nested));
    }
}
