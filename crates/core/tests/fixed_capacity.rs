//! Fixed-capacity mode: the write pass never outgrows its precomputed buffer.

use fmtconv_core::{
    CapacityPolicy, ConvertConfig, FormatError, convert, convert_fixed, convert_fixed_with,
    convert_into, estimate_capacity,
};
use proptest::prelude::*;

/// Longest source the property tests generate, in segments.
const MAX_SEGMENTS: usize = 24;

const POLICIES: [CapacityPolicy; 3] = [
    CapacityPolicy::Exact,
    CapacityPolicy::ExpansionBound,
    CapacityPolicy::Legacy,
];

fn flags_strategy() -> impl Strategy<Value = String> {
    proptest::sample::subsequence(vec!['-', '+', ' ', '#', '0'], 0..=5)
        .prop_shuffle()
        .prop_map(|flags| flags.into_iter().collect())
}

fn length_strategy() -> impl Strategy<Value = &'static str> {
    proptest::sample::select(vec!["", "h", "hh", "l", "ll", "j", "z", "t", "L"])
}

fn conversion_strategy() -> impl Strategy<Value = char> {
    proptest::sample::select("diufFeEgGxXoscpaA".chars().collect::<Vec<_>>())
}

/// A single well-formed `%`-clause.
fn specifier_strategy() -> impl Strategy<Value = String> {
    (
        flags_strategy(),
        proptest::option::of(1u32..100_000),
        proptest::option::of(0u32..1_000),
        length_strategy(),
        conversion_strategy(),
    )
        .prop_map(|(flags, width, precision, length, conv)| {
            let mut s = format!("%{flags}");
            if let Some(w) = width {
                s.push_str(&w.to_string());
            }
            if let Some(p) = precision {
                s.push('.');
                s.push_str(&p.to_string());
            }
            s.push_str(length);
            s.push(conv);
            s
        })
}

fn segment_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => specifier_strategy(),
        2 => "[a-zA-Z0-9 =:,.()\\n{}é€]{1,8}",
        1 => Just("%%".to_string()),
    ]
}

fn source_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(segment_strategy(), 0..MAX_SEGMENTS).prop_map(|segs| segs.concat())
}

proptest! {
    #[test]
    fn fixed_output_fits_its_capacity(src in source_strategy()) {
        let growable = convert(&src);
        prop_assert!(growable.is_ok(), "{src:?}: {growable:?}");
        let growable = growable.unwrap();

        let fixed = convert_fixed(&src, None).unwrap();
        prop_assert_eq!(fixed.as_str(), growable.as_str());
        prop_assert_eq!(fixed.capacity(), fixed.len());

        for policy in POLICIES {
            let config = ConvertConfig { capacity: policy };
            let fixed = convert_fixed_with(&src, None, &config);
            prop_assert!(fixed.is_ok(), "{policy:?} on {src:?}: {fixed:?}");
            let fixed = fixed.unwrap();
            prop_assert!(fixed.len() <= fixed.capacity());
            prop_assert_eq!(fixed.as_str(), growable.as_str());
        }
    }

    #[test]
    fn heuristics_bound_the_exact_size(src in source_strategy()) {
        let exact = estimate_capacity(&src, CapacityPolicy::Exact).unwrap();
        let bound = estimate_capacity(&src, CapacityPolicy::ExpansionBound).unwrap();
        let legacy = estimate_capacity(&src, CapacityPolicy::Legacy).unwrap();
        prop_assert!(exact <= bound, "{src:?}: exact {exact} > bound {bound}");
        prop_assert!(exact <= legacy, "{src:?}: exact {exact} > legacy {legacy}");
    }

    #[test]
    fn any_smaller_buffer_is_rejected(src in source_strategy()) {
        let exact = estimate_capacity(&src, CapacityPolicy::Exact).unwrap();
        prop_assume!(exact > 0);
        let mut buf = vec![0u8; exact - 1];
        let err = convert_into(&src, &mut buf);
        let is_capacity_error = matches!(err, Err(FormatError::CapacityExceeded { .. }));
        prop_assert!(is_capacity_error, "{src:?}: {err:?}");
    }
}

#[test]
fn legacy_covers_pathological_short_input() {
    // Densest expansion: every clause doubles.
    let src = "%0d".repeat(21);
    assert_eq!(src.len(), 63);
    let exact = estimate_capacity(&src, CapacityPolicy::Exact).unwrap();
    assert_eq!(exact, 126);
    assert!(exact <= estimate_capacity(&src, CapacityPolicy::Legacy).unwrap());
    assert_eq!(
        estimate_capacity(&src, CapacityPolicy::ExpansionBound).unwrap(),
        exact
    );
}

#[test]
fn legacy_covers_pathological_long_input() {
    let src = "%0d".repeat(1_000);
    let fixed = convert_fixed_with(
        &src,
        None,
        &ConvertConfig {
            capacity: CapacityPolicy::Legacy,
        },
    )
    .unwrap();
    assert_eq!(fixed.len(), 6_000);
    assert_eq!(fixed.capacity(), 9_000);
}

#[test]
fn exact_hint_succeeds_and_one_less_fails() {
    let src = "Memory address = %08x\n";
    let exact = estimate_capacity(src, CapacityPolicy::Exact).unwrap();
    assert_eq!(exact, 25);
    assert!(convert_fixed(src, Some(exact)).is_ok());
    assert!(matches!(
        convert_fixed(src, Some(exact - 1)),
        Err(FormatError::CapacityExceeded { capacity: 24, .. })
    ));
}

#[test]
fn caller_owned_stack_buffer() {
    let mut buf = [0u8; 64];
    let n = convert_into("User %s has %d points (%.2f%%)", &mut buf).unwrap();
    assert_eq!(&buf[..n], b"User {s} has {d} points ({d:.2}%)");
}
