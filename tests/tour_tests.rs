use qtsp::error::QtspError;
use qtsp::tour::validity::hamming_weight;
use qtsp::tour::{
    constraint_violations, exact_optimum, from_key, is_valid_tour, journey_cost, key_to_binary,
    parse_pattern, to_key, valid_tours, SegmentCosts, DEFAULT_SEGMENT_COSTS,
};
use rstest::rstest;
use std::collections::HashSet;

const T: bool = true;
const F: bool = false;

// --- KEY TESTS ---
#[rstest]
#[case([F, F, F, F, F, F], 0)]
#[case([T, T, T, T, T, T], 63)]
#[case([T, F, F, F, F, F], 32)] // index 0 is the MSB
#[case([F, F, F, F, F, T], 1)]
#[case([T, F, T, F, T, T], 43)]
fn test_to_key(#[case] usage: [bool; 6], #[case] expected: u32) {
    assert_eq!(to_key(&usage), expected);
}

#[test]
fn test_key_is_injective_over_all_patterns() {
    let keys: HashSet<u32> = (0..64u32).map(|k| to_key(&from_key(k))).collect();
    assert_eq!(keys.len(), 64);
    for k in 0..64u32 {
        assert_eq!(to_key(&from_key(k)), k);
    }
}

#[test]
fn test_key_works_for_other_lengths() {
    assert_eq!(to_key(&[]), 0);
    assert_eq!(to_key(&[T, F, T]), 0b101);
    assert_eq!(to_key(&[T; 10]), 1023);
}

#[rstest]
#[case(43, "101011")]
#[case(0, "000000")]
#[case(63, "111111")]
#[case(5, "000101")]
fn test_key_to_binary(#[case] key: u32, #[case] expected: &str) {
    assert_eq!(key_to_binary(key, 6), expected);
}

// --- VALIDITY TESTS ---
#[rstest]
#[case([T, F, T, F, T, T], true)] // 101011: pairs (0,2) + (4,5)
#[case([T, T, T, T, F, F], true)] // 111100: pairs (0,2) + (1,3)
#[case([F, T, F, T, T, T], true)] // 010111: pairs (1,3) + (4,5)
#[case([T, T, T, F, T, F], false)] // weight 4, pairs broken
#[case([T, F, T, F, T, F], false)] // weight 3
#[case([T, T, T, T, T, T], false)] // weight 6
#[case([F, F, F, F, F, F], false)]
#[case([T, T, F, F, T, T], false)] // weight 4, (0,2) and (1,3) broken
fn test_is_valid_tour(#[case] usage: [bool; 6], #[case] expected: bool) {
    assert_eq!(
        is_valid_tour(&usage),
        expected,
        "validity mismatch for {}",
        key_to_binary(to_key(&usage), 6)
    );
}

#[test]
fn test_exactly_three_valid_patterns() {
    let valid: Vec<u32> = (0..64u32)
        .filter(|&k| is_valid_tour(&from_key(k)))
        .collect();
    assert_eq!(valid, vec![23, 43, 60]);

    let listed: Vec<u32> = valid_tours().iter().map(|u| to_key(u)).collect();
    assert_eq!(listed, valid);
}

#[test]
fn test_violations_zero_iff_valid() {
    for k in 0..64u32 {
        let usage = from_key(k);
        assert_eq!(constraint_violations(&usage) == 0, is_valid_tour(&usage));
    }
    // weight 6 is two away from 4, all pairs hold
    assert_eq!(constraint_violations(&[T; 6]), 2);
    assert_eq!(hamming_weight(&[T, F, T, F, T, T]), 4);
}

// --- COST TESTS ---
#[rstest]
#[case([T, F, T, F, T, T], 23.46)]
#[case([T, T, T, T, F, F], 28.52)]
#[case([F, T, F, T, T, T], 24.52)]
#[case([F, F, F, F, F, F], 0.0)]
fn test_journey_cost_reference_instance(#[case] usage: [bool; 6], #[case] expected: f64) {
    let cost = journey_cost(&DEFAULT_SEGMENT_COSTS, &usage).unwrap();
    assert!((cost - expected).abs() < 1e-9, "{} != {}", cost, expected);
}

#[test]
fn test_journey_cost_is_length_agnostic() {
    let cost = journey_cost(&[1.0, 2.0, 4.0], &[T, F, T]).unwrap();
    assert_eq!(cost, 5.0);
}

#[test]
fn test_journey_cost_rejects_length_mismatch() {
    let err = journey_cost(&[1.0, 2.0, 3.0], &[T, T]).unwrap_err();
    assert!(matches!(
        err,
        QtspError::LengthMismatch { costs: 3, usage: 2 }
    ));
}

// --- SEGMENT COSTS / PATTERNS ---
#[rstest]
#[case(5)]
#[case(7)]
#[case(0)]
fn test_segment_costs_require_six(#[case] n: usize) {
    let costs = vec![1.0; n];
    match SegmentCosts::new(&costs) {
        Err(QtspError::InvalidInputLength { expected, found }) => {
            assert_eq!(expected, 6);
            assert_eq!(found, n);
        }
        other => panic!("expected InvalidInputLength, got {:?}", other),
    }
}

#[rstest]
#[case("101011", Some([T, F, T, F, T, T]))]
#[case(" 000000 ", Some([F; 6]))]
#[case("10101", None)]
#[case("10101x", None)]
#[case("1010111", None)]
fn test_parse_pattern(#[case] input: &str, #[case] expected: Option<[bool; 6]>) {
    assert_eq!(parse_pattern(input).ok(), expected);
}

// --- EXACT OPTIMUM ---
#[test]
fn test_exact_optimum_reference_instance() {
    let opt = exact_optimum(&SegmentCosts::default()).unwrap();
    assert_eq!(opt.key, 43);
    assert!((opt.cost - 23.46).abs() < 1e-9);
}

#[test]
fn test_exact_optimum_tie_prefers_lower_key() {
    let opt = exact_optimum(&SegmentCosts::new(&[1.0; 6]).unwrap()).unwrap();
    assert_eq!(opt.key, 23);
    assert_eq!(opt.cost, 4.0);
}

#[test]
fn test_exact_optimum_agrees_with_journey_cost() {
    let costs = SegmentCosts::new(&[3.25, 0.5, 7.125, 2.0, 1.0, 9.5]).unwrap();
    let cheapest = valid_tours()
        .iter()
        .map(|u| journey_cost(costs.as_slice(), u).unwrap())
        .fold(f64::INFINITY, f64::min);
    assert_eq!(exact_optimum(&costs).unwrap().cost, cheapest);
}
