use chart_viewport::core::RangeIndex;
use proptest::prelude::*;

#[test]
fn negative_and_extreme_values_are_preserved() {
    let values = [i64::MIN, -1, 0, i64::MAX, 7];
    let index = RangeIndex::build(&values);
    assert_eq!(index.range_min_max(1, 2), Some((-1, 0)));
    assert_eq!(index.range_min_max(0, 4), Some((i64::MIN, i64::MAX)));
    assert_eq!(index.range_max(4, 4), Some(7));
}

proptest! {
    #[test]
    fn range_queries_match_brute_force(
        values in prop::collection::vec(-1_000_000i64..1_000_000, 1..300),
        a in 0usize..300,
        b in 0usize..300
    ) {
        let n = values.len();
        let (l, r) = {
            let (a, b) = (a % n, b % n);
            if a <= b { (a, b) } else { (b, a) }
        };
        let index = RangeIndex::build(&values);
        let slice = &values[l..=r];

        prop_assert_eq!(index.range_min(l, r), slice.iter().copied().min());
        prop_assert_eq!(index.range_max(l, r), slice.iter().copied().max());
        prop_assert_eq!(
            index.range_min_max(l, r),
            Some((
                slice.iter().copied().min().unwrap_or_default(),
                slice.iter().copied().max().unwrap_or_default()
            ))
        );
    }

    #[test]
    fn overall_matches_whole_series(values in prop::collection::vec(any::<i64>(), 1..200)) {
        let index = RangeIndex::build(&values);
        let expected = (
            values.iter().copied().min().unwrap_or_default(),
            values.iter().copied().max().unwrap_or_default(),
        );
        prop_assert_eq!(index.overall(), Some(expected));
    }
}
