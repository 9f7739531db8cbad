//! Property tests for the histogram invariants.

use binlens_core::{compute, summarize, BinLensError, BinSpec, SampleSet, ScaleTransform};
use proptest::prelude::*;

fn arb_samples() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0e6..1.0e6f64, 1..300)
}

fn arb_spec() -> impl Strategy<Value = BinSpec> {
    prop_oneof![
        (1usize..200).prop_map(|count| BinSpec::FixedCount { count }),
        (100.0..5.0e5f64).prop_map(|width| BinSpec::FixedWidth { width }),
    ]
}

/// Samples packed into a few float steps at a large offset, with bins near that step size.
fn arb_narrow() -> impl Strategy<Value = (Vec<f64>, BinSpec)> {
    (
        1.0e12..1.0e16f64,
        1u32..64,
        prop::collection::vec(0.0..=1.0f64, 1..50),
        prop_oneof![
            (1usize..64).prop_map(Err::<f64, usize>),
            (0.25..8.0f64).prop_map(Ok::<f64, usize>),
        ],
    )
        .prop_map(|(lo, steps, fracs, pick)| {
            let ulp = f64::from_bits(lo.to_bits() + 1) - lo;
            let values = fracs.iter().map(|f| lo + (f * steps as f64).floor() * ulp).collect();
            let spec = match pick {
                Ok(factor) => BinSpec::FixedWidth { width: factor * ulp },
                Err(count) => BinSpec::FixedCount { count },
            };
            (values, spec)
        })
}

fn linear_scan(edges: &[f64], v: f64) -> usize {
    let last = edges.len() - 2;
    (0..last).find(|&i| edges[i] <= v && v < edges[i + 1]).unwrap_or(last)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn counts_are_conserved(values in arb_samples(), spec in arb_spec()) {
        let set = SampleSet::new(values.clone()).unwrap();
        let h = compute(&set, &spec).unwrap();
        prop_assert_eq!(h.total(), values.len() as u64);
    }

    #[test]
    fn edges_contiguous_and_span_range(values in arb_samples(), spec in arb_spec()) {
        let set = SampleSet::new(values).unwrap();
        let h = compute(&set, &spec).unwrap();
        let bins = h.bins();
        prop_assert_eq!(bins[0].lower, set.min());
        prop_assert_eq!(bins[bins.len() - 1].upper, set.max());
        for w in bins.windows(2) {
            prop_assert_eq!(w[0].upper, w[1].lower);
        }
        if set.min() < set.max() {
            for b in bins {
                prop_assert!(b.lower < b.upper, "empty bin [{}, {}]", b.lower, b.upper);
            }
        }
    }

    #[test]
    fn assignment_matches_linear_scan(values in arb_samples(), spec in arb_spec()) {
        let set = SampleSet::new(values).unwrap();
        let h = compute(&set, &spec).unwrap();
        let edges = h.edges();
        let mut expected = vec![0u64; h.len()];
        for &v in set.values() {
            let i = linear_scan(&edges, v);
            let b = &h.bins()[i];
            prop_assert!(b.lower <= v && v <= b.upper);
            if i + 1 < h.len() {
                prop_assert!(v < b.upper);
            }
            prop_assert_eq!(h.bin_index(v), Some(i));
            expected[i] += 1;
        }
        prop_assert_eq!(h.counts(), expected);
    }

    #[test]
    fn narrow_ranges_never_collapse_edges((values, spec) in arb_narrow()) {
        let set = SampleSet::new(values).unwrap();
        match compute(&set, &spec) {
            Ok(h) => {
                let edges = h.edges();
                prop_assert!(edges.windows(2).all(|w| w[0] < w[1]) || h.len() == 1);
                prop_assert_eq!(h.total(), set.len() as u64);
                prop_assert_eq!(edges[0], set.min());
                prop_assert_eq!(edges[edges.len() - 1], set.max());
                for &v in set.values() {
                    let i = linear_scan(&edges, v);
                    prop_assert_eq!(h.bin_index(v), Some(i));
                }
                let mut expected = vec![0u64; h.len()];
                for &v in set.values() {
                    expected[linear_scan(&edges, v)] += 1;
                }
                prop_assert_eq!(h.counts(), expected);
            }
            Err(e) => prop_assert!(matches!(e, BinLensError::InvalidConfig(_)), "{}", e),
        }
    }

    #[test]
    fn compute_is_deterministic(values in arb_samples(), spec in arb_spec()) {
        let set = SampleSet::new(values).unwrap();
        prop_assert_eq!(compute(&set, &spec).unwrap(), compute(&set, &spec).unwrap());
    }

    #[test]
    fn summarize_is_idempotent(values in arb_samples(), spec in arb_spec(), k in 1usize..10) {
        let set = SampleSet::new(values).unwrap();
        let h = compute(&set, &spec).unwrap();
        let a = summarize(&h, k).unwrap();
        prop_assert_eq!(&a, &summarize(&h, k).unwrap());
        prop_assert_eq!(a.top_k.len(), k.min(h.len()));
        let max = h.counts().into_iter().max().unwrap();
        prop_assert_eq!(a.top_k[0].count, max);
    }

    #[test]
    fn transforms_round_trip(x in 1.0e-6..1.0e9f64) {
        for t in ScaleTransform::ALL {
            let back = t.inverse(t.forward(x).unwrap());
            prop_assert!(((back - x) / x).abs() <= 1e-9, "{}: {} -> {}", t, x, back);
        }
    }
}
