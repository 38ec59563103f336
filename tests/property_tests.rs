//! Property-based tests for order independence and count-min's one-sided,
//! additive-accuracy error bound.

use std::collections::HashMap;

use proptest::prelude::*;

use precision_hh::frequency::{CountMinSketch, FrequencySketch};
use precision_hh::prng::Prng;

proptest! {
    /// Feeding the same multiset of updates in any order produces the same
    /// counter table, given the same seeds.
    #[test]
    fn order_independence_holds_for_any_permutation(
        items in prop::collection::vec(0u32..50, 1..200),
        shuffle_seed in any::<u64>(),
    ) {
        let mut prng_a = Prng::new(1, 1);
        let mut sketch_a = CountMinSketch::new(0.05, 0.1, &mut prng_a).unwrap();
        for &x in &items {
            sketch_a.update(x, 1);
        }

        let mut shuffled = items.clone();
        let mut state = shuffle_seed.max(1);
        for i in (1..shuffled.len()).rev() {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            let j = (state >> 33) as usize % (i + 1);
            shuffled.swap(i, j);
        }

        let mut prng_b = Prng::new(1, 1);
        let mut sketch_b = CountMinSketch::new(0.05, 0.1, &mut prng_b).unwrap();
        for &x in &shuffled {
            sketch_b.update(x, 1);
        }

        for x in 0u32..50 {
            prop_assert_eq!(sketch_a.point_query(x), sketch_b.point_query(x));
        }
    }

    /// Count-min never underestimates, and overestimates by at most
    /// `epsilon * N` with the sketch's configured confidence.
    #[test]
    fn additive_accuracy_bound(items in prop::collection::vec(0u32..64, 1..2000)) {
        let epsilon = 0.1;
        let mut prng = Prng::new(3, 3);
        let mut sketch = CountMinSketch::new(epsilon, 0.1, &mut prng).unwrap();

        let mut exact: HashMap<u32, i64> = HashMap::new();
        for &x in &items {
            sketch.update(x, 1);
            *exact.entry(x).or_insert(0) += 1;
        }

        let n = items.len() as f64;
        for (&x, &true_count) in &exact {
            let estimate = sketch.point_query(x);
            prop_assert!(estimate >= true_count, "count-min underestimated {}", x);
            prop_assert!(
                (estimate - true_count) as f64 <= epsilon * n + 1.0,
                "overestimate for {} exceeded epsilon*N: est={} true={} n={}",
                x, estimate, true_count, n
            );
        }
    }
}
