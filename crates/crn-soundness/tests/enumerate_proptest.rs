//! Property: the combinatorial enumerations yield exactly what they claim,
//! without duplicates.

use crn_bisim::enumerate::{arrangements, partitions, subsets};
use crn_ir::Multiset;
use proptest::prelude::*;
use std::collections::HashSet;

fn multiset() -> impl Strategy<Value = Multiset<u8>> {
    prop::collection::btree_map(0u8..3, 0u32..=3, 0..=3).prop_map(|counts| Multiset::from_counts(counts))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    #[test]
    fn subsets_are_all_distinct_subsets(m in multiset()) {
        let all: Vec<_> = subsets(&m).collect();
        let expected: usize = m.iter().map(|(_, n)| n as usize + 1).product();
        prop_assert_eq!(all.len(), expected);
        prop_assert!(all.iter().all(|s| s.leq(&m)));
        let unique: HashSet<_> = all.iter().cloned().collect();
        prop_assert_eq!(unique.len(), all.len());
    }

    #[test]
    fn partitions_sum_to_target(
        target in multiset(),
        weights in prop::collection::vec(0u32..=3, 0..=3),
    ) {
        let mut seen = HashSet::new();
        for parts in partitions(&target, &weights) {
            prop_assert_eq!(parts.len(), weights.len());
            let total = parts
                .iter()
                .zip(&weights)
                .fold(Multiset::new(), |acc, (part, &w)| acc.sum(&part.scale(w)));
            prop_assert_eq!(&total, &target);
            for (part, &w) in parts.iter().zip(&weights) {
                if w == 0 {
                    prop_assert!(part.is_empty());
                }
            }
            prop_assert!(seen.insert(parts), "duplicate partition");
        }
    }

    #[test]
    fn unit_weight_partitions_are_complete(target in multiset(), n in 1usize..=3) {
        // each key's count splits into n ordered parts: C(count + n - 1, n - 1) ways
        let choose = |top: usize, k: usize| -> usize {
            (0..k).fold(1, |acc, i| acc * (top - i) / (i + 1))
        };
        let expected: usize = target
            .iter()
            .map(|(_, c)| choose(c as usize + n - 1, n - 1))
            .product();
        prop_assert_eq!(partitions(&target, &vec![1; n]).count(), expected);
    }

    #[test]
    fn arrangement_count(n in 0usize..=5, k in 0usize..=5) {
        let items: Vec<usize> = (0..n).collect();
        let all: Vec<_> = arrangements(items, k).collect();
        let expected = if k > n { 0 } else { (n - k + 1..=n).product::<usize>() };
        prop_assert_eq!(all.len(), expected);
        for a in &all {
            prop_assert_eq!(a.len(), k);
            let distinct: HashSet<_> = a.iter().collect();
            prop_assert_eq!(distinct.len(), k);
        }
    }
}
