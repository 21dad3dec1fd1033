//! Property: every interpretation the search returns satisfies the
//! delimiting and atomic conditions when checked from the definitions, and
//! a CRN is always bisimilar to a renamed copy of itself.

use crn_bisim::{bisimulations, verify, BisimConfig, PermissiveStrategy};
use crn_ir::{CrnPair, ReactionSpec};
use crn_soundness::{copy_pair, init_tracing, is_identity, is_valid_bisimulation};
use proptest::prelude::*;

fn reaction(names: &'static [&'static str]) -> impl Strategy<Value = ReactionSpec> {
    let side = move || prop::collection::vec(prop::sample::select(names), 0..=2);
    (side(), side())
        .prop_map(|(r, p)| ReactionSpec::new(&r, &p))
        .prop_filter("identity reaction", |r| !is_identity(r))
}

fn crn(names: &'static [&'static str], max: usize) -> impl Strategy<Value = Vec<ReactionSpec>> {
    prop::collection::vec(reaction(names), 1..=max)
}

const FORMAL: &[&str] = &["A", "B", "C"];
const IMPLEMENTATION: &[&str] = &["a", "b", "c", "d"];

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    #[test]
    fn renamed_copy_is_bisimilar(formal in crn(FORMAL, 3)) {
        init_tracing();
        let pair = copy_pair(&formal).build().unwrap();
        let outcome = verify(&pair, &BisimConfig::default());
        let intr = outcome.interpretation();
        prop_assert!(intr.is_some(), "copy of {:?} rejected: {:?}", formal, outcome.failure());
        if let Some(intr) = intr {
            prop_assert_eq!(is_valid_bisimulation(&pair, intr), Ok(()));
        }
    }

    #[test]
    fn identity_seed_passes_every_strategy(formal in crn(FORMAL, 3)) {
        let mut builder = copy_pair(&formal);
        let mut species: Vec<&str> = formal.iter().flat_map(|r| r.species()).collect();
        species.sort_unstable();
        species.dedup();
        for name in species {
            builder = builder.assign(&name.to_lowercase(), &[name]);
        }
        let pair = builder.build().unwrap();
        prop_assert!(pair.seed.is_complete());
        for permissive in [
            PermissiveStrategy::GraphSearch,
            PermissiveStrategy::LoopSearch,
            PermissiveStrategy::ReactionSearch,
            PermissiveStrategy::Smart,
        ] {
            let config = BisimConfig { permissive, ..Default::default() };
            let outcome = verify(&pair, &config);
            prop_assert!(outcome.is_bisimilar(), "{} rejected the identity on {:?}", permissive, formal);
            prop_assert_eq!(outcome.interpretation(), Some(&pair.seed));
        }
    }

    #[test]
    fn returned_interpretations_are_valid(
        formal in crn(FORMAL, 2),
        implementation in crn(IMPLEMENTATION, 3),
    ) {
        let pair = CrnPair::builder()
            .formal_reactions(formal)
            .implementation_reactions(implementation)
            .build()
            .unwrap();
        let config = BisimConfig::default();
        if let Some(intr) = verify(&pair, &config).interpretation() {
            prop_assert_eq!(is_valid_bisimulation(&pair, intr), Ok(()));
        }
        let all = bisimulations(&pair, &config);
        for (i, intr) in all.iter().enumerate() {
            prop_assert_eq!(is_valid_bisimulation(&pair, intr), Ok(()));
            prop_assert!(!all[i + 1..].contains(intr), "duplicate bisimulation {:?}", intr);
        }
    }
}
