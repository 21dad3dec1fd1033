//! End-to-end verification runs over small formal/implementation pairs.
//!
//! Set `RUST_LOG=crn_bisim=debug` to see the search.

use crn_bisim::{
    bisimulations, verify, BisimConfig, BisimOutcome, FailureKind, PermissiveStrategy,
    VerificationReport,
};
use crn_ir::{CrnPair, CrnPairBuilder, Interpretation, ReactionSpec};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

const STRATEGIES: [PermissiveStrategy; 4] = [
    PermissiveStrategy::GraphSearch,
    PermissiveStrategy::LoopSearch,
    PermissiveStrategy::ReactionSearch,
    PermissiveStrategy::Smart,
];

fn with_strategy(permissive: PermissiveStrategy) -> BisimConfig {
    BisimConfig {
        permissive,
        ..Default::default()
    }
}

/// Image of `species` as sorted formal names.
fn image(pair: &CrnPair, intr: &Interpretation, species: &str) -> Vec<String> {
    let id = pair
        .species
        .implementation(species)
        .unwrap_or_else(|| panic!("unknown species {species}"));
    intr.get(id)
        .unwrap_or_else(|| panic!("{species} is not interpreted"))
        .elements()
        .map(|f| pair.species.formal_name(f).to_string())
        .collect()
}

fn names(xs: &[&str]) -> Vec<String> {
    xs.iter().map(|s| s.to_string()).collect()
}

fn direct() -> CrnPair {
    CrnPair::builder()
        .formal_reaction(&["A"], &["B"])
        .implementation_reaction(&["a"], &["b"])
        .build()
        .unwrap()
}

fn wire() -> CrnPair {
    CrnPair::builder()
        .formal_reaction(&["A"], &["B"])
        .implementation_reaction(&["a"], &["c"])
        .implementation_reaction(&["c"], &["b"])
        .build()
        .unwrap()
}

/// `a + i -> b` needs `i`, which nothing produces.
fn stuck() -> CrnPair {
    CrnPair::builder()
        .formal_reaction(&["A"], &["B"])
        .implementation_reaction(&["a", "i"], &["b"])
        .build()
        .unwrap()
}

/// `x0 -> x1 -> ... -> x4` with every step but the last trivial.
fn long_relay() -> CrnPair {
    let mut builder = CrnPair::builder().formal_reaction(&["A"], &["B"]);
    for i in 0..4 {
        builder = builder.implementation_reactions([ReactionSpec {
            reactants: vec![format!("x{i}")],
            products: vec![format!("x{}", i + 1)],
        }]);
    }
    for i in 0..4 {
        builder = builder.assign_owned(format!("x{i}"), names(&["A"]));
    }
    builder.assign("x4", &["B"]).build().unwrap()
}

/// Reversible A + B <-> C through one intermediate.
fn bind_release() -> CrnPairBuilder {
    CrnPair::builder()
        .formal_reaction(&["A", "B"], &["C"])
        .formal_reaction(&["C"], &["A", "B"])
        .implementation_reaction(&["a", "b"], &["i"])
        .implementation_reaction(&["i"], &["a", "b"])
        .implementation_reaction(&["i"], &["c"])
        .implementation_reaction(&["c"], &["i"])
}

#[test]
fn test_direct_implementation() {
    init_tracing();
    let pair = direct();
    for strategy in STRATEGIES {
        let outcome = verify(&pair, &with_strategy(strategy));
        let intr = outcome
            .interpretation()
            .unwrap_or_else(|| panic!("{strategy}: expected a bisimulation"));
        assert_eq!(image(&pair, intr, "a"), names(&["A"]));
        assert_eq!(image(&pair, intr, "b"), names(&["B"]));
    }
}

#[test]
fn test_wire_intermediate_is_never_null() {
    init_tracing();
    let pair = wire();
    let outcome = verify(&pair, &BisimConfig::default());
    let intr = outcome.interpretation().expect("wire is bisimilar");
    assert_eq!(image(&pair, intr, "a"), names(&["A"]));
    assert_eq!(image(&pair, intr, "b"), names(&["B"]));
    assert_eq!(image(&pair, intr, "c").len(), 1);

    // c as {} would make a -> c read A -> ∅
    let all = bisimulations(&pair, &BisimConfig::default());
    assert_eq!(all.len(), 2);
    for intr in &all {
        assert!(!image(&pair, intr, "c").is_empty());
    }
}

#[test]
fn test_seeded_intermediate_is_respected() {
    let pair = CrnPair::builder()
        .formal_reaction(&["A"], &["B"])
        .implementation_reaction(&["a"], &["c"])
        .implementation_reaction(&["c"], &["b"])
        .assign("c", &["B"])
        .build()
        .unwrap();
    let outcome = verify(&pair, &BisimConfig::default());
    let intr = outcome.interpretation().expect("seed admits a bisimulation");
    assert_eq!(image(&pair, intr, "c"), names(&["B"]));
    assert_eq!(image(&pair, intr, "a"), names(&["A"]));
}

#[test]
fn test_seed_can_rule_everything_out() {
    let pair = CrnPair::builder()
        .formal_reaction(&["A"], &["B"])
        .implementation_reaction(&["a"], &["b"])
        .assign("a", &["B"])
        .build()
        .unwrap();
    let failure = verify(&pair, &BisimConfig::default())
        .failure()
        .cloned()
        .expect("B -> x never implements A -> B");
    assert_eq!(failure.kind, FailureKind::SearchExhausted);
    assert!(failure.blocker.is_some());
    assert!(failure.witness.is_none());
}

#[test]
fn test_unproducible_species_refutes_permissive() {
    init_tracing();
    let pair = stuck();
    for strategy in STRATEGIES {
        let outcome = verify(&pair, &with_strategy(strategy));
        let failure = outcome
            .failure()
            .unwrap_or_else(|| panic!("{strategy}: a + i -> b must not be bisimilar"));
        assert_eq!(failure.kind, FailureKind::PermissiveRefuted, "{strategy}");
        let witness = failure.witness.as_ref().expect("refutation has a witness");
        assert_eq!(witness.formal_reaction, 0);
        assert_eq!(witness.state.size(), 1);
        assert!(failure.stats.permissive_refutations > 0);
    }
}

#[test]
fn test_reaction_search_bound_is_indeterminate() {
    let pair = long_relay();
    let bounded = BisimConfig {
        permissive: PermissiveStrategy::ReactionSearch,
        permissive_depth: Some(1),
        ..Default::default()
    };
    let failure = verify(&pair, &bounded)
        .failure()
        .cloned()
        .expect("one step is not enough to cross the relay");
    assert_eq!(failure.kind, FailureKind::Indeterminate);
    assert_eq!(failure.stats.permissive_indeterminate, 1);

    for strategy in STRATEGIES {
        assert!(verify(&pair, &with_strategy(strategy)).is_bisimilar(), "{strategy}");
    }
    let smart = BisimConfig {
        permissive: PermissiveStrategy::Smart,
        permissive_depth: Some(1),
        ..Default::default()
    };
    assert!(verify(&pair, &smart).is_bisimilar());
}

#[test]
fn test_iteration_caps_are_indeterminate() {
    let pair = long_relay();
    for permissive in [PermissiveStrategy::GraphSearch, PermissiveStrategy::LoopSearch] {
        let config = BisimConfig {
            permissive,
            permissive_depth: Some(1),
            ..Default::default()
        };
        let outcome = verify(&pair, &config);
        assert_eq!(
            outcome.failure().map(|f| f.kind),
            Some(FailureKind::Indeterminate),
            "{permissive}"
        );
    }
}

/// `x0 -> m` is explored after `m` was first reached two steps deep
/// through `y1`, and must still count as the shorter path to `g`.
#[test]
fn test_reaction_search_revisits_on_shorter_path() {
    let mut builder = CrnPair::builder()
        .formal_reaction(&["A"], &["B"])
        .implementation_reaction(&["x0"], &["y1"])
        .implementation_reaction(&["y1"], &["m"])
        .implementation_reaction(&["x0"], &["m"])
        .implementation_reaction(&["m"], &["n"])
        .implementation_reaction(&["n"], &["g"])
        .implementation_reaction(&["g"], &["b"]);
    for species in ["x0", "y1", "m", "n", "g"] {
        builder = builder.assign(species, &["A"]);
    }
    let pair = builder.assign("b", &["B"]).build().unwrap();

    let within = BisimConfig {
        permissive: PermissiveStrategy::ReactionSearch,
        permissive_depth: Some(3),
        ..Default::default()
    };
    assert!(verify(&pair, &within).is_bisimilar());

    let short = BisimConfig {
        permissive_depth: Some(2),
        ..within
    };
    assert_eq!(
        verify(&pair, &short).failure().map(|f| f.kind),
        Some(FailureKind::Indeterminate)
    );
}

#[test]
fn test_result_is_a_fixed_point() {
    let pair = bind_release().build().unwrap();
    let first = verify(&pair, &BisimConfig::default());
    let intr = first.interpretation().expect("bisimilar");

    let mut builder = bind_release();
    for (species, image) in intr.to_named(&pair.species) {
        let formal = image
            .into_iter()
            .flat_map(|(f, n)| std::iter::repeat(f).take(n as usize))
            .collect();
        builder = builder.assign_owned(species, formal);
    }
    let seeded = builder.build().unwrap();
    assert!(seeded.seed.is_complete());

    let again = verify(&seeded, &BisimConfig::default());
    assert!(again.is_bisimilar());
    assert_eq!(again.stats().column_nodes, 0);
    assert_eq!(again.stats().row_nodes, 0);
    assert_eq!(again.interpretation(), Some(&seeded.seed));
}

#[test]
fn test_enumeration_has_no_duplicates() {
    let pair = CrnPair::builder()
        .formal_reaction(&["A", "B"], &["C"])
        .implementation_reaction(&["a", "b"], &["c"])
        .implementation_reaction(&["c"], &["d"])
        .build()
        .unwrap();
    let all = bisimulations(&pair, &BisimConfig::default());
    assert!(!all.is_empty());
    for (i, x) in all.iter().enumerate() {
        assert!(x.is_complete());
        for y in &all[i + 1..] {
            assert_ne!(x, y);
        }
    }
}

#[test]
fn test_parallel_search() {
    let pair = wire();
    let outcome = verify(
        &pair,
        &BisimConfig {
            parallel: true,
            num_threads: 2,
            ..Default::default()
        },
    );
    assert!(outcome.is_bisimilar());

    let refuted = verify(
        &stuck(),
        &BisimConfig {
            parallel: true,
            ..Default::default()
        },
    );
    assert_eq!(refuted.failure().map(|f| f.kind), Some(FailureKind::PermissiveRefuted));
}

#[test]
fn test_shuffled_trivial_order_agrees() {
    let pair = long_relay();
    for seed in 0..4 {
        let config = BisimConfig {
            permissive: PermissiveStrategy::ReactionSearch,
            shuffle_seed: Some(seed),
            ..Default::default()
        };
        assert!(verify(&pair, &config).is_bisimilar(), "seed {seed}");
    }
}

#[test]
fn test_report_serializes_names() {
    let pair = stuck();
    let config = BisimConfig::default();
    let outcome = verify(&pair, &config);
    let report = VerificationReport::new(&pair, &config, &outcome);
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["bisimilar"], false);
    assert_eq!(json["strategy"], "graphsearch");
    assert!(json["interpretation"].is_null());
    assert_eq!(json["failure"]["kind"], "PermissiveRefuted");
    assert_eq!(json["failure"]["witness"]["formal_reaction"], "A -> B");
    assert_eq!(json["failure"]["witness"]["interpretation"]["b"]["B"], 1);

    let pair = direct();
    let outcome = verify(&pair, &config);
    let json = serde_json::to_value(VerificationReport::new(&pair, &config, &outcome)).unwrap();
    assert_eq!(json["bisimilar"], true);
    assert_eq!(json["interpretation"]["a"]["A"], 1);
    assert!(json["failure"].is_null());
}

#[test]
fn test_empty_implementation_fails() {
    let pair = CrnPair::builder()
        .formal_reaction(&["A"], &["B"])
        .build()
        .unwrap();
    match verify(&pair, &BisimConfig::default()) {
        BisimOutcome::NotBisimilar(failure) => {
            assert_eq!(failure.kind, FailureKind::SearchExhausted);
            assert_eq!(failure.blocker, Some(crn_bisim::Blocker::FormalReaction(0)));
        }
        BisimOutcome::Bisimilar { .. } => panic!("nothing implements A -> B"),
    }
}
