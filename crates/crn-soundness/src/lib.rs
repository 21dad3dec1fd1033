//! Independent checks on interpretations returned by `crn-bisim`, plus
//! helpers for building test problems.

use crn_ir::{CrnPair, CrnPairBuilder, FormalId, Interpretation, Multiset, ReactionSpec};
use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// The same reactions with every species name lowercased.
pub fn renamed(formal: &[ReactionSpec]) -> Vec<ReactionSpec> {
    formal
        .iter()
        .map(|r| ReactionSpec {
            reactants: r.reactants.iter().map(|s| s.to_lowercase()).collect(),
            products: r.products.iter().map(|s| s.to_lowercase()).collect(),
        })
        .collect()
}

/// Whether `r` changes nothing once names are read as a multiset.
pub fn is_identity(r: &ReactionSpec) -> bool {
    let mut reactants = r.reactants.clone();
    let mut products = r.products.clone();
    reactants.sort();
    products.sort();
    reactants == products
}

/// A builder with the lowercased copy of `formal` as implementation.
pub fn copy_pair(formal: &[ReactionSpec]) -> CrnPairBuilder {
    CrnPair::builder()
        .formal_reactions(formal.iter().cloned())
        .implementation_reactions(renamed(formal))
}

/// Check the delimiting and atomic conditions of `intr` directly from the
/// definitions, along with completeness and agreement with the seed.
pub fn is_valid_bisimulation(pair: &CrnPair, intr: &Interpretation) -> Result<(), String> {
    if !intr.is_complete() {
        return Err(format!("incomplete interpretation {intr:?}"));
    }
    for (i, image) in pair.seed.assigned() {
        if intr.get(i) != Some(image) {
            return Err(format!(
                "{} is seeded as {:?} but interpreted as {:?}",
                pair.species.impl_name(i),
                image,
                intr.get(i)
            ));
        }
    }

    let interpreted: Vec<(Multiset<FormalId>, Multiset<FormalId>)> = pair
        .implementation
        .iter()
        .map(|r| (intr.interpret_formal(&r.reactants), intr.interpret_formal(&r.products)))
        .collect();
    let formal: Vec<(Multiset<FormalId>, Multiset<FormalId>)> = pair
        .formal
        .iter()
        .map(|r| (r.reactants.clone(), r.products.clone()))
        .collect();

    for (i, (reactants, products)) in interpreted.iter().enumerate() {
        let trivial = reactants == products;
        let implements = formal.iter().any(|(fr, fp)| fr == reactants && fp == products);
        if !trivial && !implements {
            return Err(format!(
                "{} is neither trivial nor formal",
                pair.format_impl_reaction(i)
            ));
        }
    }
    for (j, f) in formal.iter().enumerate() {
        if !interpreted.contains(f) {
            return Err(format!("{} is not implemented", pair.format_formal_reaction(j)));
        }
    }

    for f in pair.species.formal_ids() {
        let atom = Multiset::singleton(f);
        if !intr.assigned().any(|(_, image)| *image == atom) {
            return Err(format!("{} has no atom", pair.species.formal_name(f)));
        }
    }
    Ok(())
}
