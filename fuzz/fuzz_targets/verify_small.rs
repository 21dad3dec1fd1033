#![no_main]
use crn_bisim::{verify, BisimConfig, BisimOutcome};
use crn_ir::{CrnPair, ReactionSpec};
use libfuzzer_sys::fuzz_target;

const FORMAL: [&str; 3] = ["A", "B", "C"];
const IMPLEMENTATION: [&str; 4] = ["a", "b", "c", "d"];

/// Two bytes per reaction: the low and high nibbles give up to two
/// reactants and two products.
fn decode(bytes: &[u8], names: &[&str]) -> Vec<ReactionSpec> {
    let pick = |n: u8| -> Option<String> {
        let n = n as usize % (names.len() + 1);
        (n < names.len()).then(|| names[n].to_string())
    };
    bytes
        .chunks_exact(2)
        .map(|pair| ReactionSpec {
            reactants: [pair[0] & 0xf, pair[0] >> 4].into_iter().filter_map(pick).collect(),
            products: [pair[1] & 0xf, pair[1] >> 4].into_iter().filter_map(pick).collect(),
        })
        .collect()
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 || data.len() > 12 {
        return;
    }
    let split = (data[0] as usize % 2 + 1) * 2 + 1;
    if split > data.len() {
        return;
    }
    let formal = decode(&data[1..split], &FORMAL);
    let implementation = decode(&data[split..], &IMPLEMENTATION);
    let Ok(pair) = CrnPair::builder()
        .formal_reactions(formal)
        .implementation_reactions(implementation)
        .build()
    else {
        return;
    };
    if let BisimOutcome::Bisimilar { interpretation, .. } = verify(&pair, &BisimConfig::default()) {
        assert!(interpretation.is_complete());
        for rxn in &pair.implementation {
            let reactants = interpretation.interpret_formal(&rxn.reactants);
            let products = interpretation.interpret_formal(&rxn.products);
            let formal = pair
                .formal
                .iter()
                .any(|f| f.reactants == reactants && f.products == products);
            assert!(reactants == products || formal);
        }
    }
});
