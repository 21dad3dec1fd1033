//! Compositional verification: one bisimulation per module, each passing
//! the modularity condition, merged into a global interpretation.

use crate::conditions::passes_modularity;
use crate::error::{BisimError, BisimResult};
use crate::outcome::SearchStats;
use crate::search::{for_each_bisimulation, BisimConfig};
use ahash::AHashSet;
use crn_ir::{CrnPair, FormalId, ImplId, NamedInterpretation, ReactionSpec};
use std::collections::BTreeMap;
use std::ops::ControlFlow;
use tracing::{debug, info};

/// Formal and implementation CRNs split into modules.
///
/// `implementation_modules` may hold one module more than
/// `formal_modules`. That extra module must implement nothing: its
/// reactions interpret as trivial, and only species seeded into formal
/// species may appear in them.
#[derive(Debug, Clone, Default)]
pub struct ModularProblem {
    pub formal_modules: Vec<Vec<ReactionSpec>>,
    pub implementation_modules: Vec<Vec<ReactionSpec>>,
    /// Implementation species name to formal species names (repetition for
    /// counts). Must cover every implementation species shared by modules.
    pub seed: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone)]
pub enum ModularOutcome {
    Bisimilar {
        interpretation: NamedInterpretation,
        stats: SearchStats,
    },
    /// Module `module` has no bisimulation passing the modularity condition.
    NotBisimilar { module: usize, stats: SearchStats },
}

impl ModularOutcome {
    pub fn is_bisimilar(&self) -> bool {
        matches!(self, ModularOutcome::Bisimilar { .. })
    }
}

/// Module indices each species name occurs in.
fn membership<'r>(modules: &'r [Vec<ReactionSpec>]) -> BTreeMap<&'r str, Vec<usize>> {
    let mut out: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (e, module) in modules.iter().enumerate() {
        let mut seen = AHashSet::new();
        for name in module.iter().flat_map(|r| r.species()) {
            if seen.insert(name) {
                out.entry(name).or_default().push(e);
            }
        }
    }
    out
}

pub fn verify_modular(problem: &ModularProblem, config: &BisimConfig) -> BisimResult<ModularOutcome> {
    let mut formal_modules = problem.formal_modules.clone();
    let implementation_modules = &problem.implementation_modules;
    let extra = formal_modules.len() + 1 == implementation_modules.len();
    if extra {
        formal_modules.push(Vec::new());
    } else if formal_modules.len() != implementation_modules.len() {
        return Err(BisimError::ModuleCountMismatch {
            formal: formal_modules.len(),
            implementation: implementation_modules.len(),
        });
    }

    let impl_in = membership(implementation_modules);
    let mut formal_in: BTreeMap<String, Vec<usize>> = membership(&formal_modules)
        .into_iter()
        .map(|(name, modules)| (name.to_string(), modules))
        .collect();
    if extra {
        let last = formal_modules.len() - 1;
        for module in &implementation_modules[last..] {
            for name in module.iter().flat_map(|r| r.species()) {
                for f in problem.seed.get(name).into_iter().flatten() {
                    let modules = formal_in.entry(f.clone()).or_default();
                    if !modules.contains(&last) {
                        modules.push(last);
                    }
                }
            }
        }
    }

    for (name, modules) in &impl_in {
        if modules.len() > 1 && !problem.seed.contains_key(*name) {
            return Err(BisimError::UnseededSharedSpecies {
                species: name.to_string(),
            });
        }
    }

    info!(modules = formal_modules.len(), extra, "starting modular verification");
    let mut merged = problem.seed.clone();
    let mut stats = SearchStats::default();
    for (e, (formal, implementation)) in formal_modules.iter().zip(implementation_modules).enumerate() {
        let mut builder = CrnPair::builder()
            .formal_reactions(formal.iter().cloned())
            .implementation_reactions(implementation.iter().cloned());
        for (name, modules) in &formal_in {
            if modules.contains(&e) {
                builder = builder.formal_species(name);
            }
        }
        for (name, image) in &merged {
            if impl_in.get(name.as_str()).is_some_and(|m| m.contains(&e)) {
                builder = builder.assign_owned(name.clone(), image.clone());
            }
        }
        let pair = builder.build()?;

        let common_formal: AHashSet<FormalId> = formal_in
            .iter()
            .filter(|(_, m)| m.len() > 1 && m.contains(&e))
            .filter_map(|(name, _)| pair.species.formal(name))
            .collect();
        let common_impl: AHashSet<ImplId> = impl_in
            .iter()
            .filter(|(_, m)| m.len() > 1 && m.contains(&e))
            .filter_map(|(name, _)| pair.species.implementation(name))
            .collect();

        let mut chosen = None;
        let module_stats = for_each_bisimulation(&pair, config, |intr| {
            if passes_modularity(&pair.implementation, intr, &common_impl, &common_formal) {
                chosen = Some(intr.to_named(&pair.species));
                ControlFlow::Break(())
            } else {
                debug!(module = e, interpretation = ?intr, "skipping non-modular bisimulation");
                ControlFlow::Continue(())
            }
        });
        stats.merge(&module_stats);

        let Some(named) = chosen else {
            info!(module = e, "module has no modular bisimulation");
            return Ok(ModularOutcome::NotBisimilar { module: e, stats });
        };
        debug!(module = e, species = named.len(), "module verified");
        for (species, image) in named {
            let names = image
                .into_iter()
                .flat_map(|(f, n)| std::iter::repeat(f).take(n as usize))
                .collect();
            merged.insert(species, names);
        }
    }

    let interpretation = merged
        .into_iter()
        .map(|(species, names)| {
            let mut image: BTreeMap<String, u32> = BTreeMap::new();
            for f in names {
                *image.entry(f).or_default() += 1;
            }
            (species, image)
        })
        .collect();
    Ok(ModularOutcome::Bisimilar {
        interpretation,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rxn(reactants: &[&str], products: &[&str]) -> ReactionSpec {
        ReactionSpec::new(reactants, products)
    }

    fn chain() -> ModularProblem {
        ModularProblem {
            formal_modules: vec![vec![rxn(&["A"], &["B"])], vec![rxn(&["B"], &["C"])]],
            implementation_modules: vec![
                vec![rxn(&["a"], &["x"]), rxn(&["x"], &["b"])],
                vec![rxn(&["b"], &["c"])],
            ],
            seed: BTreeMap::from([("b".to_string(), vec!["B".to_string()])]),
        }
    }

    #[test]
    fn test_modules_merge() {
        let outcome = verify_modular(&chain(), &BisimConfig::default()).unwrap();
        let ModularOutcome::Bisimilar { interpretation, .. } = outcome else {
            panic!("expected a modular bisimulation");
        };
        let one = |f: &str| BTreeMap::from([(f.to_string(), 1u32)]);
        assert_eq!(interpretation["a"], one("A"));
        assert_eq!(interpretation["b"], one("B"));
        assert_eq!(interpretation["c"], one("C"));
        assert!(interpretation.contains_key("x"));
    }

    #[test]
    fn test_shared_species_must_be_seeded() {
        let mut problem = chain();
        problem.seed.clear();
        assert_eq!(
            verify_modular(&problem, &BisimConfig::default()).unwrap_err(),
            BisimError::UnseededSharedSpecies {
                species: "b".to_string()
            }
        );
    }

    #[test]
    fn test_module_count_mismatch() {
        let mut problem = chain();
        problem.formal_modules.push(vec![rxn(&["C"], &["A"])]);
        problem.formal_modules.push(vec![rxn(&["C"], &["B"])]);
        assert!(matches!(
            verify_modular(&problem, &BisimConfig::default()),
            Err(BisimError::ModuleCountMismatch {
                formal: 4,
                implementation: 2
            })
        ));
    }

    #[test]
    fn test_failing_module_is_reported() {
        let mut problem = chain();
        // c never becomes C
        problem.implementation_modules[1] = vec![rxn(&["b"], &["c"]), rxn(&["c"], &["b"])];
        let outcome = verify_modular(&problem, &BisimConfig::default()).unwrap();
        assert!(matches!(outcome, ModularOutcome::NotBisimilar { module: 1, .. }));
    }
}
