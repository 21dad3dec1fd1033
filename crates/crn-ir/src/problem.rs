//! A formal CRN, an implementation CRN and an optional seeded interpretation.

use crate::error::{IrError, IrResult};
use crate::interpretation::Interpretation;
use crate::multiset::Multiset;
use crate::reaction::{FormalReaction, ImplReaction, Reaction};
use crate::species::{FormalId, ImplId, SpeciesTable};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// A reaction given by species names, with repetition for stoichiometry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionSpec {
    pub reactants: Vec<String>,
    pub products: Vec<String>,
}

impl ReactionSpec {
    pub fn new(reactants: &[&str], products: &[&str]) -> Self {
        ReactionSpec {
            reactants: reactants.iter().map(|s| s.to_string()).collect(),
            products: products.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn species(&self) -> impl Iterator<Item = &str> {
        self.reactants
            .iter()
            .chain(self.products.iter())
            .map(String::as_str)
    }
}

/// The verification problem: both CRNs over interned species, and the
/// seeded partial interpretation every result must extend.
#[derive(Debug, Clone)]
pub struct CrnPair {
    pub species: SpeciesTable,
    pub formal: Vec<FormalReaction>,
    pub implementation: Vec<ImplReaction>,
    pub seed: Interpretation,
}

impl CrnPair {
    pub fn builder() -> CrnPairBuilder {
        CrnPairBuilder::default()
    }

    pub fn num_formal_species(&self) -> usize {
        self.species.num_formal()
    }

    pub fn num_impl_species(&self) -> usize {
        self.species.num_impl()
    }

    pub fn format_formal_state(&self, state: &Multiset<FormalId>) -> String {
        format_state(state, |f| self.species.formal_name(f))
    }

    pub fn format_impl_state(&self, state: &Multiset<ImplId>) -> String {
        format_state(state, |i| self.species.impl_name(i))
    }

    pub fn format_formal_reaction(&self, index: usize) -> String {
        let rxn = &self.formal[index];
        format!(
            "{} -> {}",
            self.format_formal_state(&rxn.reactants),
            self.format_formal_state(&rxn.products)
        )
    }

    pub fn format_impl_reaction(&self, index: usize) -> String {
        let rxn = &self.implementation[index];
        format!(
            "{} -> {}",
            self.format_impl_state(&rxn.reactants),
            self.format_impl_state(&rxn.products)
        )
    }
}

/// Render a state as `a + a + b`, or `∅` when empty.
pub fn format_state<'a, K, F>(state: &Multiset<K>, name: F) -> String
where
    K: Copy + Ord,
    F: Fn(K) -> &'a str,
{
    if state.is_empty() {
        return "∅".to_string();
    }
    state.elements().map(&name).collect::<Vec<_>>().join(" + ")
}

/// Collects named reactions and seeds; [`build`](CrnPairBuilder::build)
/// interns species and validates.
#[derive(Debug, Clone, Default)]
pub struct CrnPairBuilder {
    formal: Vec<ReactionSpec>,
    implementation: Vec<ReactionSpec>,
    extra_formal: Vec<String>,
    seed: Vec<(String, Vec<String>)>,
}

impl CrnPairBuilder {
    pub fn formal_reaction(mut self, reactants: &[&str], products: &[&str]) -> Self {
        self.formal.push(ReactionSpec::new(reactants, products));
        self
    }

    pub fn implementation_reaction(mut self, reactants: &[&str], products: &[&str]) -> Self {
        self.implementation.push(ReactionSpec::new(reactants, products));
        self
    }

    pub fn formal_reactions<I: IntoIterator<Item = ReactionSpec>>(mut self, rxns: I) -> Self {
        self.formal.extend(rxns);
        self
    }

    pub fn implementation_reactions<I: IntoIterator<Item = ReactionSpec>>(
        mut self,
        rxns: I,
    ) -> Self {
        self.implementation.extend(rxns);
        self
    }

    /// A formal species that need not occur in any formal reaction. It still
    /// has to be represented atomically.
    pub fn formal_species(mut self, name: &str) -> Self {
        self.extra_formal.push(name.to_string());
        self
    }

    /// Seed `species` with the image `formal` (repetition for counts).
    pub fn assign(mut self, species: &str, formal: &[&str]) -> Self {
        self.seed.push((
            species.to_string(),
            formal.iter().map(|s| s.to_string()).collect(),
        ));
        self
    }

    pub fn assign_owned(mut self, species: String, formal: Vec<String>) -> Self {
        self.seed.push((species, formal));
        self
    }

    pub fn build(self) -> IrResult<CrnPair> {
        let mut species = SpeciesTable::new();

        let mut formal: Vec<FormalReaction> = Vec::with_capacity(self.formal.len());
        for r in &self.formal {
            let reactants = r.reactants.iter().map(|s| species.intern_formal(s)).collect();
            let products = r.products.iter().map(|s| species.intern_formal(s)).collect();
            formal.push(Reaction::new(reactants, products));
        }
        for name in &self.extra_formal {
            species.intern_formal(name);
        }

        let mut implementation = Vec::with_capacity(self.implementation.len());
        for (index, r) in self.implementation.iter().enumerate() {
            let reactants = r.reactants.iter().map(|s| species.intern_impl(s)).collect();
            let products = r.products.iter().map(|s| species.intern_impl(s)).collect();
            let rxn: ImplReaction = Reaction::new(reactants, products);
            if rxn.is_identity() {
                return Err(IrError::IdentityReaction { index });
            }
            implementation.push(rxn);
        }

        let mut images: AHashMap<ImplId, Multiset<FormalId>> = AHashMap::new();
        for (name, image) in &self.seed {
            let id = species
                .implementation(name)
                .ok_or_else(|| IrError::UnknownImplementationSpecies {
                    species: name.clone(),
                })?;
            let mut img = Multiset::new();
            for f in image {
                let fid = species
                    .formal(f)
                    .ok_or_else(|| IrError::UnknownFormalSpecies {
                        species: name.clone(),
                        formal: f.clone(),
                    })?;
                img.add(fid, 1);
            }
            if let Some(prev) = images.get(&id) {
                if *prev != img {
                    return Err(IrError::ConflictingAssignment {
                        species: name.clone(),
                    });
                }
                continue;
            }
            images.insert(id, img);
        }

        let mut seed = Interpretation::empty(species.num_impl());
        let mut ordered: Vec<_> = images.into_iter().collect();
        ordered.sort_by_key(|(id, _)| *id);
        for (id, img) in ordered {
            seed.assign(id, img);
        }

        Ok(CrnPair {
            species,
            formal,
            implementation,
            seed,
        })
    }
}
