//! Partial interpretations of implementation species as formal multisets.

use crate::multiset::Multiset;
use crate::reaction::{ImplReaction, MixedReaction, Reaction};
use crate::species::{FormalId, ImplId, Species, SpeciesTable};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Implementation species name to formal species name to count.
pub type NamedInterpretation = BTreeMap<String, BTreeMap<String, u32>>;

/// Mapping from implementation species to formal multisets.
///
/// Uses `Arc` for cheap cloning. Extending a shared interpretation copies
/// the image table once (`Arc::make_mut`), so sibling search branches never
/// observe each other's assignments. An assigned image is never changed.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Interpretation {
    images: Arc<Vec<Option<Multiset<FormalId>>>>,
}

impl Interpretation {
    /// Interpretation over `num_impl` species with nothing assigned.
    pub fn empty(num_impl: usize) -> Self {
        Interpretation {
            images: Arc::new(vec![None; num_impl]),
        }
    }

    pub fn num_species(&self) -> usize {
        self.images.len()
    }

    #[inline]
    pub fn get(&self, species: ImplId) -> Option<&Multiset<FormalId>> {
        self.images[species.index()].as_ref()
    }

    #[inline]
    pub fn is_assigned(&self, species: ImplId) -> bool {
        self.images[species.index()].is_some()
    }

    /// Assign the image of a not-yet-assigned species.
    pub fn assign(&mut self, species: ImplId, image: Multiset<FormalId>) {
        debug_assert!(
            !self.is_assigned(species),
            "species {:?} is already interpreted",
            species
        );
        Arc::make_mut(&mut self.images)[species.index()] = Some(image);
    }

    /// A copy of `self` extended by `assignments`.
    pub fn extended<I>(&self, assignments: I) -> Self
    where
        I: IntoIterator<Item = (ImplId, Multiset<FormalId>)>,
    {
        let mut out = self.clone();
        for (species, image) in assignments {
            out.assign(species, image);
        }
        out
    }

    pub fn is_complete(&self) -> bool {
        self.images.iter().all(Option::is_some)
    }

    pub fn unassigned(&self) -> impl Iterator<Item = ImplId> + '_ {
        self.images
            .iter()
            .enumerate()
            .filter(|(_, img)| img.is_none())
            .map(|(i, _)| ImplId::new(i))
    }

    pub fn assigned(&self) -> impl Iterator<Item = (ImplId, &Multiset<FormalId>)> + '_ {
        self.images
            .iter()
            .enumerate()
            .filter_map(|(i, img)| img.as_ref().map(|m| (ImplId::new(i), m)))
    }

    /// Species interpreted as the empty multiset.
    pub fn null_species(&self) -> impl Iterator<Item = ImplId> + '_ {
        self.assigned()
            .filter(|(_, img)| img.is_empty())
            .map(|(i, _)| i)
    }

    /// Whether `species` is interpreted as exactly one copy of `formal`.
    pub fn is_atom_of(&self, species: ImplId, formal: FormalId) -> bool {
        self.get(species).is_some_and(|img| {
            img.distinct() == 1 && img.count(formal) == 1
        })
    }

    /// Replace every assigned species of `state` by its image, keeping
    /// unassigned ones as implementation species.
    pub fn substitute(&self, state: &Multiset<ImplId>) -> Multiset<Species> {
        let mut out = Multiset::new();
        for (k, n) in state.iter() {
            match self.get(k) {
                Some(img) => {
                    for (f, m) in img.iter() {
                        out.add(Species::Formal(f), m * n);
                    }
                }
                None => out.add(Species::Impl(k), n),
            }
        }
        out
    }

    pub fn substitute_reaction(&self, rxn: &ImplReaction) -> MixedReaction {
        Reaction::new(self.substitute(&rxn.reactants), self.substitute(&rxn.products))
    }

    /// One level of interpretation over a mixed state: assigned
    /// implementation species are replaced, everything else passes through.
    pub fn interpret(&self, state: &Multiset<Species>) -> Multiset<Species> {
        let mut out = Multiset::new();
        for (k, n) in state.iter() {
            match k {
                Species::Impl(i) => match self.get(i) {
                    Some(img) => {
                        for (f, m) in img.iter() {
                            out.add(Species::Formal(f), m * n);
                        }
                    }
                    None => out.add(k, n),
                },
                Species::Formal(_) => out.add(k, n),
            }
        }
        out
    }

    /// `leq(interpret(x), interpret(y))`.
    pub fn interpreted_leq(&self, x: &Multiset<Species>, y: &Multiset<Species>) -> bool {
        self.interpret(x).leq(&self.interpret(y))
    }

    /// Interpretation of an implementation state whose species are all
    /// assigned. Unassigned species are dropped.
    pub fn interpret_formal(&self, state: &Multiset<ImplId>) -> Multiset<FormalId> {
        let mut out = Multiset::new();
        for (k, n) in state.iter() {
            if let Some(img) = self.get(k) {
                for (f, m) in img.iter() {
                    out.add(f, m * n);
                }
            }
        }
        out
    }

    /// Interpreted reactants equal interpreted products.
    pub fn is_trivial(&self, rxn: &ImplReaction) -> bool {
        self.interpret_formal(&rxn.reactants) == self.interpret_formal(&rxn.products)
    }

    /// Name-keyed view, for reporting.
    pub fn to_named(&self, species: &SpeciesTable) -> NamedInterpretation {
        self.assigned()
            .map(|(i, img)| {
                let image = img
                    .iter()
                    .map(|(f, n)| (species.formal_name(f).to_string(), n))
                    .collect();
                (species.impl_name(i).to_string(), image)
            })
            .collect()
    }
}

impl fmt::Debug for Interpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.assigned()).finish()
    }
}
