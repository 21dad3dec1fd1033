//! Reactions over formal, implementation, or mixed species.

use crate::multiset::Multiset;
use crate::species::{FormalId, ImplId, Species};

/// A reaction `reactants -> products`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reaction<K: Copy + Ord> {
    pub reactants: Multiset<K>,
    pub products: Multiset<K>,
}

pub type FormalReaction = Reaction<FormalId>;
pub type ImplReaction = Reaction<ImplId>;
/// An implementation reaction after substituting a partial interpretation.
pub type MixedReaction = Reaction<Species>;

impl<K: Copy + Ord> Reaction<K> {
    pub fn new(reactants: Multiset<K>, products: Multiset<K>) -> Self {
        Reaction {
            reactants,
            products,
        }
    }

    /// Reactants and products are the same multiset.
    pub fn is_identity(&self) -> bool {
        self.reactants == self.products
    }

    /// Net consumption `reactants - products` (clamped per key).
    pub fn consumed(&self) -> Multiset<K> {
        self.reactants.difference(&self.products)
    }

    /// Net production `products - reactants` (clamped per key).
    pub fn produced(&self) -> Multiset<K> {
        self.products.difference(&self.reactants)
    }

    /// Signed net change of `key` when the reaction fires once, as `R[k] - P[k]`.
    pub fn net_consumption(&self, key: K) -> i64 {
        self.reactants.count(key) as i64 - self.products.count(key) as i64
    }

    /// Whether the reaction can fire in `state`.
    pub fn enabled_in(&self, state: &Multiset<K>) -> bool {
        self.reactants.leq(state)
    }

    /// Fire once in `state`. Caller must ensure the reaction is enabled.
    pub fn fire(&self, state: &Multiset<K>) -> Multiset<K> {
        debug_assert!(self.enabled_in(state));
        state.difference(&self.reactants).sum(&self.products)
    }

    /// All distinct species mentioned on either side.
    pub fn species(&self) -> impl Iterator<Item = K> + '_ {
        self.reactants
            .keys()
            .chain(self.products.keys().filter(|k| !self.reactants.contains(*k)))
    }
}
