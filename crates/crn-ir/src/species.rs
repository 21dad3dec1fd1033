//! Interned species identifiers.
//!
//! Formal and implementation species live in two disjoint universes. An
//! implementation species may carry the same name as a formal species; it is
//! still a different species.

use ahash::AHashMap;
use std::fmt;

/// Index of a formal species in its [`SpeciesTable`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FormalId(u32);

/// Index of an implementation species in its [`SpeciesTable`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImplId(u32);

impl FormalId {
    #[inline]
    pub fn new(index: usize) -> Self {
        FormalId(index as u32)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl ImplId {
    #[inline]
    pub fn new(index: usize) -> Self {
        ImplId(index as u32)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for FormalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F{}", self.0)
    }
}

impl fmt::Debug for ImplId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "i{}", self.0)
    }
}

/// A species of a partially interpreted reaction: either already formal, or
/// an implementation species whose interpretation is still unknown.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub enum Species {
    Formal(FormalId),
    Impl(ImplId),
}

impl Species {
    #[inline]
    pub fn is_formal(self) -> bool {
        matches!(self, Species::Formal(_))
    }

    #[inline]
    pub fn as_formal(self) -> Option<FormalId> {
        match self {
            Species::Formal(f) => Some(f),
            Species::Impl(_) => None,
        }
    }

    #[inline]
    pub fn as_impl(self) -> Option<ImplId> {
        match self {
            Species::Impl(i) => Some(i),
            Species::Formal(_) => None,
        }
    }
}

impl From<FormalId> for Species {
    fn from(f: FormalId) -> Self {
        Species::Formal(f)
    }
}

impl From<ImplId> for Species {
    fn from(i: ImplId) -> Self {
        Species::Impl(i)
    }
}

/// Name <-> id mapping for both species universes.
#[derive(Debug, Clone, Default)]
pub struct SpeciesTable {
    formal_names: Vec<String>,
    impl_names: Vec<String>,
    formal_index: AHashMap<String, FormalId>,
    impl_index: AHashMap<String, ImplId>,
}

impl SpeciesTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a formal species, returning the existing id if already known.
    pub fn intern_formal(&mut self, name: &str) -> FormalId {
        if let Some(&id) = self.formal_index.get(name) {
            return id;
        }
        let id = FormalId::new(self.formal_names.len());
        self.formal_names.push(name.to_string());
        self.formal_index.insert(name.to_string(), id);
        id
    }

    /// Intern an implementation species, returning the existing id if already known.
    pub fn intern_impl(&mut self, name: &str) -> ImplId {
        if let Some(&id) = self.impl_index.get(name) {
            return id;
        }
        let id = ImplId::new(self.impl_names.len());
        self.impl_names.push(name.to_string());
        self.impl_index.insert(name.to_string(), id);
        id
    }

    pub fn formal(&self, name: &str) -> Option<FormalId> {
        self.formal_index.get(name).copied()
    }

    pub fn implementation(&self, name: &str) -> Option<ImplId> {
        self.impl_index.get(name).copied()
    }

    pub fn formal_name(&self, id: FormalId) -> &str {
        &self.formal_names[id.index()]
    }

    pub fn impl_name(&self, id: ImplId) -> &str {
        &self.impl_names[id.index()]
    }

    pub fn name(&self, species: Species) -> &str {
        match species {
            Species::Formal(f) => self.formal_name(f),
            Species::Impl(i) => self.impl_name(i),
        }
    }

    pub fn num_formal(&self) -> usize {
        self.formal_names.len()
    }

    pub fn num_impl(&self) -> usize {
        self.impl_names.len()
    }

    /// All formal species ids in interning order.
    pub fn formal_ids(&self) -> impl Iterator<Item = FormalId> + '_ {
        (0..self.formal_names.len()).map(FormalId::new)
    }

    /// All implementation species ids in interning order.
    pub fn impl_ids(&self) -> impl Iterator<Item = ImplId> + '_ {
        (0..self.impl_names.len()).map(ImplId::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interning_is_idempotent() {
        let mut table = SpeciesTable::new();
        let a = table.intern_formal("A");
        let b = table.intern_formal("B");
        assert_eq!(table.intern_formal("A"), a);
        assert_ne!(a, b);
        assert_eq!(table.formal_name(b), "B");
        assert_eq!(table.num_formal(), 2);
    }

    #[test]
    fn test_universes_are_disjoint() {
        let mut table = SpeciesTable::new();
        let fa = table.intern_formal("A");
        let ia = table.intern_impl("A");
        assert_ne!(Species::from(fa), Species::from(ia));
        assert_eq!(table.name(Species::Impl(ia)), "A");
        assert_eq!(table.implementation("A"), Some(ia));
        assert_eq!(table.implementation("B"), None);
    }

    #[test]
    fn test_formal_sorts_before_impl() {
        let f = Species::Formal(FormalId::new(7));
        let i = Species::Impl(ImplId::new(0));
        assert!(f < i);
    }
}
