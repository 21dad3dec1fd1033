//! The delimiting table: which implementation reactions may still
//! implement which formal reactions, and which may still be trivial.
//!
//! Entries are necessary conditions only. Extending the interpretation can
//! only turn entries from true to false, so a dead row or column proves the
//! whole branch dead.

use crate::enumerate::partitions;
use crate::outcome::Blocker;
use crn_ir::{FormalId, FormalReaction, ImplId, MixedReaction, Multiset, Reaction, Species};

/// Lift a formal reaction into mixed species.
pub fn lift(rxn: &FormalReaction) -> MixedReaction {
    Reaction::new(
        rxn.reactants.map_keys(Species::Formal),
        rxn.products.map_keys(Species::Formal),
    )
}

/// One side (reactants or products) of a substituted implementation
/// reaction compared against the same side of a formal reaction.
#[derive(Debug, Clone)]
pub struct SideDiff {
    /// Unassigned implementation species in surplus, with their counts.
    pub unassigned: Multiset<ImplId>,
    /// Formal species in surplus on the implementation side.
    pub formal_surplus: bool,
    /// Formal species the implementation side is still missing.
    pub deficit: Multiset<FormalId>,
}

impl SideDiff {
    pub fn new(implementation: &Multiset<Species>, formal: &Multiset<Species>) -> Self {
        let surplus = implementation.difference(formal);
        SideDiff {
            unassigned: surplus.filter_map_keys(Species::as_impl),
            formal_surplus: surplus.any_key(Species::is_formal),
            deficit: formal.difference(implementation).filter_map_keys(Species::as_formal),
        }
    }

    pub fn keys(&self) -> Vec<ImplId> {
        self.unassigned.keys().collect()
    }

    pub fn weights(&self) -> Vec<u32> {
        self.unassigned.iter().map(|(_, n)| n).collect()
    }

    /// Whether the unassigned surplus can still be interpreted so that the
    /// sides match exactly.
    pub fn is_feasible(&self) -> bool {
        !self.formal_surplus && partitions(&self.deficit, &self.weights()).next().is_some()
    }
}

/// Whether `rxn` could become trivial once its unassigned species are
/// interpreted.
pub fn may_be_trivial(rxn: &MixedReaction) -> bool {
    let consumed = rxn.consumed();
    let produced = rxn.produced();
    let consumed_formal = consumed.filter_map_keys(Species::as_formal);
    let produced_formal = produced.filter_map_keys(Species::as_formal);
    let consumed_impl: Multiset<ImplId> = consumed.filter_map_keys(Species::as_impl);
    let produced_impl: Multiset<ImplId> = produced.filter_map_keys(Species::as_impl);

    match (consumed_impl.is_empty(), produced_impl.is_empty()) {
        (true, true) => consumed_formal.is_empty() && produced_formal.is_empty(),
        (true, false) => {
            let weights: Vec<u32> = produced_impl.iter().map(|(_, n)| n).collect();
            produced_formal.is_empty() && partitions(&consumed_formal, &weights).next().is_some()
        }
        (false, true) => {
            let weights: Vec<u32> = consumed_impl.iter().map(|(_, n)| n).collect();
            consumed_formal.is_empty() && partitions(&produced_formal, &weights).next().is_some()
        }
        (false, false) => true,
    }
}

/// `compatible[i][j]`: implementation reaction `i` may implement formal
/// reaction `j`. `trivial[i]`: it may be trivial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimitingTable {
    compatible: Vec<Vec<bool>>,
    trivial: Vec<bool>,
    num_formal: usize,
}

impl DelimitingTable {
    /// Rebuild from scratch for `substituted` (implementation reactions under
    /// the current interpretation) against `formal` (lifted formal reactions).
    pub fn build(formal: &[MixedReaction], substituted: &[MixedReaction]) -> Self {
        let compatible = substituted
            .iter()
            .map(|irxn| {
                formal
                    .iter()
                    .map(|frxn| {
                        SideDiff::new(&irxn.reactants, &frxn.reactants).is_feasible()
                            && SideDiff::new(&irxn.products, &frxn.products).is_feasible()
                    })
                    .collect()
            })
            .collect();
        let trivial = substituted.iter().map(may_be_trivial).collect();
        DelimitingTable {
            compatible,
            trivial,
            num_formal: formal.len(),
        }
    }

    pub fn num_rows(&self) -> usize {
        self.trivial.len()
    }

    pub fn num_formal(&self) -> usize {
        self.num_formal
    }

    #[inline]
    pub fn is_compatible(&self, row: usize, column: usize) -> bool {
        self.compatible[row][column]
    }

    #[inline]
    pub fn may_be_trivial(&self, row: usize) -> bool {
        self.trivial[row]
    }

    /// Number of formal reactions row `row` may still implement.
    pub fn row_count(&self, row: usize) -> usize {
        self.compatible[row].iter().filter(|&&c| c).count()
    }

    /// Number of implementation reactions that may still implement `column`.
    pub fn column_count(&self, column: usize) -> usize {
        self.compatible.iter().filter(|row| row[column]).count()
    }

    pub fn compatible_rows(&self, column: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.num_rows()).filter(move |&i| self.compatible[i][column])
    }

    pub fn compatible_columns(&self, row: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.num_formal).filter(move |&j| self.compatible[row][j])
    }

    /// Rows that may be trivial.
    pub fn trivial_rows(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.num_rows()).filter(move |&i| self.trivial[i])
    }

    pub fn dead_row(&self) -> Option<usize> {
        (0..self.num_rows()).find(|&i| !self.trivial[i] && self.row_count(i) == 0)
    }

    pub fn dead_column(&self) -> Option<usize> {
        (0..self.num_formal).find(|&j| self.column_count(j) == 0)
    }

    /// First violation of the delimiting condition, rows before columns.
    pub fn violation(&self) -> Option<Blocker> {
        self.dead_row()
            .map(Blocker::ImplementationReaction)
            .or_else(|| self.dead_column().map(Blocker::FormalReaction))
    }

    /// Every row and every formal column still has a true entry.
    pub fn check(&self) -> bool {
        self.violation().is_none()
    }
}
