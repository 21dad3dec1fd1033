//! Lazy combinatorial enumerations over multisets.

use crn_ir::Multiset;
use itertools::Itertools;
use std::iter;

/// Every sub-multiset of a multiset, as an odometer over `0..=count` per key.
///
/// Yields `∏(count + 1)` multisets, starting with the empty one.
#[derive(Debug, Clone)]
pub struct Subsets<K: Copy + Ord> {
    keys: Vec<K>,
    limits: Vec<u32>,
    current: Vec<u32>,
    done: bool,
}

pub fn subsets<K: Copy + Ord>(m: &Multiset<K>) -> Subsets<K> {
    let (keys, limits) = m.iter().unzip();
    Subsets {
        keys,
        limits,
        current: vec![0; m.distinct()],
        done: false,
    }
}

impl<K: Copy + Ord> Iterator for Subsets<K> {
    type Item = Multiset<K>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let out = Multiset::from_counts(self.keys.iter().copied().zip(self.current.iter().copied()));

        // advance
        let mut pos = 0;
        loop {
            if pos == self.current.len() {
                self.done = true;
                break;
            }
            if self.current[pos] < self.limits[pos] {
                self.current[pos] += 1;
                break;
            }
            self.current[pos] = 0;
            pos += 1;
        }
        Some(out)
    }
}

pub type Partitions<K> = Box<dyn Iterator<Item = Vec<Multiset<K>>>>;

/// Every `parts[0..n]` with `Σ weights[i] · parts[i] == target`, where
/// `n = weights.len()`.
///
/// No weights: a single empty assignment if `target` is empty, nothing
/// otherwise. A zero weight forces its part to be empty.
pub fn partitions<K: Copy + Ord + 'static>(target: &Multiset<K>, weights: &[u32]) -> Partitions<K> {
    match weights.split_first() {
        None => {
            if target.is_empty() {
                Box::new(iter::once(Vec::new()))
            } else {
                Box::new(iter::empty())
            }
        }
        Some((&0, rest)) => {
            Box::new(partitions(target, rest).map(|tail| prepend(Multiset::new(), tail)))
        }
        Some((&w, [])) => Box::new(target.divide(w).map(|part| vec![part]).into_iter()),
        Some((&w, rest)) => {
            let rest = rest.to_vec();
            let candidates = subsets(target);
            let target = target.clone();
            Box::new(
                candidates
                    .filter_map(move |part| {
                        let scaled = part.scale(w);
                        scaled
                            .leq(&target)
                            .then(|| (target.difference(&scaled), part))
                    })
                    .flat_map(move |(remainder, part)| {
                        partitions(&remainder, &rest).map(move |tail| prepend(part.clone(), tail))
                    }),
            )
        }
    }
}

fn prepend<T>(head: T, tail: Vec<T>) -> Vec<T> {
    let mut out = Vec::with_capacity(tail.len() + 1);
    out.push(head);
    out.extend(tail);
    out
}

/// Ordered selections of `k` distinct positions of `items`.
pub fn arrangements<T: Clone + 'static>(items: Vec<T>, k: usize) -> Box<dyn Iterator<Item = Vec<T>>> {
    if k == 0 {
        Box::new(iter::once(Vec::new()))
    } else if k > items.len() {
        Box::new(iter::empty())
    } else {
        Box::new(items.into_iter().permutations(k))
    }
}
