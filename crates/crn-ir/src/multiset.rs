//! Multisets with zero-default counts.
//!
//! Stored as a sorted vector of `(key, count)` pairs with every count
//! positive, so two equal multisets always have the same representation and
//! `Eq`/`Hash`/`Ord` are structural.

use smallvec::SmallVec;
use std::cmp::Ordering;
use std::fmt;

type Entries<K> = SmallVec<[(K, u32); 4]>;

/// A finite multiset over keys `K`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Multiset<K: Copy + Ord> {
    entries: Entries<K>,
}

impl<K: Copy + Ord> Default for Multiset<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Ord> Multiset<K> {
    pub fn new() -> Self {
        Multiset {
            entries: SmallVec::new(),
        }
    }

    pub fn singleton(key: K) -> Self {
        Self::from_counts([(key, 1)])
    }

    /// Build from `(key, count)` pairs; repeated keys accumulate, zero counts vanish.
    pub fn from_counts<I: IntoIterator<Item = (K, u32)>>(pairs: I) -> Self {
        let mut m = Self::new();
        for (k, n) in pairs {
            m.add(k, n);
        }
        m
    }

    #[inline]
    fn position(&self, key: K) -> Result<usize, usize> {
        self.entries.binary_search_by(|(k, _)| k.cmp(&key))
    }

    /// Count of `key` (0 if absent).
    #[inline]
    pub fn count(&self, key: K) -> u32 {
        match self.position(key) {
            Ok(i) => self.entries[i].1,
            Err(_) => 0,
        }
    }

    #[inline]
    pub fn contains(&self, key: K) -> bool {
        self.position(key).is_ok()
    }

    /// Add `n` copies of `key`.
    pub fn add(&mut self, key: K, n: u32) {
        if n == 0 {
            return;
        }
        match self.position(key) {
            Ok(i) => self.entries[i].1 += n,
            Err(i) => self.entries.insert(i, (key, n)),
        }
    }

    /// Remove up to `n` copies of `key`. Returns how many were removed.
    pub fn remove(&mut self, key: K, n: u32) -> u32 {
        match self.position(key) {
            Ok(i) => {
                let have = self.entries[i].1;
                if have <= n {
                    self.entries.remove(i);
                    have
                } else {
                    self.entries[i].1 = have - n;
                    n
                }
            }
            Err(_) => 0,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct keys.
    #[inline]
    pub fn distinct(&self) -> usize {
        self.entries.len()
    }

    /// Total number of elements, counting multiplicity.
    pub fn size(&self) -> u32 {
        self.entries.iter().map(|(_, n)| *n).sum()
    }

    /// `(key, count)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (K, u32)> + '_ {
        self.entries.iter().copied()
    }

    /// Distinct keys in order.
    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    /// Every element repeated by its count.
    pub fn elements(&self) -> impl Iterator<Item = K> + '_ {
        self.entries
            .iter()
            .flat_map(|&(k, n)| std::iter::repeat(k).take(n as usize))
    }

    /// `self <= other` component-wise.
    pub fn leq(&self, other: &Self) -> bool {
        let mut theirs = other.entries.iter().peekable();
        'outer: for &(k, n) in &self.entries {
            while let Some(&&(ok, on)) = theirs.peek() {
                match ok.cmp(&k) {
                    Ordering::Less => {
                        theirs.next();
                    }
                    Ordering::Equal => {
                        if on < n {
                            return false;
                        }
                        theirs.next();
                        continue 'outer;
                    }
                    Ordering::Greater => return false,
                }
            }
            return false;
        }
        true
    }

    /// Every count multiplied by `factor`.
    pub fn scale(&self, factor: u32) -> Self {
        if factor == 0 {
            return Self::new();
        }
        Multiset {
            entries: self.entries.iter().map(|&(k, n)| (k, n * factor)).collect(),
        }
    }

    /// Multiset union with addition of counts.
    pub fn sum(&self, other: &Self) -> Self {
        let mut out = self.clone();
        for &(k, n) in &other.entries {
            out.add(k, n);
        }
        out
    }

    /// `self - other`, clamped at zero per key.
    pub fn difference(&self, other: &Self) -> Self {
        Multiset {
            entries: self
                .entries
                .iter()
                .filter_map(|&(k, n)| {
                    let left = n.saturating_sub(other.count(k));
                    (left > 0).then_some((k, left))
                })
                .collect(),
        }
    }

    /// Exact division of every count by `divisor`, `None` if some count is
    /// not a multiple of it.
    pub fn divide(&self, divisor: u32) -> Option<Self> {
        if divisor == 0 {
            return self.is_empty().then(Self::new);
        }
        if divisor == 1 {
            return Some(self.clone());
        }
        let mut entries = Entries::with_capacity(self.entries.len());
        for &(k, n) in &self.entries {
            if n % divisor != 0 {
                return None;
            }
            entries.push((k, n / divisor));
        }
        Some(Multiset { entries })
    }

    /// Keep only entries whose key satisfies `pred`.
    pub fn filter<F: Fn(K) -> bool>(&self, pred: F) -> Self {
        Multiset {
            entries: self.entries.iter().copied().filter(|(k, _)| pred(*k)).collect(),
        }
    }

    /// Map keys into another key type, re-sorting and merging as needed.
    pub fn map_keys<L: Copy + Ord, F: Fn(K) -> L>(&self, f: F) -> Multiset<L> {
        Multiset::from_counts(self.entries.iter().map(|&(k, n)| (f(k), n)))
    }

    /// Keep the entries whose key maps to `Some`, re-keyed.
    pub fn filter_map_keys<L: Copy + Ord, F: Fn(K) -> Option<L>>(&self, f: F) -> Multiset<L> {
        Multiset::from_counts(self.entries.iter().filter_map(|&(k, n)| f(k).map(|l| (l, n))))
    }

    /// True if every distinct key satisfies `pred`.
    pub fn all_keys<F: Fn(K) -> bool>(&self, pred: F) -> bool {
        self.entries.iter().all(|(k, _)| pred(*k))
    }

    /// True if some distinct key satisfies `pred`.
    pub fn any_key<F: Fn(K) -> bool>(&self, pred: F) -> bool {
        self.entries.iter().any(|(k, _)| pred(*k))
    }
}

impl<K: Copy + Ord> FromIterator<K> for Multiset<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self::from_counts(iter.into_iter().map(|k| (k, 1)))
    }
}

impl<K: Copy + Ord> FromIterator<(K, u32)> for Multiset<K> {
    fn from_iter<I: IntoIterator<Item = (K, u32)>>(iter: I) -> Self {
        Self::from_counts(iter)
    }
}

impl<K: Copy + Ord> Extend<K> for Multiset<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for k in iter {
            self.add(k, 1);
        }
    }
}

impl<K: Copy + Ord + fmt::Debug> fmt::Debug for Multiset<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, n)| (k, n)))
            .finish()
    }
}

/// `leq(x, y)`: true iff `x[k] <= y[k]` for every key.
#[inline]
pub fn leq<K: Copy + Ord>(x: &Multiset<K>, y: &Multiset<K>) -> bool {
    x.leq(y)
}

/// `scale(x, n)`: every count of `x` multiplied by `n`.
#[inline]
pub fn scale<K: Copy + Ord>(x: &Multiset<K>, n: u32) -> Multiset<K> {
    x.scale(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(pairs: &[(char, u32)]) -> Multiset<char> {
        Multiset::from_counts(pairs.iter().copied())
    }

    #[test]
    fn test_zero_counts_vanish() {
        let m = ms(&[('a', 0), ('b', 2)]);
        assert_eq!(m.distinct(), 1);
        assert_eq!(m.count('a'), 0);
        assert!(!m.contains('a'));
        assert_eq!(m, ms(&[('b', 2)]));
    }

    #[test]
    fn test_leq() {
        let x = ms(&[('a', 1), ('c', 2)]);
        let y = ms(&[('a', 2), ('b', 1), ('c', 2)]);
        assert!(x.leq(&y));
        assert!(!y.leq(&x));
        assert!(Multiset::new().leq(&x));
        assert!(!ms(&[('d', 1)]).leq(&y));
        assert!(!ms(&[('c', 3)]).leq(&y));
    }

    #[test]
    fn test_difference_saturates() {
        let x = ms(&[('a', 1), ('b', 3)]);
        let y = ms(&[('a', 2), ('b', 1), ('c', 4)]);
        assert_eq!(x.difference(&y), ms(&[('b', 2)]));
        assert_eq!(y.difference(&x), ms(&[('a', 1), ('c', 4)]));
    }

    #[test]
    fn test_divide() {
        let x = ms(&[('a', 4), ('b', 2)]);
        assert_eq!(x.divide(2), Some(ms(&[('a', 2), ('b', 1)])));
        assert_eq!(x.divide(3), None);
        assert_eq!(Multiset::<char>::new().divide(0), Some(Multiset::new()));
        assert_eq!(x.divide(0), None);
    }

    #[test]
    fn test_remove_and_elements() {
        let mut x = ms(&[('a', 2), ('b', 1)]);
        assert_eq!(x.remove('a', 1), 1);
        assert_eq!(x.remove('b', 5), 1);
        assert_eq!(x.elements().collect::<Vec<_>>(), vec!['a']);
        let y: Multiset<char> = "abca".chars().collect();
        assert_eq!(y.count('a'), 2);
        assert_eq!(y.size(), 4);
    }

    #[test]
    fn test_scale_zero_is_empty() {
        let x = ms(&[('a', 3)]);
        assert!(x.scale(0).is_empty());
        assert_eq!(x.scale(2).count('a'), 6);
    }
}
