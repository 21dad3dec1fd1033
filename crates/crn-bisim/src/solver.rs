//! Non-negative integer solutions of homogeneous linear systems.
//!
//! Contejean–Devie completion: candidates grow from unit vectors along
//! directions that move `A·t` towards zero, and any candidate that dominates
//! an already found solution is discarded. Both entry points return the
//! first solution found rather than the full Hilbert basis.

use tracing::trace;

/// Some `x >= 0`, `x != 0` with `a·x = 0`, or `None`.
///
/// `a` is a list of equations (rows) of equal length. A system without
/// rows or columns has no candidates and yields `None`.
pub fn solve(a: &[Vec<i64>]) -> Option<Vec<u32>> {
    contejean_devie(a, false)
}

/// Like [`solve`], but the last column is a constant term: the returned
/// solution has last component exactly 1, so the first `q - 1` components
/// solve `a'·x = -c`.
pub fn solve_affine(a: &[Vec<i64>]) -> Option<Vec<u32>> {
    contejean_devie(a, true)
}

fn contejean_devie(a: &[Vec<i64>], affine: bool) -> Option<Vec<u32>> {
    let q = a.first().map_or(0, Vec::len);
    if q == 0 {
        return None;
    }
    debug_assert!(a.iter().all(|row| row.len() == q), "ragged system");

    let product = |t: &[u32]| -> Vec<i64> {
        a.iter()
            .map(|row| row.iter().zip(t).map(|(c, x)| c * *x as i64).sum())
            .collect()
    };
    // <a·t, a·e_i>
    let towards = |at: &[i64], i: usize| -> i64 { a.iter().zip(at).map(|(row, v)| row[i] * v).sum() };

    let mut stack: Vec<(Vec<u32>, Vec<bool>)> = (0..q)
        .map(|i| {
            let mut unit = vec![0; q];
            unit[i] = 1;
            let frozen = (0..q).map(|j| j < i || (affine && i == q - 1)).collect();
            (unit, frozen)
        })
        .collect();
    let mut basis: Vec<Vec<u32>> = Vec::new();
    let mut candidates = 0usize;

    while let Some((t, mut frozen)) = stack.pop() {
        candidates += 1;
        let at = product(&t);
        if at.iter().all(|&v| v == 0) {
            if !affine || t[q - 1] == 1 {
                trace!(candidates, "solver: found solution");
                return Some(t);
            }
            basis.push(t);
            continue;
        }
        for i in 0..q {
            if frozen[i] || towards(&at, i) >= 0 {
                continue;
            }
            let mut next = t.clone();
            next[i] += 1;
            if is_minimal(&basis, &next) {
                if affine && i == q - 1 {
                    frozen[i] = true;
                }
                stack.push((next, frozen.clone()));
            }
            frozen[i] = true;
        }
    }
    trace!(candidates, basis = basis.len(), "solver: exhausted");
    None
}

/// `Min(b, t)`: no found solution is component-wise `<= t`.
fn is_minimal(basis: &[Vec<u32>], t: &[u32]) -> bool {
    !basis
        .iter()
        .any(|b| b.iter().zip(t).all(|(bi, ti)| bi <= ti))
}
