#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&shape, coeffs)) = data.split_first() else {
        return;
    };
    let cols = (shape % 5) as usize + 1;
    let rows: Vec<Vec<i64>> = coeffs
        .chunks_exact(cols)
        .take(3)
        .map(|row| row.iter().map(|&c| (c % 9) as i64 - 4).collect())
        .collect();
    if rows.is_empty() {
        return;
    }
    for (x, affine) in [
        (crn_bisim::solver::solve(&rows), false),
        (crn_bisim::solver::solve_affine(&rows), true),
    ] {
        if let Some(x) = x {
            for row in &rows {
                let dot: i64 = row.iter().zip(&x).map(|(c, v)| c * *v as i64).sum();
                assert_eq!(dot, 0);
            }
            if affine {
                assert_eq!(x.last(), Some(&1));
            }
        }
    }
});
