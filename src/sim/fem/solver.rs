use anyhow::{Result, anyhow};
use ndarray as nd;

/// Relative pivot size below which a system is treated as singular.
const SINGULAR_TOL: f64 = 1e-10;

/// Solves `a · x = b` by Gaussian elimination with partial pivoting.
///
/// Returns an error if `a` is not square, the sizes do not match or the
/// matrix is singular.
pub fn solve_linear_system(a: &nd::Array2<f64>, b: &nd::Array1<f64>) -> Result<nd::Array1<f64>> {
    let n = a.nrows();
    if a.ncols() != n {
        return Err(anyhow!("Matrix must be square, got {}x{}", n, a.ncols()));
    }
    if b.len() != n {
        return Err(anyhow!("Right-hand side has length {}, expected {}", b.len(), n));
    }
    if n == 0 {
        return Ok(nd::Array1::zeros(0));
    }

    let mut m = a.clone();
    let mut rhs = b.clone();
    let scale = m.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if scale == 0. {
        return Err(anyhow!("Singular system: zero matrix"));
    }

    for col in 0..n {
        // Partial pivoting
        let mut pivot_row = col;
        for row in col + 1..n {
            if m[[row, col]].abs() > m[[pivot_row, col]].abs() {
                pivot_row = row;
            }
        }
        if m[[pivot_row, col]].abs() < SINGULAR_TOL * scale {
            return Err(anyhow!("Singular system: no pivot in column {}", col));
        }
        if pivot_row != col {
            for k in 0..n {
                m.swap([col, k], [pivot_row, k]);
            }
            rhs.swap(col, pivot_row);
        }

        for row in col + 1..n {
            let factor = m[[row, col]] / m[[col, col]];
            if factor == 0. {
                continue;
            }
            for k in col..n {
                m[[row, k]] -= factor * m[[col, k]];
            }
            rhs[row] -= factor * rhs[col];
        }
    }

    // Back substitution
    let mut x = nd::Array1::<f64>::zeros(n);
    for row in (0..n).rev() {
        let mut sum = rhs[row];
        for k in row + 1..n {
            sum -= m[[row, k]] * x[k];
        }
        x[row] = sum / m[[row, row]];
    }

    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solve_2x2() -> Result<()> {
        let a = nd::arr2(&[[2., 1.], [1., 3.]]);
        let b = nd::arr1(&[3., 5.]);
        let x = solve_linear_system(&a, &b)?;
        assert!((x[0] - 0.8).abs() < 1e-12);
        assert!((x[1] - 1.4).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_needs_pivoting() -> Result<()> {
        let a = nd::arr2(&[[0., 1., 0.], [1., 0., 0.], [0., 0., 4.]]);
        let b = nd::arr1(&[2., 3., 8.]);
        let x = solve_linear_system(&a, &b)?;
        assert!((x[0] - 3.).abs() < 1e-12);
        assert!((x[1] - 2.).abs() < 1e-12);
        assert!((x[2] - 2.).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_singular() {
        let a = nd::arr2(&[[1., 2.], [2., 4.]]);
        let b = nd::arr1(&[1., 2.]);
        assert!(solve_linear_system(&a, &b).is_err());
    }

    #[test]
    fn test_size_mismatch() {
        let a = nd::arr2(&[[1., 0.], [0., 1.]]);
        let b = nd::arr1(&[1., 2., 3.]);
        assert!(solve_linear_system(&a, &b).is_err());
    }
}
