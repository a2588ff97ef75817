//! Vector utility functions.

/// Returns `num` evenly spaced values over `[start, stop]` (both ends included).
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            (0..num)
                .map(|i| if i == num - 1 { stop } else { start + step * i as f64 })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn almost_equal(a: &[f64], b: &[f64], eps: f64) -> bool {
        a.len() == b.len() && a.iter().zip(b.iter()).all(|(&x, &y)| (x - y).abs() <= eps)
    }

    #[test]
    fn test_linspace() {
        assert!(almost_equal(&linspace(0., 1., 5), &[0., 0.25, 0.5, 0.75, 1.], 1e-12));
        assert_eq!(linspace(3., 4., 1), vec![3.]);
        assert!(linspace(3., 4., 0).is_empty());
    }
}
