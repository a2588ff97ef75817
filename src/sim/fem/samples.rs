//! Reference trusses used to check the solver and to demo the utilisation colours.

use super::{FemModel, Node, Restraint};
use crate::profiles::ProfileLibrary;
use anyhow::Result;

/// Five-node truss with a 200 kN point load at mid-span.
///
/// ```text
///       3 ------- 4
///      / \       / \
///     /   \     /   \
///    0 --- 1 ------- 2
///    ^     |200kN    o
/// ```
pub fn sample_truss(library: &ProfileLibrary) -> Result<FemModel> {
    let profile = library.get("SHS 100x100 x 5")?;
    let mut model = FemModel::new();

    let n0 = model.add_node(Node::new(0., 0.).with_restraint([Restraint::Fixed; 2]));
    let n1 = model.add_node(Node::new(10., 0.).with_force([0., -200_000.]));
    let n2 = model.add_node(Node::new(20., 0.).with_restraint([Restraint::Free, Restraint::Fixed]));
    let n3 = model.add_node(Node::new(5., 5.));
    let n4 = model.add_node(Node::new(15., 5.));

    for (start, end) in [(n0, n1), (n1, n2), (n3, n4), (n0, n3), (n1, n3), (n1, n4), (n2, n4)] {
        model.add_element(start, end, profile)?;
    }
    Ok(model)
}

/// Twenty-panel Pratt truss, 20 m long and 1 m high, with 8 kN on every
/// other top node.
pub fn sample_pratt_truss(library: &ProfileLibrary) -> Result<FemModel> {
    const SECTIONS: usize = 20;
    const LENGTH: f64 = 20.;
    const HEIGHT: f64 = 1.;

    let web = library.get("SHS 80x80 x 5")?;
    let chord = library.get("SHS 150x150 x 5")?;
    let mut model = FemModel::new();

    let xs = crate::vecutils::linspace(0., LENGTH, SECTIONS + 1);
    let top: Vec<usize> = xs
        .iter()
        .enumerate()
        .map(|(i, &x)| {
            let force = if i % 2 == 1 { [0., -8000.] } else { [0., 0.] };
            model.add_node(Node::new(x, HEIGHT).with_force(force))
        })
        .collect();
    let bottom: Vec<usize> = xs.iter().map(|&x| model.add_node(Node::new(x, 0.))).collect();

    model.nodes[bottom[0]].restraint = [Restraint::Fixed; 2];
    model.nodes[bottom[SECTIONS]].restraint = [Restraint::Free, Restraint::Fixed];

    let half = bottom.len() as f64 / 2.;
    for i in 0..bottom.len() {
        if i > 0 {
            model.add_element(bottom[i - 1], bottom[i], chord)?;
            model.add_element(top[i - 1], top[i], chord)?;
            // Diagonals fall towards the supports
            if (i as f64) < half {
                model.add_element(bottom[i - 1], top[i], web)?;
            } else {
                model.add_element(bottom[i], top[i - 1], web)?;
            }
        }
        model.add_element(bottom[i], top[i], web)?;
    }
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_truss_forces() -> Result<()> {
        let model = sample_truss(&ProfileLibrary::standard())?;
        let solution = model.solve()?;
        let f = &solution.element_forces;
        let diag = 100_000. * 2f64.sqrt();
        assert!((f[0] - 100_000.).abs() < 1e-3);
        assert!((f[1] - 100_000.).abs() < 1e-3);
        assert!((f[2] + 200_000.).abs() < 1e-3);
        assert!((f[3] + diag).abs() < 1e-3);
        assert!((f[4] - diag).abs() < 1e-3);
        assert!((f[5] - diag).abs() < 1e-3);
        assert!((f[6] + diag).abs() < 1e-3);
        // Reactions
        assert!((solution.nodal_force(0, 1) - 100_000.).abs() < 1e-3);
        assert!((solution.nodal_force(2, 1) - 100_000.).abs() < 1e-3);
        assert!(solution.nodal_force(0, 0).abs() < 1e-3);
        Ok(())
    }

    #[test]
    fn test_pratt_truss() -> Result<()> {
        let model = sample_pratt_truss(&ProfileLibrary::standard())?;
        assert_eq!(model.nodes.len(), 42);
        // 3 members per panel and one vertical per node
        assert_eq!(model.elements.len(), 3 * 20 + 21);
        let solution = model.solve()?;
        let total_load: f64 = model.nodes.iter().map(|n| n.force[1]).sum();
        let reactions = solution.nodal_force(21, 1) + solution.nodal_force(41, 1);
        assert!((reactions + total_load).abs() < 1e-3);
        // Sagging: bottom chord in tension at mid-span.
        // Panel i adds bottom chord, top chord, diagonal and vertical after the first vertical.
        let bottom_mid = 1 + 4 * 9;
        assert!(solution.element_forces[bottom_mid] > 0.);
        assert!(solution.displacement(31, 1) < 0.);
        Ok(())
    }
}
