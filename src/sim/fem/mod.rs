//! Linear static analysis of 2D pin-jointed trusses.
//!
//! Every node carries two degrees of freedom `(x, y)`. Degree of freedom
//! `2 * i` is x of node `i`, `2 * i + 1` is its y.

pub mod samples;
pub mod solver;

pub use samples::{sample_pratt_truss, sample_truss};
pub use solver::solve_linear_system;

use crate::Point;
use crate::model::Beam;
use crate::profiles::BeamProfile;
use crate::scene::Group;
use anyhow::{Context, Result, anyhow};
use ndarray as nd;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Restraint {
    #[default]
    Free,
    Fixed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub x: f64,
    pub y: f64,
    /// `[x, y]`
    pub restraint: [Restraint; 2],
    /// External force `[Fx, Fy]` [N]
    pub force: [f64; 2],
}

impl Node {
    /// Free, unloaded node.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            restraint: [Restraint::Free; 2],
            force: [0.; 2],
        }
    }

    pub fn with_restraint(mut self, restraint: [Restraint; 2]) -> Self {
        self.restraint = restraint;
        self
    }

    pub fn with_force(mut self, force: [f64; 2]) -> Self {
        self.force = force;
        self
    }

    pub fn point(&self) -> Point {
        Point::new(self.x, self.y, 0.)
    }
}

/// Bar between two nodes, given by their indices.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub start: usize,
    pub end: usize,
    pub profile: BeamProfile,
}

#[derive(Debug, Clone, Default)]
pub struct FemModel {
    pub nodes: Vec<Node>,
    pub elements: Vec<Element>,
}

#[derive(Debug, Clone)]
pub struct FemSolution {
    /// Nodal displacements [m], indexed by degree of freedom
    pub displacements: nd::Array1<f64>,
    /// `K · d` [N]; reactions at the fixed degrees of freedom
    pub nodal_forces: nd::Array1<f64>,
    /// Axial force per element [N], positive in tension
    pub element_forces: Vec<f64>,
}

impl FemSolution {
    /// Nodal force at `node` in direction `dir` (0 = x, 1 = y).
    pub fn nodal_force(&self, node: usize, dir: usize) -> f64 {
        self.nodal_forces[2 * node + dir]
    }

    pub fn displacement(&self, node: usize, dir: usize) -> f64 {
        self.displacements[2 * node + dir]
    }

    pub fn max_displacement(&self) -> f64 {
        self.displacements.iter().fold(0., |acc: f64, d| acc.max(d.abs()))
    }
}

impl FemModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node and returns its index.
    pub fn add_node(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    /// Adds an element and returns its index.
    pub fn add_element(
        &mut self,
        start: usize,
        end: usize,
        profile: &BeamProfile,
    ) -> Result<usize> {
        let n = self.nodes.len();
        if start >= n || end >= n {
            return Err(anyhow!(
                "Element ({}, {}) refers to a missing node, model has {}",
                start,
                end,
                n
            ));
        }
        if self.nodes[start].point().is_close(&self.nodes[end].point()) {
            return Err(anyhow!("Element ({}, {}) has zero length", start, end));
        }
        self.elements.push(Element {
            start,
            end,
            profile: profile.clone(),
        });
        Ok(self.elements.len() - 1)
    }

    pub fn num_dof(&self) -> usize {
        2 * self.nodes.len()
    }

    pub fn beam(&self, element: &Element) -> Beam {
        Beam::new(
            self.nodes[element.start].point(),
            self.nodes[element.end].point(),
            element.profile.clone(),
        )
    }

    pub fn beams(&self) -> Vec<Beam> {
        self.elements.iter().map(|e| self.beam(e)).collect()
    }

    fn element_dofs(element: &Element) -> [usize; 4] {
        [
            2 * element.start,
            2 * element.start + 1,
            2 * element.end,
            2 * element.end + 1,
        ]
    }

    /// Global stiffness matrix assembled from all elements.
    pub fn stiffness_matrix(&self) -> nd::Array2<f64> {
        let n = self.num_dof();
        let mut k = nd::Array2::<f64>::zeros((n, n));
        for element in &self.elements {
            let ke = self.beam(element).stiffness_matrix();
            let dofs = Self::element_dofs(element);
            for (i, &gi) in dofs.iter().enumerate() {
                for (j, &gj) in dofs.iter().enumerate() {
                    k[[gi, gj]] += ke[[i, j]];
                }
            }
        }
        k
    }

    pub fn fixed_dofs(&self) -> Vec<usize> {
        self.restraints()
            .filter(|(_, r)| *r == Restraint::Fixed)
            .map(|(dof, _)| dof)
            .collect()
    }

    pub fn free_dofs(&self) -> Vec<usize> {
        self.restraints()
            .filter(|(_, r)| *r == Restraint::Free)
            .map(|(dof, _)| dof)
            .collect()
    }

    fn restraints(&self) -> impl Iterator<Item = (usize, Restraint)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .flat_map(|(i, node)| [(2 * i, node.restraint[0]), (2 * i + 1, node.restraint[1])])
    }

    fn force_vector(&self) -> nd::Array1<f64> {
        self.nodes.iter().flat_map(|node| node.force).collect()
    }

    /// Solves for displacements, nodal forces and element forces.
    ///
    /// A kinematically unstable truss gives a singular system and an error.
    pub fn solve(&self) -> Result<FemSolution> {
        let k = self.stiffness_matrix();
        let free = self.free_dofs();
        debug!(
            "Solving truss: {} nodes, {} elements, {} free dofs",
            self.nodes.len(),
            self.elements.len(),
            free.len()
        );

        let forces = self.force_vector();
        let k_free = k.select(nd::Axis(0), &free).select(nd::Axis(1), &free);
        let f_free = forces.select(nd::Axis(0), &free);
        let d_free =
            solve_linear_system(&k_free, &f_free).context("Truss is kinematically unstable")?;

        let mut displacements = nd::Array1::<f64>::zeros(self.num_dof());
        for (i, &dof) in free.iter().enumerate() {
            displacements[dof] = d_free[i];
        }
        let nodal_forces = k.dot(&displacements);

        let element_forces = self
            .elements
            .iter()
            .map(|element| {
                let beam = self.beam(element);
                let (s, c) = beam.theta().sin_cos();
                let t = nd::arr1(&[-c, -s, c, s]);
                let d: nd::Array1<f64> = Self::element_dofs(element)
                    .iter()
                    .map(|&dof| displacements[dof])
                    .collect();
                beam.ea() / beam.length() * t.dot(&d)
            })
            .collect();

        Ok(FemSolution {
            displacements,
            nodal_forces,
            element_forces,
        })
    }
}

/// Draws every member of a solved truss coloured by its unity check.
pub fn visualise_solution(model: &FemModel, solution: &FemSolution) -> Group {
    let mut group = Group::named("fem_solution", vec![]);
    for (beam, force) in model.beams().iter().zip(&solution.element_forces) {
        group.add(beam.to_extrusion().with_material(beam.utilisation_material(*force)));
    }
    group
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::ProfileLibrary;

    fn profile() -> BeamProfile {
        BeamProfile::shs(100., 5.)
    }

    #[test]
    fn test_single_bar() -> Result<()> {
        let mut model = FemModel::new();
        let a = model.add_node(Node::new(0., 0.).with_restraint([Restraint::Fixed; 2]));
        let b = model.add_node(
            Node::new(2., 0.)
                .with_restraint([Restraint::Free, Restraint::Fixed])
                .with_force([1000., 0.]),
        );
        model.add_element(a, b, &profile())?;
        let solution = model.solve()?;
        let beam = model.beams()[0].clone();
        assert!((solution.displacement(b, 0) - 1000. * 2. / beam.ea()).abs() < 1e-15);
        assert!((solution.element_forces[0] - 1000.).abs() < 1e-6);
        assert!((solution.nodal_force(a, 0) + 1000.).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn test_mechanism_is_error() -> Result<()> {
        let mut model = FemModel::new();
        let a = model.add_node(Node::new(0., 0.).with_restraint([Restraint::Fixed; 2]));
        let b = model.add_node(Node::new(1., 0.).with_force([0., -10.]));
        model.add_element(a, b, &profile())?;
        assert!(model.solve().is_err());
        Ok(())
    }

    #[test]
    fn test_add_element_checks() {
        let mut model = FemModel::new();
        let a = model.add_node(Node::new(0., 0.));
        let b = model.add_node(Node::new(0., 0.));
        assert!(model.add_element(a, 5, &profile()).is_err());
        assert!(model.add_element(a, b, &profile()).is_err());
    }

    #[test]
    fn test_dofs() {
        let mut model = FemModel::new();
        model.add_node(Node::new(0., 0.).with_restraint([Restraint::Fixed; 2]));
        model.add_node(Node::new(1., 0.).with_restraint([Restraint::Free, Restraint::Fixed]));
        assert_eq!(model.fixed_dofs(), vec![0, 1, 3]);
        assert_eq!(model.free_dofs(), vec![2]);
    }

    #[test]
    fn test_visualise_solution() -> Result<()> {
        let lib = ProfileLibrary::standard();
        let model = sample_truss(&lib)?;
        let solution = model.solve()?;
        let group = visualise_solution(&model, &solution);
        assert_eq!(group.len(), model.elements.len());
        Ok(())
    }
}
