use crate::Point;
use crate::model::Beam;
use crate::profiles::BeamProfile;
use crate::scene::{Group, Material};
use crate::sim::fem::{FemModel, FemSolution, Node, Restraint};
use crate::vecutils::linspace;
use anyhow::{Result, anyhow};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    TopChord,
    BottomChord,
    Vertical,
    Diagonal,
}

/// Truss member between two truss nodes.
///
/// Node `i` is the i-th bottom node; node `panels + 1 + i` is the i-th top node.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub kind: MemberKind,
    pub start: usize,
    pub end: usize,
    pub beam: Beam,
}

/// Flat parallel-chord truss in the xz plane, spanning along +x from the origin.
///
/// The diagonals rise towards mid-span. Interior nodes carry verticals; the
/// ends are left open where the truss sits on the columns.
#[derive(Debug, Clone)]
pub struct Truss {
    pub length: f64,
    /// Distance between the chord axes
    pub height: f64,
    pub panels: usize,
    pub chord: BeamProfile,
    pub web: BeamProfile,
    pub vertical: BeamProfile,
    pub material: Material,
    pub nodes_bottom: Vec<Point>,
    pub nodes_top: Vec<Point>,
    pub members: Vec<Member>,
}

impl Truss {
    /// Builds the truss geometry. `height` is the outer height; the chord
    /// axes sit one chord width closer together.
    pub fn new(
        length: f64,
        height: f64,
        panels: usize,
        chord: &BeamProfile,
        web: &BeamProfile,
        vertical: &BeamProfile,
        material: Material,
    ) -> Result<Self> {
        if panels == 0 {
            return Err(anyhow!("Truss needs at least one panel"));
        }
        if length <= 0. {
            return Err(anyhow!("Truss length must be positive, got {}", length));
        }
        let axis_height = height - chord.width;
        if axis_height <= 0. {
            return Err(anyhow!(
                "Truss height {} must exceed the chord width {}",
                height,
                chord.width
            ));
        }

        let xs = linspace(0., length, panels + 1);
        let nodes_bottom: Vec<Point> = xs.iter().map(|&x| Point::new(x, 0., 0.)).collect();
        let nodes_top: Vec<Point> = xs.iter().map(|&x| Point::new(x, 0., axis_height)).collect();

        let mut truss = Self {
            length,
            height: axis_height,
            panels,
            chord: chord.clone(),
            web: web.clone(),
            vertical: vertical.clone(),
            material,
            nodes_bottom,
            nodes_top,
            members: vec![],
        };
        truss.members = truss.create_members();
        debug!(
            "Truss: length {:.2} m, {} panels, {} members",
            length,
            panels,
            truss.members.len()
        );
        Ok(truss)
    }

    fn num_nodes(&self) -> usize {
        self.nodes_bottom.len()
    }

    fn top(&self, i: usize) -> usize {
        self.num_nodes() + i
    }

    fn node(&self, id: usize) -> Point {
        let n = self.num_nodes();
        if id < n {
            self.nodes_bottom[id]
        } else {
            self.nodes_top[id - n]
        }
    }

    fn member(&self, kind: MemberKind, start: usize, end: usize) -> Member {
        let profile = match kind {
            MemberKind::TopChord | MemberKind::BottomChord => &self.chord,
            MemberKind::Vertical => &self.vertical,
            MemberKind::Diagonal => &self.web,
        };
        Member {
            kind,
            start,
            end,
            beam: Beam::new(self.node(start), self.node(end), profile.clone()),
        }
    }

    fn create_members(&self) -> Vec<Member> {
        let n = self.num_nodes();
        let mid_node_index = n / 2 + 1;
        let mut top = vec![];
        let mut bottom = vec![];
        let mut vertical = vec![];
        let mut diagonal = vec![];

        for i in 1..n {
            top.push(self.member(MemberKind::TopChord, self.top(i - 1), self.top(i)));
            bottom.push(self.member(MemberKind::BottomChord, i - 1, i));
            if i < n - 1 {
                vertical.push(self.member(MemberKind::Vertical, i, self.top(i)));
            }
            if i < mid_node_index {
                diagonal.push(self.member(MemberKind::Diagonal, i - 1, self.top(i)));
            } else {
                diagonal.push(self.member(MemberKind::Diagonal, i, self.top(i - 1)));
            }
        }

        top.into_iter()
            .chain(bottom)
            .chain(vertical)
            .chain(diagonal)
            .collect()
    }

    pub fn beams(&self, kind: MemberKind) -> impl Iterator<Item = &Beam> + '_ {
        self.members
            .iter()
            .filter(move |m| m.kind == kind)
            .map(|m| &m.beam)
    }

    /// Total steel mass [kg]
    pub fn weight(&self) -> f64 {
        self.members.iter().map(|m| m.beam.weight()).sum()
    }

    fn total_length(&self, kind: MemberKind) -> f64 {
        self.beams(kind).map(|b| b.length()).sum()
    }

    fn total_weight(&self, kind: MemberKind) -> f64 {
        self.beams(kind).map(|b| b.weight()).sum()
    }

    pub fn length_top_beams(&self) -> f64 {
        self.total_length(MemberKind::TopChord)
    }

    pub fn length_vertical_beams(&self) -> f64 {
        self.total_length(MemberKind::Vertical)
    }

    pub fn length_diagonal_beams(&self) -> f64 {
        self.total_length(MemberKind::Diagonal)
    }

    pub fn weight_top_beams(&self) -> f64 {
        self.total_weight(MemberKind::TopChord)
    }

    pub fn weight_vertical_beams(&self) -> f64 {
        self.total_weight(MemberKind::Vertical)
    }

    pub fn weight_diagonal_beams(&self) -> f64 {
        self.total_weight(MemberKind::Diagonal)
    }

    /// Square extrusions of all members in the truss material.
    pub fn visualise(&self) -> Group {
        let mut group = Group::named("truss", vec![]);
        for (top, bottom) in self
            .beams(MemberKind::TopChord)
            .zip(self.beams(MemberKind::BottomChord))
        {
            group.add(top.to_extrusion().with_material(self.material.clone()));
            group.add(bottom.to_extrusion().with_material(self.material.clone()));
        }
        for kind in [MemberKind::Diagonal, MemberKind::Vertical] {
            for beam in self.beams(kind) {
                group.add(beam.to_extrusion().with_material(self.material.clone()));
            }
        }
        group
    }

    /// 2D model in the truss plane: x along the span, y up.
    ///
    /// Pinned at the first bottom node, on a roller at the last one, with
    /// `node_load` [N] pushing down on every interior top node. End posts
    /// close the open end panels over the supports.
    pub fn to_fem(&self, node_load: f64) -> Result<FemModel> {
        let n = self.num_nodes();
        let mut model = FemModel::new();
        for (i, p) in self.nodes_bottom.iter().enumerate() {
            let mut node = Node::new(p.x, p.z);
            if i == 0 {
                node.restraint = [Restraint::Fixed; 2];
            } else if i == n - 1 {
                node.restraint = [Restraint::Free, Restraint::Fixed];
            }
            model.add_node(node);
        }
        for (i, p) in self.nodes_top.iter().enumerate() {
            let mut node = Node::new(p.x, p.z);
            if i > 0 && i < n - 1 {
                node.force = [0., -node_load];
            }
            model.add_node(node);
        }
        for m in &self.members {
            model.add_element(m.start, m.end, &m.beam.profile)?;
        }
        model.add_element(0, self.top(0), &self.vertical)?;
        model.add_element(n - 1, self.top(n - 1), &self.vertical)?;
        Ok(model)
    }

    pub fn analyse(&self, node_load: f64) -> Result<FemSolution> {
        let solution = self.to_fem(node_load)?.solve()?;
        debug!(
            "Truss {:.1} m, {} panels: max displacement {:.4} m under {:.0} N per node",
            self.length,
            self.panels,
            solution.max_displacement(),
            node_load
        );
        Ok(solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HasMesh;
    use crate::model::{WarehouseSteelFrame, steel_material};
    use crate::params::WarehouseParams;
    use crate::profiles::ProfileLibrary;

    fn truss(panels: usize) -> Result<Truss> {
        let lib = ProfileLibrary::standard();
        Truss::new(
            20.,
            1.,
            panels,
            lib.get("SHS 100x100 x 4")?,
            lib.get("SHS 50x50 x 4")?,
            lib.get("SHS 50x50 x 4")?,
            steel_material(),
        )
    }

    #[test]
    fn test_topology() -> Result<()> {
        let t = truss(10)?;
        assert_eq!(t.nodes_bottom.len(), 11);
        assert!((t.height - 0.9).abs() < 1e-12);
        assert_eq!(t.beams(MemberKind::TopChord).count(), 10);
        assert_eq!(t.beams(MemberKind::BottomChord).count(), 10);
        assert_eq!(t.beams(MemberKind::Vertical).count(), 9);
        assert_eq!(t.beams(MemberKind::Diagonal).count(), 10);
        assert_eq!(t.visualise().len(), 39);
        Ok(())
    }

    #[test]
    fn test_diagonals_rise_to_mid_span() -> Result<()> {
        let t = truss(4)?;
        let diagonals: Vec<&Beam> = t.beams(MemberKind::Diagonal).collect();
        // Left half: bottom[i-1] -> top[i]
        assert!(diagonals[0].start.is_close(&Point::new(0., 0., 0.)));
        assert!(diagonals[0].end.is_close(&Point::new(5., 0., 0.9)));
        // Right half: bottom[i] -> top[i-1]
        assert!(diagonals[3].start.is_close(&Point::new(20., 0., 0.)));
        assert!(diagonals[3].end.is_close(&Point::new(15., 0., 0.9)));
        Ok(())
    }

    #[test]
    fn test_quantities() -> Result<()> {
        let t = truss(4)?;
        assert!((t.length_top_beams() - 20.).abs() < 1e-9);
        assert!((t.length_vertical_beams() - 3. * 0.9).abs() < 1e-9);
        let diag = (5f64.powi(2) + 0.81).sqrt();
        assert!((t.length_diagonal_beams() - 4. * diag).abs() < 1e-9);
        assert!((t.weight_top_beams() - 20. * t.chord.mass).abs() < 1e-9);
        let total =
            2. * t.weight_top_beams() + t.weight_vertical_beams() + t.weight_diagonal_beams();
        assert!((t.weight() - total).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_visualise_extent() -> Result<()> {
        let t = truss(4)?;
        let (pmin, pmax) = t.visualise().copy_mesh().bbox().unwrap();
        assert!((pmin.x + 0.05).abs() < 0.06);
        assert!((pmax.z - 0.95).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_analyse_symmetric() -> Result<()> {
        let t = truss(4)?;
        let fem = t.to_fem(10_000.)?;
        assert_eq!(fem.elements.len(), t.members.len() + 2);
        let solution = fem.solve()?;
        // Three loaded nodes shared by two supports
        assert!((solution.nodal_force(0, 1) - 15_000.).abs() < 1e-3);
        assert!((solution.nodal_force(4, 1) - 15_000.).abs() < 1e-3);
        // Top chord in compression, bottom chord in tension at mid-span
        let forces = &solution.element_forces;
        assert!(forces[1] < 0.);
        assert!(forces[4 + 1] > 0.);
        Ok(())
    }

    #[test]
    fn test_analyse_default_frame_truss() -> Result<()> {
        let lib = ProfileLibrary::standard();
        let frame = WarehouseSteelFrame::from_params(&WarehouseParams::default(), &lib)?;
        let t = frame.get_truss()?;
        let load = 5_000.;

        let solution = t.analyse(load)?;
        let direct = t.to_fem(load)?.solve()?;
        // Members plus the two end posts
        assert_eq!(solution.element_forces.len(), t.members.len() + 2);
        for (a, b) in solution.element_forces.iter().zip(&direct.element_forces) {
            assert!((a - b).abs() < 1e-6);
        }

        let n = t.nodes_bottom.len();
        let reactions = solution.nodal_force(0, 1) + solution.nodal_force(n - 1, 1);
        assert!((reactions - (n - 2) as f64 * load).abs() < 1e-3);
        assert!((solution.nodal_force(0, 1) - solution.nodal_force(n - 1, 1)).abs() < 1e-3);
        assert!(solution.max_displacement() > 0.);
        Ok(())
    }

    #[test]
    fn test_invalid() {
        assert!(truss(0).is_err());
        let lib = ProfileLibrary::standard();
        let chord = lib.get("SHS 300x300 x 10").unwrap();
        assert!(Truss::new(10., 0.2, 2, chord, chord, chord, steel_material()).is_err());
    }
}
