//! Steel section database.
//!
//! Square hollow sections (SHS) are computed from outer size and wall
//! thickness with sharp corners. Rolled I and H sections (IPE, HEA, HEB)
//! come from the standard European tables.

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

/// Density of structural steel [kg/m³]
pub const STEEL_DENSITY: f64 = 7850.0;

/// Section families offered in the configurator.
pub const BEAM_TYPES: [&str; 4] = ["HEA", "HEB", "IPE", "SHS"];

/// Cross-section properties in SI units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamProfile {
    pub name: String,
    /// Outer size used for drawing [m]
    pub width: f64,
    /// Mass per unit length [kg/m]
    pub mass: f64,
    /// Cross-section area [m²]
    pub area: f64,
    /// Second moment of area, strong axis [m⁴]
    pub inertia: f64,
    /// Elastic section modulus, strong axis [m³]
    pub section_modulus: f64,
}

impl BeamProfile {
    /// Square hollow section with outer size `b` and wall thickness `t`, both in mm.
    pub fn shs(b: f64, t: f64) -> Self {
        let inner = b - 2. * t;
        let area_mm2 = b.powi(2) - inner.powi(2);
        let inertia_mm4 = (b.powi(4) - inner.powi(4)) / 12.;
        let area = area_mm2 * 1e-6;
        let inertia = inertia_mm4 * 1e-12;
        Self {
            name: format!("SHS {}x{} x {}", b, b, t),
            width: b * 1e-3,
            mass: area * STEEL_DENSITY,
            area,
            inertia,
            section_modulus: inertia / (b * 1e-3 / 2.),
        }
    }

    /// Rolled section from table values: height [mm], mass [kg/m],
    /// area [cm²], inertia [cm⁴] and section modulus [cm³].
    pub fn rolled(
        name: &str,
        h: f64,
        mass: f64,
        area_cm2: f64,
        inertia_cm4: f64,
        modulus_cm3: f64,
    ) -> Self {
        Self {
            name: name.to_string(),
            width: h * 1e-3,
            mass,
            area: area_cm2 * 1e-4,
            inertia: inertia_cm4 * 1e-8,
            section_modulus: modulus_cm3 * 1e-6,
        }
    }

    /// Section family, e.g. "SHS".
    pub fn family(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }
}

// (name, h [mm], mass [kg/m], A [cm²], Iy [cm⁴], Wy [cm³])
const ROLLED_SECTIONS: [(&str, f64, f64, f64, f64, f64); 20] = [
    ("HEA 100", 96., 16.7, 21.2, 349., 72.8),
    ("HEA 120", 114., 19.9, 25.3, 606., 106.),
    ("HEA 140", 133., 24.7, 31.4, 1033., 155.),
    ("HEA 160", 152., 30.4, 38.8, 1673., 220.),
    ("HEA 200", 190., 42.3, 53.8, 3692., 389.),
    ("HEA 240", 230., 60.3, 76.8, 7763., 675.),
    ("HEB 100", 100., 20.4, 26.0, 450., 89.9),
    ("HEB 120", 120., 26.7, 34.0, 864., 144.),
    ("HEB 140", 140., 33.7, 43.0, 1509., 216.),
    ("HEB 160", 160., 42.6, 54.3, 2492., 311.),
    ("HEB 200", 200., 61.3, 78.1, 5696., 570.),
    ("HEB 240", 240., 83.2, 106.0, 11260., 938.),
    ("IPE 100", 100., 8.1, 10.3, 171., 34.2),
    ("IPE 120", 120., 10.4, 13.2, 318., 53.0),
    ("IPE 140", 140., 12.9, 16.4, 541., 77.3),
    ("IPE 160", 160., 15.8, 20.1, 869., 109.),
    ("IPE 180", 180., 18.8, 23.9, 1317., 146.),
    ("IPE 200", 200., 22.4, 28.5, 1943., 194.),
    ("IPE 240", 240., 30.7, 39.1, 3892., 324.),
    ("IPE 300", 300., 42.2, 53.8, 8356., 557.),
];

// (b [mm], t [mm])
const SHS_SECTIONS: [(f64, f64); 12] = [
    (50., 4.),
    (60., 4.),
    (80., 5.),
    (100., 4.),
    (100., 5.),
    (120., 6.),
    (150., 5.),
    (150., 8.),
    (200., 8.),
    (250., 10.),
    (300., 10.),
    (300., 12.5),
];

/// Named collection of beam profiles in display order.
#[derive(Debug, Clone)]
pub struct ProfileLibrary {
    profiles: Vec<BeamProfile>,
}

impl ProfileLibrary {
    /// HEA, HEB, IPE and SHS series.
    pub fn standard() -> Self {
        let mut profiles: Vec<BeamProfile> = ROLLED_SECTIONS
            .iter()
            .map(|&(name, h, mass, area, inertia, modulus)| {
                BeamProfile::rolled(name, h, mass, area, inertia, modulus)
            })
            .collect();
        profiles.extend(SHS_SECTIONS.iter().map(|&(b, t)| BeamProfile::shs(b, t)));
        Self { profiles }
    }

    pub fn get(&self, name: &str) -> Result<&BeamProfile> {
        self.profiles
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| anyhow!("Unknown beam profile: {}", name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.profiles.iter().any(|p| p.name == name)
    }

    /// Profile names in display order.
    pub fn profile_options(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.name.as_str()).collect()
    }

    /// Profiles of one family, e.g. "IPE".
    pub fn family(&self, family: &str) -> Vec<&BeamProfile> {
        self.profiles.iter().filter(|p| p.family() == family).collect()
    }
}

impl Default for ProfileLibrary {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shs_properties() {
        let p = BeamProfile::shs(100., 4.);
        assert_eq!(p.name, "SHS 100x100 x 4");
        assert!((p.width - 0.1).abs() < 1e-12);
        // 100² - 92² = 1536 mm²
        assert!((p.area - 1536e-6).abs() < 1e-12);
        assert!((p.mass - 1536e-6 * STEEL_DENSITY).abs() < 1e-9);
        // (100⁴ - 92⁴) / 12 = 2_277_888 mm⁴ (approx.)
        let expected_inertia = (100f64.powi(4) - 92f64.powi(4)) / 12. * 1e-12;
        assert!((p.inertia - expected_inertia).abs() < 1e-15);
        assert!((p.section_modulus - expected_inertia / 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_fractional_thickness_name() {
        assert_eq!(BeamProfile::shs(300., 12.5).name, "SHS 300x300 x 12.5");
    }

    #[test]
    fn test_default_options_present() {
        let lib = ProfileLibrary::standard();
        for name in [
            "SHS 300x300 x 10",
            "SHS 100x100 x 4",
            "SHS 50x50 x 4",
            "SHS 100x100 x 5",
            "SHS 80x80 x 5",
            "SHS 150x150 x 5",
        ] {
            assert!(lib.contains(name), "missing {}", name);
        }
        assert_eq!(lib.profile_options().len(), ROLLED_SECTIONS.len() + SHS_SECTIONS.len());
    }

    #[test]
    fn test_rolled_units() -> Result<()> {
        let lib = ProfileLibrary::standard();
        let ipe = lib.get("IPE 200")?;
        assert!((ipe.area - 28.5e-4).abs() < 1e-12);
        assert!((ipe.inertia - 1943e-8).abs() < 1e-15);
        assert_eq!(ipe.family(), "IPE");
        Ok(())
    }

    #[test]
    fn test_unknown_profile() {
        let lib = ProfileLibrary::standard();
        assert!(lib.get("UPN 100").is_err());
    }

    #[test]
    fn test_families() {
        let lib = ProfileLibrary::standard();
        for family in BEAM_TYPES {
            assert!(!lib.family(family).is_empty());
        }
        assert_eq!(lib.family("SHS").len(), SHS_SECTIONS.len());
    }
}
