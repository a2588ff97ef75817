use serde::{Deserialize, Serialize};

/// RGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn red() -> Self {
        Self::new(255, 0, 0)
    }

    pub const fn green() -> Self {
        Self::new(0, 255, 0)
    }

    pub const fn blue() -> Self {
        Self::new(0, 0, 255)
    }

    /// Hex notation, e.g. `#0000ff`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Surface appearance of a scene object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    pub color: Color,
    /// 0.0 (transparent) ..= 1.0 (opaque)
    pub opacity: f64,
    /// 0.0 ..= 1.0
    pub metalness: f64,
}

impl Material {
    pub fn new(name: &str, color: Color) -> Self {
        Self {
            name: name.to_string(),
            color,
            opacity: 1.0,
            metalness: 0.5,
        }
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0., 1.);
        self
    }

    pub fn with_metalness(mut self, metalness: f64) -> Self {
        self.metalness = metalness.clamp(0., 1.);
        self
    }
}
