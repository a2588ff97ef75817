use crate::geo::{self, GeoPoint, GeoPolygon};
use crate::geom::rotation::rotate_2d;
use crate::params::WarehouseParams;
use crate::scene::{Color, Extrusion, Line, Material, Transform, is_clockwise};
use crate::views::map::{MapPoint, MapPolygon};
use crate::{Point, Vector};
use anyhow::{Context, Result, anyhow};
use tracing::debug;

/// Plot of land and building footprint on the map.
///
/// Local building coordinates have the origin at the building corner, y along
/// the building length and x across it. A rotation of zero points y north.
#[derive(Debug, Clone, PartialEq)]
pub struct Map {
    pub land_polygon: Option<GeoPolygon>,
    pub building_corner: Option<GeoPoint>,
    /// Counter-clockwise [rad]
    pub building_rotation: f64,
    pub building_y_dimension: f64,
    pub office_x_dimension: f64,
    pub warehouse_x_dimension: f64,
}

impl Map {
    pub fn from_params(params: &WarehouseParams) -> Self {
        let lb = &params.location_and_building;
        Self {
            land_polygon: lb.poly.clone(),
            building_corner: lb.start,
            building_rotation: lb.rotate.to_radians(),
            building_y_dimension: lb.building_y_dimension,
            office_x_dimension: lb.office_x_dimension,
            warehouse_x_dimension: lb.warehouse_x_dimension,
        }
    }

    pub fn land_polygon(&self) -> Option<&GeoPolygon> {
        self.land_polygon.as_ref()
    }

    pub fn building_corner(&self) -> Option<GeoPoint> {
        self.building_corner
    }

    fn require_land(&self) -> Result<&GeoPolygon> {
        self.land_polygon().ok_or_else(|| anyhow!("No terrain polygon selected"))
    }

    fn require_corner(&self) -> Result<GeoPoint> {
        self.building_corner().ok_or_else(|| anyhow!("No building corner selected"))
    }

    pub fn get_land_polygon(&self) -> Result<MapPolygon> {
        Ok(MapPolygon::from_geo_polygon(self.require_land()?))
    }

    pub fn get_office_polygon(&self) -> Result<MapPolygon> {
        self.get_building_polygon(self.building_y_dimension, self.office_x_dimension, (0., 0.))
    }

    pub fn get_warehouse_polygon(&self) -> Result<MapPolygon> {
        self.get_building_polygon(
            self.building_y_dimension,
            self.warehouse_x_dimension,
            (self.office_x_dimension, 0.),
        )
    }

    /// Footprint rectangle rotated about the corner and projected on the map.
    ///
    /// `translate` shifts the rectangle in local coordinates before rotation.
    fn get_building_polygon(
        &self,
        y_dimension: f64,
        x_dimension: f64,
        translate: (f64, f64),
    ) -> Result<MapPolygon> {
        let start = self.require_corner()?;
        let rotated: Vec<(f64, f64)> =
            Self::get_shape_coordinates(y_dimension, x_dimension, translate)
                .into_iter()
                .map(|p| Self::rotate((0., 0.), p, self.building_rotation))
                .collect();
        let coordinates = Self::convert_points_to_map_coordinates(start, &rotated);
        let points = coordinates.into_iter().map(MapPoint::from).collect();
        Ok(MapPolygon::new(points).with_color(Color::new(0, 0, 255)))
    }

    /// Rotates `point` counter-clockwise by `angle` [rad] around `origin`.
    pub fn rotate(origin: (f64, f64), point: (f64, f64), angle: f64) -> (f64, f64) {
        rotate_2d(origin, point, angle)
    }

    /// Corners of a `x_dimension × y_dimension` rectangle: origin, along y, far, along x.
    pub fn get_shape_coordinates(
        y_dimension: f64,
        x_dimension: f64,
        translate: (f64, f64),
    ) -> [(f64, f64); 4] {
        let (x0, y0) = translate;
        [
            (x0, y0),
            (x0, y0 + y_dimension),
            (x0 + x_dimension, y0 + y_dimension),
            (x0 + x_dimension, y0),
        ]
    }

    /// Moves `start` by a local offset `(dx, dy)` [m], x east and y north.
    pub fn get_point(start: GeoPoint, offset: (f64, f64)) -> GeoPoint {
        let (dx, dy) = offset;
        let bearing = dx.atan2(dy).to_degrees();
        geo::destination(start, dx.hypot(dy), bearing)
    }

    /// Chains local points onto the map.
    ///
    /// The first point is an offset from `start`, every next point an offset
    /// from the previous projected point.
    pub fn convert_points_to_map_coordinates(
        start: GeoPoint,
        points: &[(f64, f64)],
    ) -> Vec<GeoPoint> {
        let Some(&first) = points.first() else {
            return vec![];
        };
        let mut coordinates = vec![Self::get_point(start, first)];
        for pair in points.windows(2) {
            let diff = (pair[1].0 - pair[0].0, pair[1].1 - pair[0].1);
            let prev = coordinates[coordinates.len() - 1];
            coordinates.push(Self::get_point(prev, diff));
        }
        coordinates
    }

    /// Terrain vertices in metres relative to the building corner.
    ///
    /// x is the geodesic distance along the corner's parallel, y along its
    /// meridian, negative to the west and south.
    pub fn convert_map_coordinates_to_cartesian(&self) -> Result<Vec<(f64, f64)>> {
        let origin = self.require_corner()?;
        let land = self.require_land()?;
        land.points
            .iter()
            .map(|c| {
                let mut x = geo::distance(origin, GeoPoint::new(origin.lat, c.lon))
                    .with_context(|| format!("Failed to measure terrain point {}", c))?;
                let mut y = geo::distance(origin, GeoPoint::new(c.lat, origin.lon))
                    .with_context(|| format!("Failed to measure terrain point {}", c))?;
                if c.lon < origin.lon {
                    x = -x;
                }
                if c.lat < origin.lat {
                    y = -y;
                }
                Ok((x, y))
            })
            .collect()
    }

    pub fn land_material() -> Material {
        Material::new("grass", Color::new(120, 255, 130)).with_opacity(0.9)
    }

    /// Terrain slab just below ground level, in building coordinates.
    pub fn visualize(&self) -> Result<Extrusion> {
        let mut profile: Vec<Point> = self
            .convert_map_coordinates_to_cartesian()?
            .into_iter()
            .map(|(x, y)| Point::new(x, y, 0.))
            .collect();
        if let Some(&first) = profile.first() {
            profile.push(first);
        }
        if !is_clockwise(&profile) {
            profile.reverse();
        }
        debug!("Land profile with {} vertices", profile.len());

        let line = Line::new(Point::new(0., 0., -0.30), Point::new(0., 0., -0.1));
        let mut land = Extrusion::new(&profile, line)
            .context("Terrain polygon cannot be extruded")?
            .with_material(Self::land_material());
        land.rotate(-self.building_rotation, Vector::unit_z());
        Ok(land)
    }
}
