//! Entry points of the configurator.
//!
//! Every view validates the parameters, builds fresh model objects and wraps
//! their drawing in a result. Nothing is kept between calls.

pub mod geometry;
pub mod map;

pub use geometry::GeometryResult;
pub use map::{MapFeature, MapPoint, MapPolygon, MapResult};

use crate::Point;
use crate::model::{
    BuildingExterior, FrameReport, Map, OfficeFrame, OfficeReport, WarehouseSteelFrame,
};
use crate::params::WarehouseParams;
use crate::profiles::ProfileLibrary;
use crate::scene::{CartesianAxes, Group};
use crate::sim::fem::{sample_pratt_truss, visualise_solution};
use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

/// Steel quantities of the whole building.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructureReport {
    pub warehouse: FrameReport,
    pub office: OfficeReport,
}

pub struct WarehouseController {
    library: ProfileLibrary,
}

impl Default for WarehouseController {
    fn default() -> Self {
        Self::new()
    }
}

impl WarehouseController {
    pub const LABEL: &'static str = "Warehouse configurator";

    pub fn new() -> Self {
        Self::with_library(ProfileLibrary::standard())
    }

    pub fn with_library(library: ProfileLibrary) -> Self {
        Self { library }
    }

    fn validate(&self, params: &WarehouseParams) -> Result<()> {
        params.validate(&self.library).context("Invalid parameters")
    }

    /// Terrain and building footprints on the map.
    pub fn map_view(&self, params: &WarehouseParams) -> Result<MapResult> {
        self.validate(params)?;
        let map_plot = Map::from_params(params);

        let mut features: Vec<MapFeature> = vec![];
        if map_plot.land_polygon().is_some() {
            features.push(map_plot.get_land_polygon()?.into());
        }
        if map_plot.building_corner().is_some() {
            features.push(map_plot.get_office_polygon()?.into());
            features.push(map_plot.get_warehouse_polygon()?.into());
        }
        info!("Map view: {} features", features.len());
        Ok(MapResult::new(features))
    }

    /// Building massing on its plot, with axes at the building corner.
    pub fn building_view(&self, params: &WarehouseParams) -> Result<GeometryResult> {
        self.validate(params)?;
        let exterior = BuildingExterior::from_params(params).visualize();
        let land = Map::from_params(params)
            .visualize()
            .context("Building view needs a terrain polygon and a building corner")?;
        let axes = CartesianAxes::new(Point::origin(), 10., 0.1);

        let group = Group::named("building", vec![exterior.into(), land.into(), axes.into()]);
        info!("Building view: {} objects", group.primitive_count());
        Ok(GeometryResult::new(group))
    }

    /// Steel structure, with hidden parts reduced to their floor slab.
    pub fn structure_view(&self, params: &WarehouseParams) -> Result<GeometryResult> {
        self.validate(params)?;
        let visual = &params.structure.advanced_settings.visual_settings;

        let warehouse_frame = WarehouseSteelFrame::from_params(params, &self.library)?;
        let warehouse: Group = if visual.warehouse_visible {
            warehouse_frame.visualise()?
        } else {
            Group::named("warehouse_structure", vec![warehouse_frame.draw_floor().into()])
        };

        let office_frame = OfficeFrame::from_params(params, &self.library)?;
        let office: Group = if visual.office_visible {
            office_frame.visualise()?
        } else {
            Group::named("office_structure", vec![office_frame.draw_floor().into()])
        };

        let group = Group::named("structure", vec![warehouse.into(), office.into()]);
        info!("Structure view: {} objects", group.primitive_count());
        Ok(GeometryResult::new(group))
    }

    /// Solved Pratt truss coloured by utilisation.
    pub fn sample_truss_view(&self) -> Result<GeometryResult> {
        let model = sample_pratt_truss(&self.library)?;
        let solution = model.solve()?;
        info!(
            "Sample truss: max displacement {:.4} m",
            solution.max_displacement()
        );
        Ok(GeometryResult::new(visualise_solution(&model, &solution)))
    }

    pub fn report(&self, params: &WarehouseParams) -> Result<StructureReport> {
        self.validate(params)?;
        Ok(StructureReport {
            warehouse: WarehouseSteelFrame::from_params(params, &self.library)?.report()?,
            office: OfficeFrame::from_params(params, &self.library)?.report(),
        })
    }
}
