use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;
use warehouse3d::io::{self, StlFormat};
use warehouse3d::{GeometryResult, HasMesh, WarehouseController, WarehouseParams};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum View {
    /// Terrain and building footprints
    Map,
    /// Exterior massing on the plot
    Building,
    /// Steel structure
    Structure,
    /// Solved demo truss coloured by utilisation
    SampleTruss,
    /// Steel quantities
    Report,
    /// Default parameter file
    Defaults,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Stl,
    StlAscii,
    Geojson,
}

#[derive(Debug, Parser)]
#[command(name = "warehouse3d", version, about = WarehouseController::LABEL)]
struct Cli {
    #[arg(value_enum)]
    view: View,

    /// JSON parameter file; missing fields take their defaults
    #[arg(short, long)]
    params: Option<PathBuf>,

    /// Output file, stdout if omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,
}

fn emit(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => println!("{}", text),
    }
    Ok(())
}

fn emit_geometry(
    result: &GeometryResult,
    format: Format,
    output: Option<&Path>,
    name: &str,
) -> Result<()> {
    let stl_format = match format {
        Format::Json => return emit(&io::to_scene_string(result)?, output),
        Format::Stl => StlFormat::Binary,
        Format::StlAscii => StlFormat::Ascii,
        Format::Geojson => return Err(anyhow!("GeoJSON is only available for the map view")),
    };
    let path = output.ok_or_else(|| anyhow!("STL output needs --output"))?;
    let mesh = result.copy_mesh();
    io::write_stl(path, &mesh, name, stl_format)?;
    info!(
        "Wrote {}: {} triangles, {:.1} m2 surface",
        path.display(),
        mesh.face_count(),
        mesh.area()
    );
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let params = match &cli.params {
        Some(path) => io::read_params(path)?,
        None => WarehouseParams::default(),
    };
    let controller = WarehouseController::new();
    let output = cli.output.as_deref();

    match cli.view {
        View::Map => {
            let result = controller.map_view(&params)?;
            let text = match cli.format {
                Format::Json => serde_json::to_string_pretty(&result)?,
                Format::Geojson => io::to_geojson_string(&result)?,
                Format::Stl | Format::StlAscii => {
                    return Err(anyhow!("The map view has no 3D geometry"));
                }
            };
            emit(&text, output)
        }
        View::Building => {
            let result = controller.building_view(&params)?;
            emit_geometry(&result, cli.format, output, "building")
        }
        View::Structure => {
            let result = controller.structure_view(&params)?;
            emit_geometry(&result, cli.format, output, "structure")
        }
        View::SampleTruss => {
            let result = controller.sample_truss_view()?;
            emit_geometry(&result, cli.format, output, "sample_truss")
        }
        View::Report => {
            if cli.format != Format::Json {
                return Err(anyhow!("The report is only available as JSON"));
            }
            emit(&serde_json::to_string_pretty(&controller.report(&params)?)?, output)
        }
        View::Defaults => emit(&serde_json::to_string_pretty(&WarehouseParams::default())?, output),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(&cli)
}
