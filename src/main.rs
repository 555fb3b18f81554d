use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use stickerkit::editor::{CutArea, TransformState, Vec2};
use stickerkit::imaging;
use stickerkit::pricing::{PricingEngine, QuantityValidator};
use stickerkit::{export, Dimensions, Material, StickerShape};

#[derive(Parser)]
#[command(name = "stickerkit", version, about = "Custom sticker design and pricing toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze an artwork file and suggest a shape and size
    Analyze {
        /// Path to the artwork image
        image: PathBuf,
    },
    /// Price a sticker configuration
    Price {
        /// Cut shape (rectangle, square, circle, diecut)
        #[arg(long)]
        shape: StickerShape,
        /// Width in cm (rectangle, square, diecut)
        #[arg(long)]
        width: Option<f64>,
        /// Height in cm (rectangle, square, diecut)
        #[arg(long)]
        height: Option<f64>,
        /// Diameter in cm (circle)
        #[arg(long)]
        diameter: Option<f64>,
        /// Order quantity
        #[arg(long)]
        quantity: f64,
        /// Material finish (vinyl, polyprop_film, holo_foil, brushed_alloy)
        #[arg(long, default_value = "vinyl")]
        material: Material,
    },
    /// Render a print-resolution export of an artwork
    Export {
        /// Path to the artwork image
        image: PathBuf,
        /// Cut shape (rectangle, square, circle, diecut)
        #[arg(long)]
        shape: StickerShape,
        /// Width in cm (rectangle, square, diecut)
        #[arg(long)]
        width: Option<f64>,
        /// Height in cm (rectangle, square, diecut)
        #[arg(long)]
        height: Option<f64>,
        /// Diameter in cm (circle)
        #[arg(long)]
        diameter: Option<f64>,
        /// Artwork scale
        #[arg(long, default_value_t = 1.0)]
        scale: f64,
        /// Rotation in degrees
        #[arg(long, default_value_t = 0.0)]
        rotation: f64,
        /// Horizontal offset in editor pixels
        #[arg(long, default_value_t = 0.0)]
        x: f64,
        /// Vertical offset in editor pixels
        #[arg(long, default_value_t = 0.0)]
        y: f64,
        /// Output PNG path
        #[arg(long, short, default_value = "export.png")]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    stickerkit::init_logging()?;

    let cli = Cli::parse();
    match cli.command {
        Command::Analyze { image } => analyze(&image),
        Command::Price {
            shape,
            width,
            height,
            diameter,
            quantity,
            material,
        } => price(shape, dimensions_from(shape, width, height, diameter)?, quantity, material),
        Command::Export {
            image,
            shape,
            width,
            height,
            diameter,
            scale,
            rotation,
            x,
            y,
            output,
        } => export_artwork(
            &image,
            shape,
            dimensions_from(shape, width, height, diameter)?,
            TransformState {
                scale,
                rotation,
                position: Vec2::new(x, y),
            },
            &output,
        ),
    }
}

fn dimensions_from(
    shape: StickerShape,
    width: Option<f64>,
    height: Option<f64>,
    diameter: Option<f64>,
) -> anyhow::Result<Dimensions> {
    let dims = if shape.uses_diameter() {
        match diameter {
            Some(d) => Dimensions::circle(d),
            None => bail!("--diameter is required for circle stickers"),
        }
    } else {
        match (width, height) {
            (Some(w), Some(h)) => Dimensions::rect(w, h),
            _ => bail!("--width and --height are required for {shape} stickers"),
        }
    };
    dims.validate_for(shape)?;
    Ok(dims)
}

fn analyze(path: &PathBuf) -> anyhow::Result<()> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let analysis = imaging::analyze_image(&bytes, "application/octet-stream", None)?;
    println!(
        "{}x{} px, transparency: {} (edge: {}), dark: {}",
        analysis.width,
        analysis.height,
        analysis.has_transparency,
        analysis.edge_transparency,
        analysis.is_dark
    );

    let suggestion =
        imaging::auto_configure(analysis.width, analysis.height, analysis.has_transparency);
    print!(
        "suggested: {} {:?} ({})",
        suggestion.shape, suggestion.dimensions, suggestion.orientation
    );
    match suggestion.matched_preset {
        Some(preset) => println!(", preset {preset:?}"),
        None => println!(", custom size"),
    }
    Ok(())
}

fn price(
    shape: StickerShape,
    dimensions: Dimensions,
    quantity: f64,
    material: Material,
) -> anyhow::Result<()> {
    let quantity = QuantityValidator::new().validate(quantity)?;
    let result = PricingEngine::new().price(shape, &dimensions, quantity, material)?;
    println!(
        "area {:.2} cm², base {:.2}, scaling {:.4}, raw {:.2}",
        result.area_cm2, result.base_price, result.scaling_factor, result.raw_total
    );
    println!(
        "total {:.2} ({} x {:.4} per sticker)",
        result.total_price, result.quantity, result.unit_price
    );
    Ok(())
}

fn export_artwork(
    path: &PathBuf,
    shape: StickerShape,
    dimensions: Dimensions,
    transform: TransformState,
    output: &PathBuf,
) -> anyhow::Result<()> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let decoded = image::load_from_memory(&bytes)?;
    let analysis = imaging::analyze_decoded(&decoded, Some(&dimensions))?;
    if let Some(warning) = analysis.resolution_warning {
        tracing::warn!(
            effective_ppi = warning.effective_ppi,
            recommended_ppi = warning.recommended_ppi,
            "artwork resolution is below the recommended print quality"
        );
    }

    let artwork = decoded.to_rgba8();
    let rendered = export::render_export(&export::ExportRequest {
        artwork: &artwork,
        transform,
        shape,
        dimensions,
        // A nominal on-screen geometry; offsets are given in its pixels
        screen_cut_area: CutArea::new(800.0, 600.0),
        dark_artwork: analysis.is_dark,
    })?;
    std::fs::write(output, &rendered.png)
        .with_context(|| format!("writing {}", output.display()))?;
    println!(
        "exported {}x{} px to {}",
        rendered.width,
        rendered.height,
        output.display()
    );
    Ok(())
}
