//! Photo Book Tools CLI
//!
//! A command-line driver for the layout planners: it collects the
//! parameters the host application would supply, runs the planner, and
//! prints the resulting geometry for the caller to materialize.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

use anyhow::{bail, Result};
use photobook_tools::config::Preferences;
use photobook_tools::fit::{
    fit_fill, ColorMode, CropRequest, CropSpec, OutputFormat, Resample, STANDARD_RESOLUTIONS,
};
use photobook_tools::geometry::{content_rect, Margins, PixelSize, Rect, Unit};
use photobook_tools::grid::{plan_grid, HorizontalAlign, VerticalAlign};
use photobook_tools::style::CaptionStyle;

/// Photo Book Tools - plan grid layouts and image fits for photo books
#[derive(Parser)]
#[command(name = "photobook-tools")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Split an A4 page inside 40pt margins into a 3x2 grid with 10pt gaps
    photobook-tools grid --page 595 842 --margins 40 40 40 40 --columns 3 --rows 2 --gap 10

    # Lay out 4:3 frames with caption bands inside a selection, remembering the parameters
    photobook-tools grid --rect 50 80 400 300 --aspect 4 3 --caption 18 --prefs layout.json --save-prefs

    # Scale a 200x200px image to fill a 100x50pt frame, centered
    photobook-tools fill --frame 0 0 100 50 --image 200 200

    # Plan a 300 DPI crop of a 4x6 inch frame's visible region
    photobook-tools crop --frame 4 6 --unit in --image 3000 2000 --scale 0.1 0.1 --dpi 300")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan a grid of image frames inside a source rectangle or page margins
    Grid {
        /// Source rectangle as X Y WIDTH HEIGHT, in document units
        #[arg(long, num_args = 4, value_names = ["X", "Y", "W", "H"],
              allow_negative_numbers = true, conflicts_with = "page")]
        rect: Option<Vec<f64>>,

        /// Page size as WIDTH HEIGHT; the grid fills the area within --margins
        #[arg(long, num_args = 2, value_names = ["W", "H"])]
        page: Option<Vec<f64>>,

        /// Page margins as TOP LEFT RIGHT BOTTOM (defaults to none)
        #[arg(long, num_args = 4, value_names = ["TOP", "LEFT", "RIGHT", "BOTTOM"],
              requires = "page")]
        margins: Option<Vec<f64>>,

        /// Number of columns
        #[arg(long)]
        columns: Option<u32>,

        /// Number of rows
        #[arg(long)]
        rows: Option<u32>,

        /// Gap between frames in document units
        #[arg(long)]
        gap: Option<f64>,

        /// Frame aspect ratio as WIDTH HEIGHT integers (HEIGHT 0 = fill the cell)
        #[arg(long, num_args = 2, value_names = ["W", "H"])]
        aspect: Option<Vec<u32>>,

        /// Grid size as a percentage of the source rectangle
        #[arg(long)]
        scale: Option<f64>,

        /// Horizontal alignment: left, center or right
        #[arg(long)]
        align_h: Option<String>,

        /// Vertical alignment: top, center or bottom
        #[arg(long)]
        align_v: Option<String>,

        /// Caption band height in document units (negative overlays the frame bottom)
        #[arg(long, allow_negative_numbers = true)]
        caption: Option<f64>,

        /// Use the alternate border style for this run
        #[arg(long)]
        alternate_border: bool,

        /// Mark the source items for removal after materializing
        #[arg(long)]
        remove_source: bool,

        /// Preferences file supplying defaults for omitted parameters
        #[arg(long)]
        prefs: Option<PathBuf>,

        /// Write the parameters used back to the preferences file
        #[arg(long, requires = "prefs")]
        save_prefs: bool,

        /// Print the layout as JSON
        #[arg(long)]
        json: bool,
    },

    /// Scale an image to fill a frame and center the overflow
    Fill {
        /// Frame rectangle as X Y WIDTH HEIGHT, in document units
        #[arg(long, num_args = 4, value_names = ["X", "Y", "W", "H"],
              allow_negative_numbers = true, required = true)]
        frame: Vec<f64>,

        /// Image size in pixels as WIDTH HEIGHT
        #[arg(long, num_args = 2, value_names = ["W", "H"], required = true)]
        image: Vec<u32>,

        /// Print the fit as JSON
        #[arg(long)]
        json: bool,
    },

    /// Plan a crop-and-resize of a frame's visible image region at a target DPI
    Crop {
        /// Frame size as WIDTH HEIGHT, in --unit
        #[arg(long, num_args = 2, value_names = ["W", "H"], required = true)]
        frame: Vec<f64>,

        /// Document unit of the frame size: pt, mm, cm, in, p or c
        #[arg(long, default_value = "pt")]
        unit: String,

        /// Image size in pixels as WIDTH HEIGHT
        #[arg(long, num_args = 2, value_names = ["W", "H"], required = true)]
        image: Vec<u32>,

        /// Current image offset within the frame as X Y
        #[arg(long, num_args = 2, value_names = ["X", "Y"],
              allow_negative_numbers = true)]
        offset: Option<Vec<f64>>,

        /// Current image scale as SX SY
        #[arg(long, num_args = 2, value_names = ["SX", "SY"])]
        scale: Option<Vec<f64>>,

        /// Target print resolution
        #[arg(long, default_value_t = 300)]
        dpi: u32,

        /// Resampling filter: bicubic, bilinear or lanczos
        #[arg(long, default_value = "bicubic")]
        resample: String,

        /// Output color mode: rgb, cmyk, grayscale or bw
        #[arg(long, default_value = "rgb")]
        color_mode: String,

        /// Output file format: jpg, png or tif
        #[arg(long, default_value = "jpg")]
        format: String,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Grid {
            rect,
            page,
            margins,
            columns,
            rows,
            gap,
            aspect,
            scale,
            align_h,
            align_v,
            caption,
            alternate_border,
            remove_source,
            prefs,
            save_prefs,
            json,
        } => cmd_grid(GridArgs {
            rect,
            page,
            margins,
            columns,
            rows,
            gap,
            aspect,
            scale,
            align_h,
            align_v,
            caption,
            alternate_border,
            remove_source,
            prefs,
            save_prefs,
            json,
        }),
        Commands::Fill { frame, image, json } => cmd_fill(frame, image, json),
        Commands::Crop {
            frame,
            unit,
            image,
            offset,
            scale,
            dpi,
            resample,
            color_mode,
            format,
            json,
        } => cmd_crop(
            frame, unit, image, offset, scale, dpi, resample, color_mode, format, json,
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

struct GridArgs {
    rect: Option<Vec<f64>>,
    page: Option<Vec<f64>>,
    margins: Option<Vec<f64>>,
    columns: Option<u32>,
    rows: Option<u32>,
    gap: Option<f64>,
    aspect: Option<Vec<u32>>,
    scale: Option<f64>,
    align_h: Option<String>,
    align_v: Option<String>,
    caption: Option<f64>,
    alternate_border: bool,
    remove_source: bool,
    prefs: Option<PathBuf>,
    save_prefs: bool,
    json: bool,
}

/// Plan a grid layout and print the frames to materialize
fn cmd_grid(args: GridArgs) -> Result<()> {
    // Saved preferences fill in whatever the command line leaves out
    let mut prefs = match &args.prefs {
        Some(path) => Preferences::load(path)?,
        None => Preferences::default(),
    };

    if let Some(columns) = args.columns {
        prefs.columns = columns;
    }
    if let Some(rows) = args.rows {
        prefs.rows = rows;
    }
    if let Some(gap) = args.gap {
        prefs.gap = gap;
    }
    if let Some(aspect) = &args.aspect {
        prefs.aspect_width = aspect[0];
        prefs.aspect_height = aspect[1];
    }
    if let Some(scale) = args.scale {
        prefs.scale_percent = scale;
    }
    if let Some(align_h) = &args.align_h {
        prefs.horizontal_align = parse_align_h(align_h)?;
    }
    if let Some(align_v) = &args.align_v {
        prefs.vertical_align = parse_align_v(align_v)?;
    }
    if let Some(caption) = args.caption {
        prefs.caption = caption != 0.0;
        prefs.caption_height = caption;
    }
    if args.alternate_border {
        prefs.alternate_border = true;
    }
    if args.remove_source {
        prefs.remove_source = true;
    }

    let source = match (&args.rect, &args.page) {
        (Some(rect), None) => Rect::new(rect[0], rect[1], rect[2], rect[3]),
        (None, Some(page)) => {
            let margins = match &args.margins {
                Some(m) => Margins {
                    top: m[0],
                    left: m[1],
                    right: m[2],
                    bottom: m[3],
                },
                None => Margins::none(),
            };
            content_rect(page[0], page[1], margins)?
        }
        _ => bail!("provide a source with either --rect or --page"),
    };

    let spec = prefs.to_grid_spec();
    let layout = plan_grid(source, &spec)?;

    if args.save_prefs {
        if let Some(path) = &args.prefs {
            prefs.save(path)?;
            eprintln!("Saved parameters to {}", path.display());
        }
    }

    eprintln!(
        "Planned {} frames ({} columns x {} rows) in {:.2}x{:.2}",
        layout.cells.len(),
        spec.columns,
        spec.rows,
        source.width,
        source.height
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&layout)?);
        return Ok(());
    }

    for (i, cell) in layout.cells.iter().enumerate() {
        println!(
            "frame {}: x={:.2} y={:.2} w={:.2} h={:.2}",
            i + 1,
            cell.frame.x,
            cell.frame.y,
            cell.frame.width,
            cell.frame.height
        );
        if let Some(caption) = cell.caption {
            println!(
                "  caption: x={:.2} y={:.2} w={:.2} h={:.2}",
                caption.x, caption.y, caption.width, caption.height
            );
        }
    }
    println!("border style: {:?}", layout.border_style);
    if spec.caption_height != 0.0 {
        let style = CaptionStyle::for_band_height(spec.caption_height);
        println!("caption font size: {}pt", style.font_size_pt);
    }
    if layout.remove_source {
        eprintln!("Remove the source items after materializing the frames.");
    }

    Ok(())
}

/// Compute the fill-and-center scale and offset for one frame
fn cmd_fill(frame: Vec<f64>, image: Vec<u32>, json: bool) -> Result<()> {
    let frame = Rect::new(frame[0], frame[1], frame[2], frame[3]);
    let image = PixelSize::new(image[0], image[1]);

    let fit = fit_fill(frame, image)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&fit)?);
        return Ok(());
    }

    println!("scale: {:.6}", fit.scale);
    println!("offset: x={:.2} y={:.2}", fit.offset_x, fit.offset_y);
    Ok(())
}

/// Plan a crop-and-resize for one frame
fn cmd_crop(
    frame: Vec<f64>,
    unit: String,
    image: Vec<u32>,
    offset: Option<Vec<f64>>,
    scale: Option<Vec<f64>>,
    dpi: u32,
    resample: String,
    color_mode: String,
    format: String,
    json: bool,
) -> Result<()> {
    let offset = offset.unwrap_or_else(|| vec![0.0, 0.0]);
    let scale = scale.unwrap_or_else(|| vec![1.0, 1.0]);

    if !STANDARD_RESOLUTIONS.contains(&dpi) {
        eprintln!("Note: {} DPI is not a standard print resolution", dpi);
    }

    let request = CropRequest {
        spec: CropSpec {
            frame_width: frame[0],
            frame_height: frame[1],
            unit: parse_unit(&unit)?,
            image: PixelSize::new(image[0], image[1]),
            image_offset: (offset[0], offset[1]),
            image_scale: (scale[0], scale[1]),
            target_dpi: dpi,
        },
        resample: parse_resample(&resample)?,
        color_mode: parse_color_mode(&color_mode)?,
        format: parse_format(&format)?,
    };

    let plan = request.plan()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    println!(
        "crop: left={} top={} right={} bottom={} ({}x{}px)",
        plan.crop.left,
        plan.crop.top,
        plan.crop.right,
        plan.crop.bottom,
        plan.crop.width(),
        plan.crop.height()
    );
    println!(
        "output: {}x{}px at {} DPI",
        plan.output.width, plan.output.height, dpi
    );
    println!(
        "processing: {:?} resample, {:?}, {:?}",
        request.resample, request.color_mode, request.format
    );
    Ok(())
}

/// Parse a document unit code as the host application abbreviates them
fn parse_unit(s: &str) -> Result<Unit> {
    match s.to_lowercase().as_str() {
        "pt" | "point" | "points" => Ok(Unit::Points),
        "mm" => Ok(Unit::Millimeters),
        "in" | "inch" | "inches" => Ok(Unit::Inches),
        "p" | "pica" | "picas" => Ok(Unit::Picas),
        "cm" => Ok(Unit::Centimeters),
        "c" | "cicero" | "ciceros" => Ok(Unit::Ciceros),
        other => bail!("unknown unit: {}", other),
    }
}

fn parse_align_h(s: &str) -> Result<HorizontalAlign> {
    match s.to_lowercase().as_str() {
        "left" => Ok(HorizontalAlign::Left),
        "center" => Ok(HorizontalAlign::Center),
        "right" => Ok(HorizontalAlign::Right),
        other => bail!("unknown horizontal alignment: {}", other),
    }
}

fn parse_align_v(s: &str) -> Result<VerticalAlign> {
    match s.to_lowercase().as_str() {
        "top" => Ok(VerticalAlign::Top),
        "center" => Ok(VerticalAlign::Center),
        "bottom" => Ok(VerticalAlign::Bottom),
        other => bail!("unknown vertical alignment: {}", other),
    }
}

fn parse_resample(s: &str) -> Result<Resample> {
    match s.to_lowercase().as_str() {
        "bicubic" => Ok(Resample::Bicubic),
        "bilinear" => Ok(Resample::Bilinear),
        "lanczos" => Ok(Resample::Lanczos),
        other => bail!("unknown resampling filter: {}", other),
    }
}

fn parse_color_mode(s: &str) -> Result<ColorMode> {
    match s.to_lowercase().as_str() {
        "rgb" => Ok(ColorMode::Rgb),
        "cmyk" => Ok(ColorMode::Cmyk),
        "grayscale" | "greyscale" | "gray" | "grey" => Ok(ColorMode::Grayscale),
        "bw" | "bilevel" => Ok(ColorMode::Bilevel),
        other => bail!("unknown color mode: {}", other),
    }
}

fn parse_format(s: &str) -> Result<OutputFormat> {
    match s.to_lowercase().as_str() {
        "jpg" | "jpeg" | ".jpg" => Ok(OutputFormat::Jpg),
        "png" | ".png" => Ok(OutputFormat::Png),
        "tif" | "tiff" | ".tif" => Ok(OutputFormat::Tif),
        other => bail!("unknown output format: {}", other),
    }
}
