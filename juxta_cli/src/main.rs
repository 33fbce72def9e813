//! # Juxta Preview
//!
//! Headless preview of a before/after slider. Simulates both image loads
//! against the in-memory document, runs initialization, and prints the
//! resulting markup as HTML or JSON.
//!
//! ```text
//! juxta-preview --before-size 1000x500 --after-size 1000x500 \
//!     --before-credit "USGS" --position 30% --format json
//! ```

use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use juxta_core::dom::memory::MemorySurface;
use juxta_core::dom::Surface;
use juxta_core::{GateStatus, ImageSpec, Mode, Side, SliderController, SliderOptions};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Width and height in pixels, written as `WIDTHxHEIGHT`
#[derive(Debug, Clone, Copy, PartialEq)]
struct Size {
    width: f64,
    height: f64,
}

impl FromStr for Size {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", s))?;
        let width: f64 = w.trim().parse().map_err(|_| format!("invalid width '{}'", w))?;
        let height: f64 = h.trim().parse().map_err(|_| format!("invalid height '{}'", h))?;
        if width < 0.0 || height < 0.0 {
            return Err(format!("size must not be negative, got '{}'", s));
        }
        Ok(Size { width, height })
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ModeArg {
    Horizontal,
    Vertical,
}

impl From<ModeArg> for Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Horizontal => Mode::Horizontal,
            ModeArg::Vertical => Mode::Vertical,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
enum Format {
    #[default]
    Html,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "juxta-preview", version, about = "Render before/after slider markup headlessly")]
struct Cli {
    /// Natural size of the before image
    #[arg(long, default_value = "1000x500")]
    before_size: Size,

    /// Natural size of the after image
    #[arg(long, default_value = "1000x500")]
    after_size: Size,

    #[arg(long, default_value = "before.jpg")]
    before_src: String,

    #[arg(long, default_value = "after.jpg")]
    after_src: String,

    #[arg(long)]
    before_label: Option<String>,

    #[arg(long)]
    after_label: Option<String>,

    #[arg(long)]
    before_credit: Option<String>,

    #[arg(long)]
    after_credit: Option<String>,

    /// Rendered size of the container before sizing is applied
    #[arg(long, default_value = "800x600")]
    container: Size,

    /// Starting position, e.g. "30%"
    #[arg(long)]
    position: Option<String>,

    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// JSON options file; command-line flags override it
    #[arg(long)]
    options: Option<PathBuf>,

    #[arg(long)]
    no_animate: bool,

    #[arg(long)]
    no_labels: bool,

    #[arg(long, value_enum, default_value_t = Format::Html)]
    format: Format,
}

impl Cli {
    fn slider_options(&self) -> anyhow::Result<SliderOptions> {
        let mut options = match &self.options {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("reading options file {}", path.display()))?;
                SliderOptions::from_json(&json)
                    .with_context(|| format!("parsing options file {}", path.display()))?
            }
            None => SliderOptions::default(),
        };

        if let Some(position) = &self.position {
            options.starting_position = position.clone();
        }
        if let Some(mode) = self.mode {
            options.mode = mode.into();
        }
        if self.no_animate {
            options.animate = false;
        }
        if self.no_labels {
            options.show_labels = false;
        }
        Ok(options)
    }

    fn images(&self) -> [ImageSpec; 2] {
        let spec = |src: &str, label: &Option<String>, credit: &Option<String>| ImageSpec {
            src: src.to_string(),
            alt: String::new(),
            label: label.clone(),
            credit: credit.clone(),
        };
        [
            spec(&self.before_src, &self.before_label, &self.before_credit),
            spec(&self.after_src, &self.after_label, &self.after_credit),
        ]
    }
}

fn render(cli: &Cli) -> anyhow::Result<String> {
    let options = cli.slider_options()?;

    let surface = MemorySurface::new();
    let container = surface.create_element("div")?;
    surface.set_attribute(&container, "id", "juxta")?;
    surface.set_rendered_size(container, cli.container.width, cli.container.height);

    let mut slider = SliderController::new(surface, container, &cli.images(), options)?;
    for (side, size) in [(Side::Before, cli.before_size), (Side::After, cli.after_size)] {
        let image = *slider.image(side).image();
        slider.surface().set_natural_size(image, size.width, size.height);
    }

    slider.mark_loaded(Side::Before);
    let status = slider.mark_loaded(Side::After);
    if status != GateStatus::Initialized {
        bail!("slider did not initialize ({:?})", status);
    }
    debug!(position = ?slider.position(), "preview rendered");

    let output = match cli.format {
        Format::Html => slider.surface().render_html(container),
        Format::Json => {
            let value = serde_json::json!({
                "phase": slider.phase(),
                "position": slider.position(),
                "aspectRatioMatch": slider.validate_aspect_ratio_match(),
                "options": slider.options(),
                "markup": slider.surface().snapshot(container),
            });
            let mut json = serde_json::to_string_pretty(&value)?;
            json.push('\n');
            json
        }
    };
    Ok(output)
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match render(&cli) {
        Ok(output) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
