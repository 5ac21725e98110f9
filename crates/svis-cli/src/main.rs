mod config;

use anyhow::{Context, Result};
use clap::Parser;
use config::{parse_catalog, RunConfig};
use std::path::PathBuf;
use svis_core::{parse_carrier, parse_dec_deg, parse_ra_deg, Anchor};
use svis_data::{load_state_vectors, open_ephemeris, EphemerisKind, StarCatalog};
use svis_render::{render_all_modes, OutputLayout, Scene};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "svis")]
#[command(version, about = "Heliocentric orbit maps: a tracked body, the Sun and eight planets over a star field")]
struct Cli {
    /// State vector file (JD, UTC, x y z, vx vy vz rows between `*` lines)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Same as the positional FILE
    #[arg(long = "state-vectors", visible_alias = "sv")]
    state_vectors: Option<PathBuf>,

    /// JSON config file; flags override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Ephemeris source: spk or analytic
    #[arg(long)]
    ephemeris: Option<EphemerisKind>,

    /// Directory of SPK kernels (*.bsp)
    #[arg(long, visible_alias = "spice")]
    kernels: Option<PathBuf>,

    /// Star catalog CSV, or None for no stars
    #[arg(long)]
    catalog: Option<String>,

    /// Field of view (degrees)
    #[arg(long)]
    fov: Option<f64>,

    /// Screen width (pixels)
    #[arg(long, visible_alias = "screen-x")]
    width: Option<usize>,

    /// Screen height (pixels)
    #[arg(long, visible_alias = "screen-y")]
    height: Option<usize>,

    /// What the custom view looks at, e.g. SUN, EARTH_BARYCENTER, MP
    #[arg(long)]
    center: Option<Anchor>,

    /// What the custom view rides with, or None for a fixed camera
    #[arg(long)]
    carrier: Option<String>,

    /// Custom camera distance from the origin (AU)
    #[arg(long)]
    dist: Option<f64>,

    /// Custom camera right ascension (degrees or hh:mm:ss)
    #[arg(long, allow_hyphen_values = true)]
    ra: Option<String>,

    /// Custom camera declination (degrees or ±dd:mm:ss)
    #[arg(long, allow_hyphen_values = true)]
    dec: Option<String>,

    /// Gravitational parameter for orbit curves (km³/s²)
    #[arg(long)]
    mu: Option<f64>,

    /// File name prefix
    #[arg(long)]
    prefix: Option<String>,

    /// Root for the map_<mode> directories
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Crosshair at the centre of the custom view
    #[arg(long)]
    crosshair: bool,

    /// Debug logging (RUST_LOG wins when set)
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Defaults, then the config file, then whatever flags were given
    fn resolve(&self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::load(path)?,
            None => RunConfig::default(),
        };

        if let Some(path) = self.state_vectors.as_ref().or(self.input.as_ref()) {
            config.state_vectors = path.clone();
        }
        if let Some(kind) = self.ephemeris {
            config.ephemeris = kind;
        }
        if let Some(dir) = &self.kernels {
            config.kernels = dir.clone();
        }
        if let Some(catalog) = &self.catalog {
            config.catalog = parse_catalog(catalog);
        }
        if let Some(prefix) = &self.prefix {
            config.prefix = prefix.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }

        let render = &mut config.render;
        if let Some(fov) = self.fov {
            render.fov_deg = fov;
        }
        if let Some(width) = self.width {
            render.width = width;
        }
        if let Some(height) = self.height {
            render.height = height;
        }
        if let Some(center) = self.center {
            render.center = center;
        }
        if let Some(carrier) = &self.carrier {
            render.carrier = parse_carrier(carrier)?;
        }
        if let Some(dist) = self.dist {
            render.custom_offset.distance_au = dist;
        }
        if let Some(ra) = &self.ra {
            render.custom_offset.ra_deg = parse_ra_deg(ra)?;
        }
        if let Some(dec) = &self.dec {
            render.custom_offset.dec_deg = parse_dec_deg(dec)?;
        }
        if let Some(mu) = self.mu {
            render.mu = mu;
        }
        if self.crosshair {
            render.crosshair = true;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let config = cli.resolve()?;
    info!(
        "center {}, carrier {}, fov {}°, {}x{}",
        config.render.center,
        config.render.carrier.map_or("None".to_string(), |c| c.to_string()),
        config.render.fov_deg,
        config.render.width,
        config.render.height
    );

    // Every input is read before the first image is drawn
    let samples = load_state_vectors(&config.state_vectors)?;
    let catalog = match &config.catalog {
        Some(path) => StarCatalog::load_csv(path)?,
        None => StarCatalog::default(),
    };
    let ephemeris = open_ephemeris(config.ephemeris, &config.kernels)
        .with_context(|| format!("opening {} ephemeris", config.ephemeris))?;
    info!("Using {} ephemeris", ephemeris.name());

    let layout = OutputLayout::new(&config.output_dir, &config.prefix);
    layout.create_dirs().context("creating output directories")?;

    let (mut rendered, mut failed) = (0usize, 0usize);
    for (i, sample) in samples.iter().enumerate() {
        info!("map {} / {} ({})", i + 1, samples.len(), sample.timestamp);

        let scene = match Scene::build(sample, ephemeris.as_ref(), &catalog, config.render.mu) {
            Ok(scene) => scene,
            Err(e) => {
                warn!(timestamp = %sample.timestamp, error = %e, "skipping sample");
                failed += 3;
                continue;
            }
        };

        for result in render_all_modes(&scene, &config.render, &layout, &sample.file_stem()) {
            match result {
                Ok(_) => rendered += 1,
                Err(_) => failed += 1,
            }
        }
    }

    println!("\n✓ Rendered {} images from {} samples", rendered, samples.len());
    if failed > 0 {
        println!("  {} passes failed (see log)", failed);
    }
    Ok(())
}
