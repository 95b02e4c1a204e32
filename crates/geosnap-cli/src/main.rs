//! GeoSnap command-line shell.
//!
//! Loads a GeoJSON feature collection, opens a snap session and resolves one
//! or more pointer positions, printing one JSON report per position.

mod report;

use anyhow::Context;
use clap::Parser;
use geosnap_core::{
    Coordinate, FeatureId, MemoryFeatureStore, Modifiers, PointerEvent, SnapOptions,
    SnapSession, WebMercatorView,
};
use kurbo::Size;
use log::info;
use std::path::PathBuf;

use crate::report::{GuideCollector, Report};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// GeoJSON FeatureCollection holding the drawn features
    #[arg(short, long)]
    features: PathBuf,

    /// JSON file with snap options (defaults apply when omitted)
    #[arg(short, long)]
    options: Option<PathBuf>,

    /// Map zoom level used to convert the pixel tolerance
    #[arg(short, long, default_value_t = 14.0)]
    zoom: f64,

    /// Id of the feature being edited; it is never snapped to
    #[arg(long)]
    editing: Option<FeatureId>,

    /// Hold the bypass modifier (Alt) for every position
    #[arg(long)]
    bypass: bool,

    /// Pointer position as "lng,lat"; repeat to replay a drag
    #[arg(long = "at", value_parser = parse_lng_lat, required = true, allow_hyphen_values = true)]
    positions: Vec<Coordinate>,

    #[arg(short, long)]
    debug: bool,
}

fn parse_lng_lat(value: &str) -> Result<Coordinate, String> {
    let (lng, lat) = value
        .split_once(',')
        .ok_or_else(|| format!("expected \"lng,lat\", got \"{}\"", value))?;
    let lng: f64 = lng.trim().parse().map_err(|e| format!("bad longitude: {}", e))?;
    let lat: f64 = lat.trim().parse().map_err(|e| format!("bad latitude: {}", e))?;
    if !lng.is_finite() || !lat.is_finite() {
        return Err(format!("non-finite position \"{}\"", value));
    }
    Ok(Coordinate { x: lng, y: lat })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if cli.debug { "debug" } else { "info" }),
    )
    .init();

    let store = MemoryFeatureStore::load(&cli.features)
        .with_context(|| format!("loading features from {}", cli.features.display()))?;
    let options = match &cli.options {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading options from {}", path.display()))?;
            SnapOptions::from_json(&json).context("parsing snap options")?
        }
        None => SnapOptions::default(),
    };
    info!("Loaded {} features", store.len());

    // Positions are geographic, so the view only supplies the zoom level.
    let view = WebMercatorView::new(cli.positions[0], cli.zoom, Size::new(1024.0, 768.0));
    let modifiers = Modifiers {
        alt: cli.bypass,
        ..Modifiers::default()
    };

    let mut session = SnapSession::start(&store, cli.editing, options);
    for &position in &cli.positions {
        let event = PointerEvent::at(position).with_modifiers(modifiers);
        let decision = session.snap_decision(&event, &view);

        let mut guides = GuideCollector::default();
        session.render_guides(&mut guides);

        let report = Report::new(position, &decision, guides.into_guides());
        println!("{}", serde_json::to_string(&report)?);
    }
    session.stop();

    Ok(())
}
