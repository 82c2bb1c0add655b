mod app;
mod widgets;

use std::path::PathBuf;
use std::rc::Rc;

use trip_board::{CardPresenterFactory, Container, TripPresenter};
use trip_proto::config::Config;
use trip_proto::{FilterModel, PointsModel, TripData};

fn main() -> anyhow::Result<()> {
    // ── Load config ──────────────────────────────────────────────────────────
    let config = Config::load().unwrap_or_default();

    let log_path = config.logging.file.clone();
    if let Some(dir) = log_path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // RUST_LOG overrides the configured filter.
    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| config.logging.filter.clone());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    eprintln!("trip log: {}", log_path.display());
    tracing::info!("trip board starting…");

    // ── Load trip data ───────────────────────────────────────────────────────
    let trip_file = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| config.data.trip_file.clone());
    let data = TripData::load(&trip_file)?;
    tracing::info!(
        "loaded {} points from {}",
        data.points.len(),
        trip_file.display()
    );

    // ── Models and presenter ─────────────────────────────────────────────────
    let points_model = Rc::new(PointsModel::new(data)?);
    let filter_model = Rc::new(FilterModel::new(config.board.default_filter));
    let trip = TripPresenter::new(
        Container::new(),
        points_model.clone(),
        filter_model.clone(),
        CardPresenterFactory,
    );
    trip.initialize()?;

    // ── Run TUI ──────────────────────────────────────────────────────────────
    let app = app::App::new(
        trip,
        filter_model,
        move || points_model.len(),
        config.board.show_keys,
    );
    app.run()?;

    Ok(())
}
