//! Hover command.

use cartolayer::catalog::LogicalLayer;
use cartolayer::style::StyleKey;
use cartolayer::surface::LngLat;
use tracing::debug;

use super::common::print_skipped;
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the hover command.
pub struct HoverArgs {
    pub debug: bool,
    pub lon: f64,
    pub lat: f64,
    pub style: Option<StyleKey>,
    pub show: Vec<LogicalLayer>,
    pub hide: Vec<LogicalLayer>,
}

/// Compose the map, move the pointer to a position and report the result.
pub async fn run(args: HoverArgs) -> Result<(), CliError> {
    let runner = CliRunner::with_debug(args.debug)?;
    runner.log_startup("hover");

    let options = runner.map_options(args.style, &args.show, &args.hide)?;
    let mut map = runner.compose(options).await?;
    if let Some(report) = map.composition() {
        print_skipped(report);
    }

    let position = LngLat::new(args.lon, args.lat);
    if !map.engine().pointer_move(position) {
        debug!("No pointer listener on the surface");
    }
    map.process_pending();

    match map.hovered() {
        Some(feature) => println!("{} ({}) at {}", feature.name, feature.layer, feature.position),
        None => println!("Nothing under the pointer at {}", position),
    }

    map.shutdown();
    Ok(())
}
