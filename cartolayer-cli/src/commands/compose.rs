//! Compose command.

use cartolayer::catalog::LogicalLayer;
use cartolayer::style::StyleKey;
use tracing::info;

use super::common::{print_layer_stack, print_skipped};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the compose command.
pub struct ComposeArgs {
    pub debug: bool,
    pub style: Option<StyleKey>,
    pub show: Vec<LogicalLayer>,
    pub hide: Vec<LogicalLayer>,
}

/// Compose the map once and print what is on the surface.
pub async fn run(args: ComposeArgs) -> Result<(), CliError> {
    let runner = CliRunner::with_debug(args.debug)?;
    runner.log_startup("compose");

    let options = runner.map_options(args.style, &args.show, &args.hide)?;
    let mut map = runner.compose(options).await?;

    print_layer_stack(&map);
    if let Some(report) = map.composition() {
        info!(%report, "Composition finished");
        print_skipped(report);
    }

    map.shutdown();
    Ok(())
}
