//! Output helpers shared by the map commands.

use crate::runner::HeadlessMap;
use cartolayer::compose::CompositionReport;

/// Print the composed layer stack, top of the paint order first.
pub fn print_layer_stack(map: &HeadlessMap) {
    let Some(snapshot) = map.engine().snapshot() else {
        println!("No surface");
        return;
    };

    println!("Surface:  {}", snapshot.id);
    println!("Style:    {}", snapshot.style_url);
    println!("View:     {} @ zoom {:.1}", snapshot.center, snapshot.zoom);
    println!();
    println!("Layers (top first):");
    for layer in snapshot.layers.iter().rev() {
        let mark = if layer.visibility.is_visible() { "x" } else { " " };
        println!(
            "  [{}] {:<24} {:<8} {}",
            mark,
            layer.id,
            layer.kind.to_string(),
            layer.source
        );
    }
}

/// Print the layers a composition left out.
pub fn print_skipped(report: &CompositionReport) {
    if report.is_complete() {
        return;
    }
    println!();
    println!("Skipped:");
    for skipped in &report.skipped {
        println!("  {:<12} {}", skipped.layer.as_str(), skipped.reason);
    }
}
