//! redblack-demo: walkthrough of the tree operations.
//!
//! Builds a small integer-to-word map, runs the three traversals,
//! point lookups, a removal, and the invariant check, then dumps the
//! tree shape to stdout.
//!
//! ## Configuration
//! - REDBLACK_LOG: tracing filter, defaults to "info"

use redblack::{RbTree, TreeError};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing with the REDBLACK_LOG environment variable.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env("REDBLACK_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn main() -> Result<(), TreeError> {
    init_tracing();

    let mut tree = RbTree::new();
    for (key, word) in [
        (10, "ten"),
        (20, "twenty"),
        (30, "thirty"),
        (15, "fifteen"),
        (25, "twenty-five"),
        (5, "five"),
        (1, "one"),
    ] {
        tree.insert(key, word)?;
    }

    let in_order: Vec<i32> = tree.in_order().map(|node| *node.key()).collect();
    info!(?in_order, len = tree.len(), "after inserts");

    match tree.search(&15) {
        Some(node) => info!(key = *node.key(), value = node.value(), "search hit"),
        None => info!("key 15 not present"),
    }

    info!(valid = tree.validate(), "checked invariants");

    match tree.remove(&20) {
        Ok(value) => info!(value, "removed key 20"),
        Err(err) => error!(%err, "removal failed"),
    }

    // Removing a key twice demonstrates the recoverable failure path.
    if let Err(err) = tree.remove(&20) {
        info!(%err, "second removal of 20 rejected as expected");
    }

    let in_order: Vec<i32> = tree.in_order().map(|node| *node.key()).collect();
    let pre_order: Vec<i32> = tree.pre_order().map(|node| *node.key()).collect();
    let post_order: Vec<i32> = tree.post_order().map(|node| *node.key()).collect();
    info!(?in_order, ?pre_order, ?post_order, "after removing 20");

    if let Some(node) = tree.search(&15) {
        let successor = node.successor().map(|n| *n.key());
        let predecessor = node.predecessor().map(|n| *n.key());
        info!(?successor, ?predecessor, "neighbors of 15");
    }

    info!(
        valid = tree.validate(),
        black_height = tree.black_height(),
        "final state"
    );
    println!("{tree:?}");

    Ok(())
}
