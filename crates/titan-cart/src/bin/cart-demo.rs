//! # cart-demo
//!
//! Runs a short scripted cart session against the in-memory store and prints
//! the resulting content. Handy for eyeballing hashes, merges and events.
//!
//! ```text
//! RUST_LOG=debug cargo run --bin cart-demo
//! ```

use std::sync::Arc;

use titan_cart::{
    Cart, CartConfig, ItemFilter, ItemOptions, ItemUpdate, MemorySession, TracingDispatcher,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = CartConfig::load_or_default(None);
    info!(instance = %config.default_instance, title_update = %config.title_update, "Starting cart demo");

    let mut cart = Cart::new(
        Arc::new(MemorySession::new()),
        Arc::new(TracingDispatcher),
        config,
    );

    let red_m = ItemOptions::from([("color", "red"), ("size", "M")]);
    let tee = cart.add("tee-01", "Crew Tee", 1, 19.0, red_m.clone())?;
    cart.add("tee-01", "Crew Tee", 2, 19.0, red_m)?;
    let mug = cart.add("mug-02", "Enamel Mug", 1, 8.5, ItemOptions::new())?;

    cart.update(tee.hash(), ItemUpdate::new().options(ItemOptions::from([("size", "L")])))?;
    cart.remove(mug.hash())?;

    cart.instance(Some("wishlist"))
        .add("cap-03", "Trucker Cap", 1, 15.0, ItemOptions::new())?;
    cart.instance(None);

    let tees = cart.search(ItemFilter::new().id("tee-01"), true);
    info!(
        lines = cart.count_items(),
        units = cart.count_quantities(),
        total = cart.total(),
        tee_lines = tees.len(),
        "Cart summary"
    );

    println!("{}", serde_json::to_string_pretty(&cart.all())?);

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,titan_cart=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
