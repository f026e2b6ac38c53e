//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing_subscriber` formatter filtered
//! by `RUST_LOG`. Module paths are hidden (`with_target(false)`); the
//! structured fields say where a line came from.
//!
//! ## What Gets Traced
//!
//! - **Actor lifecycle**: startup and shutdown of the session actor
//! - **Session operations**: selection, confirmation, every tick
//! - **Route cache**: hits, misses, fetches and invalidations
//! - **Errors**: rejected selections at `info`, provider and cache failures at `warn`
//!
//! ## Usage Examples
//!
//! ```bash
//! # Selections, arrivals and cache fetches
//! RUST_LOG=info cargo run -- --store "Pizza Express" --address "Rua X" --item "🍕 Pizza"
//!
//! # Every tick with its cursor
//! RUST_LOG=debug cargo run -- --store "Pizza Express" --address "Rua X" --item "🍕 Pizza"
//! ```
//!
//! ## Workflow Trace Example
//!
//! **With `RUST_LOG=info`**:
//!
//! ```text
//! INFO Session actor started
//! INFO select_store: Route fetched and cached alternatives=1 store=Pizza Express
//! INFO select_store: Store selected generation=1 waypoints=42 store=Pizza Express
//! INFO Order confirmed store=Pizza Express item=🍕 Pizza
//! INFO Courier arrived cursor=41
//! INFO Delivery completed generation=1
//! ```

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
