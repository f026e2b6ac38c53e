//! # Delivery Tracker
//!
//! > **Route acquisition, caching and simulated courier tracking for a food-delivery demo.**
//!
//! A customer picks a store and a delivery address. The route between them is
//! fetched from a directions provider (or read from a single-slot cache),
//! decoded into waypoints, and a courier marker advances one waypoint per
//! tick while the order moves through its lifecycle.
//!
//! ## 🏗️ Design
//!
//! ### One explicit session
//! All state lives in a [`DeliverySession`](session::DeliverySession): the
//! selected store, the order, the route cache and the courier cursor. The
//! presentation layer talks to it through three operations
//! (`select_store`, `confirm_order`, `tick`) and renders the values they return.
//!
//! ### Actor-owned
//! The session runs inside a [`SessionActor`](session_actor::SessionActor) and
//! is reached through a cloneable [`SessionClient`](clients::SessionClient).
//! Requests are handled one at a time, so a tick can never interleave with an
//! in-flight route fetch.
//!
//! ### Generations
//! Every selection gets a new [`Generation`](session::Generation). Ticks carry
//! the generation they were started for and are rejected once it is stale.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Core
//! - [`polyline`] - encoded polyline decoder
//! - [`route_cache`] - single-slot cache in front of the provider
//! - [`tracking`] - one-waypoint-per-tick courier simulator
//! - [`order`] - four-state order lifecycle
//! - [`session`] - ties the above together
//!
//! ### 2. The Edges
//! - [`directions`] - provider contract, Google adapter and a mock
//! - [`catalog`] - static store and menu data
//! - [`model`] - addresses, waypoints and route types
//! - [`config`] - settings from the environment
//!
//! ### 3. The Runtime
//! - [`framework`] - request/response plumbing between client and actor
//! - [`session_actor`] and [`clients`] - the actor and its client
//! - [`lifecycle`] - [`DeliverySystem`](lifecycle::DeliverySystem),
//!   [`Ticker`](lifecycle::Ticker) and tracing setup
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! export CDS_API_KEY=...
//! RUST_LOG=info cargo run -- --store "Hamburgueria Top" --address "Rua X, Juiz de Fora" --item "🍔 Hambúrguer"
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod catalog;
pub mod clients;
pub mod config;
pub mod directions;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod order;
pub mod polyline;
pub mod route_cache;
pub mod session;
pub mod session_actor;
pub mod tracking;
