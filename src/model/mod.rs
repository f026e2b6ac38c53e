//! Pure data structures shared by the route, tracking and order components.

pub mod route;
pub mod waypoint;

pub use route::*;
pub use waypoint::*;
