pub mod routes;

pub use routes::{cluster_routes, ApiState};
