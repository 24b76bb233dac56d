// Domain layer: models and ports. Depends on std/serde/chrono types only.

pub mod model;
pub mod ports;
