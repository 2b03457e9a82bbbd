// Domain layer: service metadata, the bundled fallback map and ports (interfaces).

pub mod fallback;
pub mod model;
pub mod ports;
