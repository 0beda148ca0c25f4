// Domain layer: value types, caller context and ports. No I/O here.

pub mod model;
pub mod ports;
pub mod session;
