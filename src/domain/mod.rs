// Domain layer: order payload model and the ports to the two external systems.

pub mod model;
pub mod ports;
