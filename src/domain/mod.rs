// Domain layer: plain data and the ports the engine is configured through.

pub mod model;
pub mod ports;
