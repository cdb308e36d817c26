// Domain layer: records, run settings and the config port.

pub mod model;
pub mod ports;
