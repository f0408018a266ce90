// Domain layer: region records, derived metrics and the ports the engine depends on.

pub mod model;
pub mod ports;
