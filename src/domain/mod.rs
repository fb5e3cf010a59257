// Domain layer: records of an extract and the ports to the outside world.

pub mod model;
pub mod ports;
