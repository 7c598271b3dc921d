// Domain layer: catalog models, submission records and ports.

pub mod model;
pub mod ports;
pub mod submission;
