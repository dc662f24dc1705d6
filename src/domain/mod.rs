// Domain layer: request/response models and ports. No framework types here.

pub mod model;
pub mod ports;
