// Domain layer: amounts, response models and ports. No HTTP here.

pub mod amount;
pub mod model;
pub mod ports;
