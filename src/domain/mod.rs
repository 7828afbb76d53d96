// Domain layer: core models and ports (interfaces) shared by the quest engine and its drivers.

pub mod model;
pub mod ports;
