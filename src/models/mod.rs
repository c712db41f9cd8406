pub mod health_parameter;

pub use health_parameter::{Classification, HealthParameter};
