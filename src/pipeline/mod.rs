pub mod extraction;
pub mod import;
pub mod parameters;
