pub mod analyze;
pub mod stock;
pub mod system;
