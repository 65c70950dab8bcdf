pub mod query;
pub mod relay;
pub mod shaping;
