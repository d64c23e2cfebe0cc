pub mod config;
pub mod effects;
pub mod model;
pub mod trail;
