pub mod element;
pub mod registry;
pub mod spec;
