pub mod backend;
pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod session;
pub mod store;
