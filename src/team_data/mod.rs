pub mod interface;
pub mod mock;
pub mod model;
pub mod store;
