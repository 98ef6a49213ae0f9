pub mod entities;
pub mod interface;
pub mod model;
