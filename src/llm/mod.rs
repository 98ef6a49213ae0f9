pub mod completion;
pub mod interface;
pub mod model;
pub mod stream;
