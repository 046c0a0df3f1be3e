pub mod model;
pub mod timestamp;
pub mod timing;
