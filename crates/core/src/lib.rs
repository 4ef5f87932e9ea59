#![forbid(unsafe_code)]

pub mod draw;
pub mod model;
pub mod time;

pub use time::Clock;
