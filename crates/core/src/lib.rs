#![forbid(unsafe_code)]

pub mod gate;
pub mod model;
pub mod scoring;
pub mod time;
pub mod timetable;

pub use time::Clock;
