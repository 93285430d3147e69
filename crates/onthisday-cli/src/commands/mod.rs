pub mod browse;
pub mod counts;
pub mod misc;
pub mod show;
