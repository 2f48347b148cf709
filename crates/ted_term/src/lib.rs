pub mod event;
pub mod platform;
pub mod style;
pub mod units;
