pub mod config;
pub mod sensor;
pub mod std_clock;
