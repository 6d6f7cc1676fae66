pub mod browser;
pub mod config;

pub use browser::DriverTrait;
pub use config::{BrowserConfig, Config, Environment, StatsConfig, WaitConfig};
