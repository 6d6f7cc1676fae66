pub mod browser;
pub mod core;
pub mod errors;
pub mod navigation;
pub mod stats;
pub mod testing;
pub mod types;
pub mod utils;

pub use browser::ChromeDriver;
pub use crate::core::{Config, DriverTrait, Environment};
pub use errors::AutomationError;
pub use navigation::{ActionBot, Navigator};
pub use stats::{ClickStats, KeyStats, StatsAction, StatsPlugin, StatsRegistry, WaitStats};
pub use types::*;
