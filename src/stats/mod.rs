pub mod action;
pub mod click;
pub mod keys;
pub mod plugin;
pub mod registry;
pub mod wait;

pub use action::StatsAction;
pub use click::ClickStats;
pub use keys::KeyStats;
pub use plugin::StatsPlugin;
pub use registry::StatsRegistry;
pub use wait::WaitStats;
