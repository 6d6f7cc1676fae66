use serde::{Deserialize, Serialize};

/// Kind of simulated user action reported to the stats registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatsAction {
    MouseLmbClick,
    MouseLmbDoubleClick,
    KeyboardType,
    Wait,
}

impl std::fmt::Display for StatsAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StatsAction::MouseLmbClick => "mouse-lmb-click",
            StatsAction::MouseLmbDoubleClick => "mouse-lmb-double-click",
            StatsAction::KeyboardType => "keyboard-type",
            StatsAction::Wait => "wait",
        };
        f.write_str(name)
    }
}
