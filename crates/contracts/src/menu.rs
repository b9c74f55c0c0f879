//! Menu modes shared by the navigator and the presentation layer

use std::fmt;

use serde::{Deserialize, Serialize};

/// Active menu
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuMode {
    #[default]
    Main,
    /// First list (quick messages by default)
    ListA,
    /// Second list (expressions by default)
    ListB,
}

impl MenuMode {
    pub fn is_list(self) -> bool {
        !matches!(self, MenuMode::Main)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MenuMode::Main => "main",
            MenuMode::ListA => "list_a",
            MenuMode::ListB => "list_b",
        }
    }
}

impl fmt::Display for MenuMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
