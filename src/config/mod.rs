//! Host configuration
//!
//! [`Settings`] seeds a [`VariableStore`](crate::store::VariableStore); the
//! init script under [`config_dir`] can add variables on top.

mod settings;

use std::path::PathBuf;

pub use settings::{Settings, VimVariable};

/// Uses ~/.config/lark/vars/ on all platforms for consistency
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".config").join("lark").join("vars"))
}

pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|p| p.join("init.rhai"))
}
