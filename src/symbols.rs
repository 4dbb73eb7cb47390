// src/symbols.rs

use std::sync::LazyLock;
use colored::{Colorize, ColoredString};

pub static ERROR: LazyLock<ColoredString> = LazyLock::new(|| "[X]".red());
pub static WARN: LazyLock<ColoredString> = LazyLock::new(|| "[!]".yellow());
pub static CTRL_C: LazyLock<ColoredString> = LazyLock::new(|| "Ctrl+C".yellow());
