//! View state module.

mod model;

pub use model::{ShellSnapshot, Theme, View};
