//! Project configuration loaded from `.surelock.toml`.

pub mod settings;

pub use settings::Settings;
