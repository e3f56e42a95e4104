//! Settings type definitions.
//!
//! Responsibilities:
//! - Define the enumerated settings schema (`Settings`) and its defaults.
//! - Define the partial layer read from a settings source (`SettingsOverrides`).
//!
//! Does NOT handle:
//! - Loading settings sources (see `loader` module).
//! - Lazy resolution and caching (see `lazy` module).
//!
//! Invariants:
//! - Setting names are ALL-CAPS on the wire and snake_case in Rust.

mod overrides;
mod settings;

pub use overrides::{SettingsOverrides, is_setting_name};
pub use settings::{Contact, Settings};
