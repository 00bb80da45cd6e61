//! Project configuration

mod cmkop_toml;

pub use cmkop_toml::CmkopConfig;
