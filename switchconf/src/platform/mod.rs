//! Platform definitions for multi-model support.
//!
//! A platform describes one switch model: its port count, its VLAN cap
//! and the layout of its web interface. Models are looked up by device
//! type through the [`PlatformRegistry`].

mod definition;
mod registry;
pub mod vendors;

pub use definition::{PlatformDefinition, WebInterface};
pub use registry::PlatformRegistry;
