//! # Switchconf
//!
//! Declarative VLAN deployment for web-managed Easy Smart switches.
//!
//! These switches offer no CLI or API, only a web interface. Switchconf
//! reads one YAML file describing VLANs and per-port roles for a fleet of
//! switches, logs into each switch's web UI and drives the same form
//! requests a browser would.
//!
//! ## Features
//!
//! - Port roles (trunk, tagged, untagged) resolved to concrete memberships
//! - Per-model platform definitions (port count, VLAN cap, page paths)
//! - Stale VLAN removal after convergence
//! - Dry-run planning against the live device state
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use switchconf::{Driver, DriverBuilder, config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), switchconf::Error> {
//!     let config = config::load("switches.yml")?;
//!     let switch = &config.switches["desk"];
//!
//!     let mut driver = DriverBuilder::for_switch(switch).build()?;
//!     driver.open().await?;
//!
//!     let summary = driver.deploy(switch, &config.vlans).await?;
//!     println!("{}", summary);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod fleet;
pub mod page;
pub mod platform;
pub mod transport;

// Re-export main types for convenience
pub use config::{ResolvedConfig, SwitchConfig};
pub use driver::{Change, DeploySummary, Driver, DriverBuilder, GenericDriver};
pub use error::{Error, Result};
pub use platform::PlatformDefinition;
pub use transport::{HttpConfig, HttpTransport, Transport};
