//! Declarative VLAN configuration.
//!
//! The configuration file names VLANs, a default VLAN and, for every switch,
//! the role of each port:
//!
//! ```yaml
//! vlans:
//!   office:
//!     vlan-id: 10
//!   iot:
//!     vlan-id: 20
//! default-vlan: office
//! switches:
//!   desk:
//!     type: TLSG108E
//!     ip: 192.0.2.10
//!     username: admin
//!     password: secret
//!     ports:
//!       port1:
//!         type: trunk
//!       port2:
//!         type: tagged
//!         vlans: [iot]
//!         vlan: office
//!       port3:
//! ```
//!
//! Loading parses the file and resolves every port into concrete tagged,
//! untagged and PVID values (see [`PortConfig`]).

mod model;
pub mod raw;
mod resolve;

pub use model::{PortConfig, PortType, ResolvedConfig, SwitchConfig, Vlan, Vlans};
pub use resolve::{MAX_VLAN_ID, resolve, resolve_port, resolve_switch, resolve_vlans};

use std::path::Path;

use log::info;

use crate::error::ConfigError;
use raw::RawConfig;

/// Read, parse and resolve a configuration file.
pub fn load(path: impl AsRef<Path>) -> Result<ResolvedConfig, ConfigError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let config = from_str(&contents)?;
    info!(
        "Loaded {} VLANs and {} switches from {}",
        config.vlans.len(),
        config.switches.len(),
        path.display()
    );
    Ok(config)
}

/// Parse and resolve a configuration document.
pub fn from_str(contents: &str) -> Result<ResolvedConfig, ConfigError> {
    let raw: RawConfig = serde_yaml::from_str(contents)?;
    resolve(raw)
}
