//! Serde view of the YAML configuration file, before resolution.
//!
//! Field names follow the file format (`vlan-id`, `default-vlan`, ...).
//! Keys that this tool does not consume, such as `description` or
//! `destination`, are accepted and ignored.

use indexmap::IndexMap;
use serde::Deserialize;

/// Top-level configuration document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RawConfig {
    /// VLANs by name, in declaration order.
    pub vlans: IndexMap<String, RawVlan>,

    /// Name of the VLAN used when a switch does not override it.
    pub default_vlan: String,

    /// Switches by name, in declaration order.
    #[serde(default)]
    pub switches: IndexMap<String, RawSwitch>,
}

/// A declared VLAN.
#[derive(Debug, Clone, Deserialize)]
pub struct RawVlan {
    #[serde(rename = "vlan-id")]
    pub vlan_id: u32,
}

/// A declared switch.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RawSwitch {
    /// Device type, looked up in the platform registry.
    #[serde(rename = "type")]
    pub device_type: String,

    /// Hostname or IP address of the web interface.
    pub ip: String,

    pub username: String,

    pub password: String,

    /// Switch-wide default VLAN name.
    #[serde(default)]
    pub default_vlan: Option<String>,

    /// Ports by name. A port declared without a body (`port3:`) is `None`.
    #[serde(default)]
    pub ports: Option<IndexMap<String, Option<RawPort>>>,
}

/// A declared port, as written in the file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPort {
    /// `untagged` (default), `tagged` or `trunk`, any case.
    #[serde(rename = "type")]
    pub kind: Option<String>,

    /// Untagged VLAN name.
    pub vlan: Option<String>,

    /// Tagged VLAN names (tagged ports only).
    pub vlans: Option<Vec<String>>,

    /// PVID override as a VLAN name (tagged ports only).
    pub pvid: Option<String>,
}
