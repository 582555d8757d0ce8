//! Resolved configuration handed to the drivers.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use secrecy::SecretString;
use serde::Serialize;

use crate::error::ConfigError;

/// A named VLAN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vlan {
    #[serde(skip)]
    pub name: String,

    #[serde(rename = "vlan-id")]
    pub id: u16,
}

/// Declared VLANs, keyed by name, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Vlans(IndexMap<String, Vlan>);

impl Vlans {
    /// Create an empty VLAN set.
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Add a VLAN, keeping declaration order.
    pub fn insert(&mut self, name: impl Into<String>, id: u16) {
        let name = name.into();
        self.0.insert(name.clone(), Vlan { name, id });
    }

    /// Look up a VLAN ID by name.
    pub fn id_of(&self, name: &str) -> Result<u16, ConfigError> {
        self.0
            .get(name)
            .map(|vlan| vlan.id)
            .ok_or_else(|| ConfigError::UnknownVlan {
                name: name.to_string(),
            })
    }

    /// Find the VLAN declared with this ID.
    pub fn by_id(&self, id: u16) -> Option<&Vlan> {
        self.0.values().find(|vlan| vlan.id == id)
    }

    /// Whether a VLAN with this ID is declared.
    pub fn contains_id(&self, id: u16) -> bool {
        self.by_id(id).is_some()
    }

    /// All VLAN IDs.
    pub fn ids(&self) -> BTreeSet<u16> {
        self.0.values().map(|vlan| vlan.id).collect()
    }

    /// Iterate VLANs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Vlan> {
        self.0.values()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// How a port participates in VLANs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PortType {
    /// A single VLAN, untagged, which is also the PVID.
    #[default]
    Untagged,

    /// Listed VLANs tagged, plus an optional untagged VLAN.
    Tagged,

    /// Every declared VLAN tagged.
    Trunk,
}

impl PortType {
    /// Parse a port type string, ignoring case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "untagged" => Some(PortType::Untagged),
            "tagged" => Some(PortType::Tagged),
            "trunk" => Some(PortType::Trunk),
            _ => None,
        }
    }
}

/// Fully resolved VLAN membership of one port.
///
/// `pvid` equals `untagged_vlan_id` when that is set, and is a member of
/// `tagged_vlan_ids` otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PortConfig {
    #[serde(rename = "type")]
    pub port_type: PortType,

    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub tagged_vlan_ids: BTreeSet<u16>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub untagged_vlan_id: Option<u16>,

    pub pvid: u16,
}

impl PortConfig {
    /// Whether this port carries the VLAN tagged.
    pub fn is_tagged(&self, vlan_id: u16) -> bool {
        self.tagged_vlan_ids.contains(&vlan_id)
    }

    /// Whether this port carries the VLAN untagged.
    pub fn is_untagged(&self, vlan_id: u16) -> bool {
        self.untagged_vlan_id == Some(vlan_id)
    }
}

/// A switch with every port resolved.
#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SwitchConfig {
    #[serde(skip)]
    pub name: String,

    /// Device type identifier, looked up in the platform registry.
    #[serde(rename = "type")]
    pub device_type: String,

    pub ip: String,

    pub username: String,

    #[serde(skip)]
    pub password: SecretString,

    /// Effective default VLAN name for this switch.
    pub default_vlan: String,

    pub ports: IndexMap<String, PortConfig>,
}

/// The whole resolved configuration.
#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ResolvedConfig {
    pub vlans: Vlans,

    pub default_vlan: String,

    pub switches: IndexMap<String, SwitchConfig>,
}

impl ResolvedConfig {
    /// Render as YAML. Passwords are never included.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}
