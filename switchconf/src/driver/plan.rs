//! Translation of resolved port state into device changes.
//!
//! Everything here is pure: the driver fetches the live [`VlanTable`],
//! asks for the changes, and sends one request per [`Change`].

use std::fmt;

use crate::config::{PortConfig, SwitchConfig, Vlans};
use crate::page::VlanTable;
use crate::platform::PlatformDefinition;

/// Longest VLAN name the web interface accepts.
pub const MAX_VLAN_NAME_LEN: usize = 10;

/// PVID written to ports absent from the configuration.
pub const DEFAULT_PVID: u16 = 1;

/// Membership of one physical port in one VLAN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    Untagged,
    Tagged,
    NotMember,
}

impl Membership {
    /// Form value used by the VLAN add/modify request.
    pub fn code(self) -> u8 {
        match self {
            Membership::Untagged => 0,
            Membership::Tagged => 1,
            Membership::NotMember => 2,
        }
    }

    fn symbol(self) -> char {
        match self {
            Membership::Untagged => 'U',
            Membership::Tagged => 'T',
            Membership::NotMember => '-',
        }
    }
}

/// One mutation of the device's 802.1Q configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// Switch the device into 802.1Q VLAN mode.
    Enable8021Q,

    /// Create or update a VLAN with its full port membership.
    SetVlan {
        id: u16,
        name: String,
        members: Vec<Membership>,
    },

    /// Set the PVID of one physical port (1-based).
    SetPvid { port: usize, pvid: u16 },

    /// Delete a VLAN.
    DeleteVlan { id: u16 },
}

impl Change {
    /// Whether this change was derived from the live table.
    ///
    /// `SetVlan` and `SetPvid` are upserts and always sent.
    pub fn depends_on_live_state(&self) -> bool {
        matches!(self, Change::Enable8021Q | Change::DeleteVlan { .. })
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::Enable8021Q => write!(f, "Enabling 802.1q VLANs"),
            Change::SetVlan { id, name, members } => {
                let members: String = members.iter().map(|m| m.symbol()).collect();
                write!(f, "Configuring VLAN ID {} - {} [{}]", id, name, members)
            }
            Change::SetPvid { port, pvid } => {
                write!(f, "Configuring PVID on Port {} - PVID: {}", port, pvid)
            }
            Change::DeleteVlan { id } => write!(f, "Removing unused VLAN-ID: {}", id),
        }
    }
}

/// Reduce a VLAN name to what the web interface accepts.
pub fn sanitize_vlan_name(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .take(MAX_VLAN_NAME_LEN)
        .collect()
}

/// Bitmask selecting a single physical port (1-based).
pub fn port_bitmask(port: usize) -> u32 {
    1 << (port - 1)
}

/// Config name of a physical port.
pub fn port_name(port: usize) -> String {
    format!("port{}", port)
}

/// Resolved state of a physical port, if the config declares it.
pub fn physical_port(switch: &SwitchConfig, port: usize) -> Option<&PortConfig> {
    switch.ports.get(&port_name(port))
}

/// Declared ports that do not name a physical port of this platform.
pub fn unmapped_ports<'a>(platform: &PlatformDefinition, switch: &'a SwitchConfig) -> Vec<&'a str> {
    switch
        .ports
        .keys()
        .filter(|name| !platform.ports().any(|port| **name == port_name(port)))
        .map(String::as_str)
        .collect()
}

/// Membership of a port in a VLAN. Untagged wins over tagged.
pub fn membership(port: Option<&PortConfig>, vlan_id: u16) -> Membership {
    match port {
        Some(port) if port.is_untagged(vlan_id) => Membership::Untagged,
        Some(port) if port.is_tagged(vlan_id) => Membership::Tagged,
        _ => Membership::NotMember,
    }
}

/// Membership of every physical port in a VLAN, port 1 first.
pub fn membership_vector(
    platform: &PlatformDefinition,
    switch: &SwitchConfig,
    vlan_id: u16,
) -> Vec<Membership> {
    platform
        .ports()
        .map(|port| membership(physical_port(switch, port), vlan_id))
        .collect()
}

/// PVID for a physical port.
pub fn pvid_for(switch: &SwitchConfig, port: usize) -> u16 {
    physical_port(switch, port).map_or(DEFAULT_PVID, |p| p.pvid)
}

/// Changes that bring VLANs and PVIDs to the desired state.
///
/// Covers enabling 802.1Q, one `SetVlan` per declared VLAN in declaration
/// order and one `SetPvid` per physical port. Stale VLANs are handled by
/// [`cleanup`].
pub fn converge(
    platform: &PlatformDefinition,
    table: &VlanTable,
    switch: &SwitchConfig,
    vlans: &Vlans,
) -> Vec<Change> {
    let mut changes = Vec::with_capacity(1 + vlans.len() + platform.num_ports);

    if !table.enabled {
        changes.push(Change::Enable8021Q);
    }

    for vlan in vlans.iter() {
        changes.push(Change::SetVlan {
            id: vlan.id,
            name: sanitize_vlan_name(&vlan.name),
            members: membership_vector(platform, switch, vlan.id),
        });
    }

    for port in platform.ports() {
        changes.push(Change::SetPvid {
            port,
            pvid: pvid_for(switch, port),
        });
    }

    changes
}

/// Deletions for VLANs live on the device but not declared.
pub fn cleanup(table: &VlanTable, vlans: &Vlans) -> Vec<Change> {
    table
        .stale_ids(&vlans.ids())
        .into_iter()
        .map(|id| Change::DeleteVlan { id })
        .collect()
}

/// Full change list from a single view of the live table.
pub fn plan(
    platform: &PlatformDefinition,
    table: &VlanTable,
    switch: &SwitchConfig,
    vlans: &Vlans,
) -> Vec<Change> {
    let mut changes = converge(platform, table, switch, vlans);
    changes.extend(cleanup(table, vlans));
    changes
}
