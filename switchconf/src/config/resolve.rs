//! Expansion of the short-hand port declarations into concrete memberships.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use log::debug;
use secrecy::SecretString;

use super::model::{PortConfig, PortType, ResolvedConfig, SwitchConfig, Vlans};
use super::raw::{RawConfig, RawPort, RawSwitch, RawVlan};
use crate::error::ConfigError;

/// Highest usable 802.1Q VLAN ID.
pub const MAX_VLAN_ID: u32 = 4094;

/// Resolve a parsed configuration.
pub fn resolve(raw: RawConfig) -> Result<ResolvedConfig, ConfigError> {
    let vlans = resolve_vlans(&raw.vlans)?;

    // The global default must exist even if every switch overrides it.
    vlans.id_of(&raw.default_vlan)?;

    let mut switches = IndexMap::with_capacity(raw.switches.len());
    for (name, switch) in raw.switches {
        let resolved = resolve_switch(&name, switch, &vlans, &raw.default_vlan).map_err(
            |source| ConfigError::Switch {
                switch: name.clone(),
                source: Box::new(source),
            },
        )?;
        switches.insert(name, resolved);
    }

    Ok(ResolvedConfig {
        vlans,
        default_vlan: raw.default_vlan,
        switches,
    })
}

/// Validate VLAN IDs and build the lookup table.
pub fn resolve_vlans(raw: &IndexMap<String, RawVlan>) -> Result<Vlans, ConfigError> {
    let mut vlans = Vlans::new();

    for (name, vlan) in raw {
        let id = u16::try_from(vlan.vlan_id)
            .ok()
            .filter(|id| (1..=MAX_VLAN_ID).contains(&u32::from(*id)))
            .ok_or_else(|| ConfigError::InvalidVlanId {
                name: name.clone(),
                id: vlan.vlan_id,
            })?;

        if let Some(existing) = vlans.by_id(id) {
            return Err(ConfigError::DuplicateVlanId {
                id,
                first: existing.name.clone(),
                second: name.clone(),
            });
        }

        vlans.insert(name.clone(), id);
    }

    Ok(vlans)
}

/// Resolve every port of one switch.
pub fn resolve_switch(
    name: &str,
    raw: RawSwitch,
    vlans: &Vlans,
    global_default_vlan: &str,
) -> Result<SwitchConfig, ConfigError> {
    let default_vlan = raw
        .default_vlan
        .unwrap_or_else(|| global_default_vlan.to_string());
    vlans.id_of(&default_vlan)?;

    let raw_ports = raw.ports.unwrap_or_default();
    let mut ports = IndexMap::with_capacity(raw_ports.len());
    for (port_name, port) in raw_ports {
        let resolved = resolve_port(&port_name, port.as_ref(), &default_vlan, vlans)?;
        debug!("{} {}: {:?}", name, port_name, resolved);
        ports.insert(port_name, resolved);
    }

    Ok(SwitchConfig {
        name: name.to_string(),
        device_type: raw.device_type,
        ip: raw.ip,
        username: raw.username,
        password: SecretString::from(raw.password),
        default_vlan,
        ports,
    })
}

/// Resolve one port declaration against the switch default VLAN.
///
/// A missing declaration (`port3:` with no body) is an untagged port in
/// the default VLAN.
pub fn resolve_port(
    port_name: &str,
    raw: Option<&RawPort>,
    switch_default_vlan: &str,
    vlans: &Vlans,
) -> Result<PortConfig, ConfigError> {
    let empty = RawPort::default();
    let raw = raw.unwrap_or(&empty);

    let port_type = match raw.kind.as_deref() {
        None => PortType::Untagged,
        Some(kind) => PortType::parse(kind).ok_or_else(|| ConfigError::UnknownPortType {
            port: port_name.to_string(),
            kind: kind.to_string(),
        })?,
    };

    match port_type {
        PortType::Trunk => Ok(PortConfig {
            port_type,
            tagged_vlan_ids: vlans.ids(),
            untagged_vlan_id: None,
            pvid: vlans.id_of(switch_default_vlan)?,
        }),
        PortType::Tagged => {
            let tagged_vlan_ids = raw
                .vlans
                .iter()
                .flatten()
                .map(|name| vlans.id_of(name))
                .collect::<Result<BTreeSet<u16>, _>>()?;

            if let Some(untagged) = &raw.vlan {
                let id = vlans.id_of(untagged)?;
                return Ok(PortConfig {
                    port_type,
                    tagged_vlan_ids,
                    untagged_vlan_id: Some(id),
                    pvid: id,
                });
            }

            let pvid_name = raw.pvid.as_deref().unwrap_or(switch_default_vlan);
            let pvid = vlans.id_of(pvid_name)?;
            if !tagged_vlan_ids.contains(&pvid) {
                return Err(ConfigError::PvidNotTagged {
                    port: port_name.to_string(),
                    vlan: pvid_name.to_string(),
                    id: pvid,
                });
            }

            Ok(PortConfig {
                port_type,
                tagged_vlan_ids,
                untagged_vlan_id: None,
                pvid,
            })
        }
        PortType::Untagged => {
            let vlan_name = raw.vlan.as_deref().unwrap_or(switch_default_vlan);
            let id = vlans.id_of(vlan_name)?;
            Ok(PortConfig {
                port_type,
                tagged_vlan_ids: BTreeSet::new(),
                untagged_vlan_id: Some(id),
                pvid: id,
            })
        }
    }
}
