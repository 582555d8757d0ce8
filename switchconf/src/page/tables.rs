//! Typed views over the tables embedded in device pages.

use std::collections::BTreeSet;

use serde::Deserialize;

use super::extract::extract_var;
use crate::error::PageError;

/// Wire shape of the 802.1Q VLAN overview variable.
///
/// Other fields (`portNum`, `names`, `tagMbrs`, ...) are ignored.
#[derive(Debug, Deserialize)]
struct QvlanDs {
    state: u8,
    #[serde(default)]
    vids: Vec<u16>,
}

/// Live 802.1Q state read from the VLAN overview page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VlanTable {
    /// Whether 802.1Q VLAN mode is enabled.
    pub enabled: bool,

    /// VLAN IDs currently defined on the device, in page order.
    pub vlan_ids: Vec<u16>,
}

impl VlanTable {
    /// Parse the VLAN overview page.
    pub fn from_page(html: &str, variable: &str) -> Result<Self, PageError> {
        let ds: QvlanDs = extract_var(html, variable)?;
        Ok(Self {
            enabled: ds.state != 0,
            vlan_ids: ds.vids,
        })
    }

    /// VLAN IDs on the device that are not in `desired`, in page order.
    pub fn stale_ids(&self, desired: &BTreeSet<u16>) -> Vec<u16> {
        self.vlan_ids
            .iter()
            .copied()
            .filter(|id| !desired.contains(id))
            .collect()
    }
}
