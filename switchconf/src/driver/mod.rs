//! High-level driver for switch interaction.
//!
//! The driver layer logs into a switch's web interface, reads its live
//! 802.1Q table and converges it to the resolved configuration.

mod builder;
mod generic;
pub mod plan;

pub use builder::DriverBuilder;
pub use generic::GenericDriver;
pub use plan::{Change, Membership};

use std::fmt;
use std::future::Future;

use crate::config::{SwitchConfig, Vlans};
use crate::error::Result;
use crate::page::VlanTable;

/// Trait for switch drivers.
pub trait Driver: Send + Sync {
    /// Log into the device.
    fn open(&mut self) -> impl Future<Output = Result<()>> + Send;

    /// Read the live 802.1Q table.
    fn vlan_table(&mut self) -> impl Future<Output = Result<VlanTable>> + Send;

    /// Compute the changes a deploy would make, without making them.
    fn plan(
        &mut self,
        switch: &SwitchConfig,
        vlans: &Vlans,
    ) -> impl Future<Output = Result<Vec<Change>>> + Send;

    /// Converge the device to the desired VLANs and port memberships.
    ///
    /// Requests are sent one at a time. A failure aborts the deploy and
    /// leaves the device with whatever was already applied.
    fn deploy(
        &mut self,
        switch: &SwitchConfig,
        vlans: &Vlans,
    ) -> impl Future<Output = Result<DeploySummary>> + Send;

    /// Check if the driver is logged in.
    fn is_open(&self) -> bool;
}

/// What a deploy changed on one switch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeploySummary {
    /// Whether 802.1Q mode had to be enabled.
    pub enabled_8021q: bool,

    /// VLAN IDs written, in order.
    pub vlans_configured: Vec<u16>,

    /// Number of ports whose PVID was written.
    pub pvids_set: usize,

    /// Stale VLAN IDs deleted.
    pub vlans_removed: Vec<u16>,
}

impl DeploySummary {
    /// Account for an applied change.
    pub fn record(&mut self, change: &Change) {
        match change {
            Change::Enable8021Q => self.enabled_8021q = true,
            Change::SetVlan { id, .. } => self.vlans_configured.push(*id),
            Change::SetPvid { .. } => self.pvids_set += 1,
            Change::DeleteVlan { id } => self.vlans_removed.push(*id),
        }
    }
}

impl fmt::Display for DeploySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} VLANs configured, {} PVIDs set, {} VLANs removed",
            self.vlans_configured.len(),
            self.pvids_set,
            self.vlans_removed.len()
        )?;
        if self.enabled_8021q {
            write!(f, " (802.1q enabled)")?;
        }
        Ok(())
    }
}
