//! Fleet-wide connect, plan and deploy.
//!
//! Every switch is logged into before any switch is changed, so a typo in
//! one switch's address or password stops the run before the first
//! request that mutates anything. Switches are then handled one at a time
//! in configuration order; the first failure stops the run.

use std::time::Duration;

use log::info;

use crate::config::{ResolvedConfig, SwitchConfig};
use crate::driver::{Change, DeploySummary, Driver, DriverBuilder, GenericDriver};
use crate::error::{DriverError, Operation, Result};

/// A logged-in driver for one named switch.
pub struct Session<D = GenericDriver> {
    pub switch: String,
    pub driver: D,
}

/// Log into every switch of the configuration over HTTP.
pub async fn connect(
    config: &ResolvedConfig,
    timeout: Option<Duration>,
) -> Result<Vec<Session>> {
    connect_with(config, |switch| {
        let mut builder = DriverBuilder::for_switch(switch);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    })
    .await
}

/// Log into every switch, creating drivers with `make`.
pub async fn connect_with<D, F>(config: &ResolvedConfig, mut make: F) -> Result<Vec<Session<D>>>
where
    D: Driver,
    F: FnMut(&SwitchConfig) -> Result<D>,
{
    let mut sessions = Vec::with_capacity(config.switches.len());
    for (name, switch) in &config.switches {
        info!("Connecting to switch {} ({})", name, switch.ip);
        let mut driver = make(switch).map_err(|e| e.in_switch(name, Operation::Connect))?;
        driver
            .open()
            .await
            .map_err(|e| e.in_switch(name, Operation::Connect))?;
        sessions.push(Session {
            switch: name.clone(),
            driver,
        });
    }
    Ok(sessions)
}

fn switch_config<'a>(config: &'a ResolvedConfig, name: &str) -> Result<&'a SwitchConfig> {
    config.switches.get(name).ok_or_else(|| {
        DriverError::InvalidConfig {
            message: format!("Switch '{}' is not in the configuration", name),
        }
        .into()
    })
}

/// Converge every connected switch, in order.
pub async fn deploy<D: Driver>(
    config: &ResolvedConfig,
    sessions: &mut [Session<D>],
) -> Result<Vec<(String, DeploySummary)>> {
    let mut summaries = Vec::with_capacity(sessions.len());
    for session in sessions.iter_mut() {
        let name = session.switch.as_str();
        let switch =
            switch_config(config, name).map_err(|e| e.in_switch(name, Operation::Deploy))?;

        info!("Deploying VLAN configuration to switch {}", name);
        let summary = session
            .driver
            .deploy(switch, &config.vlans)
            .await
            .map_err(|e| e.in_switch(name, Operation::Deploy))?;
        info!("Switch {} - done: {}", name, summary);

        summaries.push((name.to_string(), summary));
    }
    Ok(summaries)
}

/// Compute the pending changes of every connected switch.
pub async fn plan<D: Driver>(
    config: &ResolvedConfig,
    sessions: &mut [Session<D>],
) -> Result<Vec<(String, Vec<Change>)>> {
    let mut plans = Vec::with_capacity(sessions.len());
    for session in sessions.iter_mut() {
        let name = session.switch.as_str();
        let switch = switch_config(config, name).map_err(|e| e.in_switch(name, Operation::Plan))?;

        let changes = session
            .driver
            .plan(switch, &config.vlans)
            .await
            .map_err(|e| e.in_switch(name, Operation::Plan))?;
        plans.push((name.to_string(), changes));
    }
    Ok(plans)
}
