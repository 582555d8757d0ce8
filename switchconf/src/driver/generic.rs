//! Generic driver implementation that works with any Easy Smart platform.

use log::{debug, info, warn};
use secrecy::ExposeSecret;

use super::plan::{self, Change};
use super::{DeploySummary, Driver};
use crate::config::{SwitchConfig, Vlans};
use crate::error::{DriverError, Result};
use crate::page::VlanTable;
use crate::platform::PlatformDefinition;
use crate::transport::{Credentials, HttpTransport, Transport};

/// Generic driver that works with any platform definition.
///
/// This is the main driver implementation that handles:
/// - Web session login and the post-login probe
/// - Reading the live 802.1Q table
/// - Sending VLAN, PVID and delete requests
///
/// Models differ only by their [`PlatformDefinition`] (port count, VLAN
/// cap, page paths).
pub struct GenericDriver<T = HttpTransport> {
    /// Switch name, for messages.
    name: String,

    /// Platform definition.
    platform: PlatformDefinition,

    /// Login credentials.
    credentials: Credentials,

    /// Request channel to the device.
    transport: T,

    /// Set once login has been confirmed.
    logged_in: bool,
}

impl<T: Transport> GenericDriver<T> {
    /// Create a new generic driver. No request is sent until `open()`.
    pub fn new(
        name: impl Into<String>,
        platform: PlatformDefinition,
        credentials: Credentials,
        transport: T,
    ) -> Self {
        Self {
            name: name.into(),
            platform,
            credentials,
            transport,
            logged_in: false,
        }
    }

    /// Switch name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get a reference to the platform definition.
    pub fn platform(&self) -> &PlatformDefinition {
        &self.platform
    }

    /// Get a reference to the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn ensure_open(&self) -> Result<()> {
        if self.logged_in {
            Ok(())
        } else {
            Err(DriverError::NotConnected.into())
        }
    }

    fn check_capacity(&self, vlans: &Vlans) -> Result<()> {
        if vlans.len() > self.platform.max_vlans {
            return Err(DriverError::TooManyVlans {
                switch: self.name.clone(),
                count: vlans.len(),
                max: self.platform.max_vlans,
            }
            .into());
        }
        Ok(())
    }

    fn warn_unmapped_ports(&self, switch: &SwitchConfig) {
        for port in plan::unmapped_ports(&self.platform, switch) {
            warn!(
                "Switch {} - port '{}' is not a physical port of {} (port1-port{}), ignoring",
                self.name, port, self.platform.model, self.platform.num_ports
            );
        }
    }

    /// Path and parameters of the request carrying a change.
    fn request(&self, change: &Change) -> (&str, Vec<(String, String)>) {
        let web = &self.platform.web;
        match change {
            Change::Enable8021Q => (
                web.vlan_set_path.as_str(),
                vec![param("qvlan_en", 1), param("qvlan_mode", "Apply")],
            ),
            Change::SetVlan { id, name, members } => {
                let mut params = vec![param("vid", id), param("vname", name)];
                for (port, member) in self.platform.ports().zip(members) {
                    params.push(param(&format!("selType_{}", port), member.code()));
                }
                params.push(param("qvlan_add", "Add/Modify"));
                (web.vlan_set_path.as_str(), params)
            }
            Change::SetPvid { port, pvid } => (
                web.pvid_set_path.as_str(),
                vec![
                    param("pbm", plan::port_bitmask(*port)),
                    param("pvid", pvid),
                ],
            ),
            Change::DeleteVlan { id } => (
                web.vlan_set_path.as_str(),
                vec![param("selVlans", id), param("qvlan_del", "Delete")],
            ),
        }
    }

    /// Send the request for one change.
    async fn apply(&self, change: &Change) -> Result<()> {
        info!("Switch {} - {}...", self.name, change);
        let (path, params) = self.request(change);
        self.transport.get(path, &params).await?;
        Ok(())
    }

    async fn fetch_vlan_table(&self) -> Result<VlanTable> {
        let web = &self.platform.web;
        let page = self.transport.get(&web.vlan_page, &[]).await?;
        let table = VlanTable::from_page(&page, &web.vlan_table_var)?;
        debug!(
            "Switch {} - 802.1q {}, live VLANs {:?}",
            self.name,
            if table.enabled { "enabled" } else { "disabled" },
            table.vlan_ids
        );
        Ok(table)
    }

    /// Delete every live VLAN that is not declared.
    async fn remove_stale_vlans(&self, vlans: &Vlans) -> Result<Vec<u16>> {
        let table = self.fetch_vlan_table().await?;
        let mut removed = Vec::new();
        for change in plan::cleanup(&table, vlans) {
            self.apply(&change).await?;
            if let Change::DeleteVlan { id } = change {
                removed.push(id);
            }
        }
        Ok(removed)
    }
}

fn param(name: &str, value: impl ToString) -> (String, String) {
    (name.to_string(), value.to_string())
}

impl<T: Transport> Driver for GenericDriver<T> {
    async fn open(&mut self) -> Result<()> {
        let web = &self.platform.web;
        let form = [
            param("username", &self.credentials.username),
            param("password", self.credentials.password.expose_secret()),
            param("cpassword", ""),
            param("logon", "Login"),
        ];
        self.transport.post_form(&web.login_path, &form).await?;

        let probe = self.transport.get(&web.probe_path, &[]).await?;
        if !probe.contains(&web.probe_marker) {
            return Err(DriverError::AuthenticationFailed {
                host: self.transport.host().to_string(),
                user: self.credentials.username.clone(),
            }
            .into());
        }

        info!(
            "Switch {} - logged in to {} ({})",
            self.name,
            self.transport.host(),
            self.platform.model
        );
        self.logged_in = true;
        Ok(())
    }

    async fn vlan_table(&mut self) -> Result<VlanTable> {
        self.ensure_open()?;
        self.fetch_vlan_table().await
    }

    async fn plan(&mut self, switch: &SwitchConfig, vlans: &Vlans) -> Result<Vec<Change>> {
        self.ensure_open()?;
        self.check_capacity(vlans)?;
        self.warn_unmapped_ports(switch);

        let table = self.fetch_vlan_table().await?;
        Ok(plan::plan(&self.platform, &table, switch, vlans))
    }

    async fn deploy(&mut self, switch: &SwitchConfig, vlans: &Vlans) -> Result<DeploySummary> {
        self.ensure_open()?;
        self.check_capacity(vlans)?;
        self.warn_unmapped_ports(switch);

        let table = self.fetch_vlan_table().await?;

        let mut summary = DeploySummary::default();
        for change in plan::converge(&self.platform, &table, switch, vlans) {
            self.apply(&change).await?;
            summary.record(&change);
        }

        summary.vlans_removed =
            self.remove_stale_vlans(vlans)
                .await
                .map_err(|source| DriverError::VlanCleanupFailed {
                    switch: self.name.clone(),
                    source: Box::new(source),
                })?;

        Ok(summary)
    }

    fn is_open(&self) -> bool {
        self.logged_in
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{self, ResolvedConfig};
    use crate::error::{Error, PageError, TransportError};
    use crate::platform::vendors::tplink;
    use crate::transport::mock::MockTransport;

    const SYSTEM_INFO: &str = r#"<script>
var info_ds = {
descriStr:["TL-SG105E"],
firmwareStr:["1.0.0 Build 20160715 Rel.38605"]
};
</script>"#;

    const LOGIN_PAGE: &str = r#"<form action="logon.cgi" method="post"></form>"#;

    const CONFIG: &str = r#"
vlans:
  office:
    vlan-id: 10
  iot:
    vlan-id: 20
default-vlan: office
switches:
  desk:
    type: tlsg105e
    ip: 192.0.2.10
    username: admin
    password: secret
    ports:
      port1:
        type: trunk
      port2:
        type: tagged
        vlans: [iot]
        vlan: office
      port3:
"#;

    fn vlan_page(state: u8, vids: &[u16]) -> String {
        let vids: Vec<String> = vids.iter().map(u16::to_string).collect();
        format!(
            "<script>\nvar qvlan_ds = {{\nstate:{},\nportNum:5,\nvids:[{}],\ncount:{}\n}};\n</script>",
            state,
            vids.join(","),
            vids.len()
        )
    }

    fn driver(transport: MockTransport) -> GenericDriver<MockTransport> {
        GenericDriver::new(
            "desk",
            tplink::easy_smart("tlsg105e", "TL-SG105E", 5),
            Credentials {
                username: "admin".to_string(),
                password: "secret".into(),
            },
            transport,
        )
    }

    fn config() -> ResolvedConfig {
        config::from_str(CONFIG).unwrap()
    }

    #[tokio::test]
    async fn test_open_logs_in() {
        let mut driver = driver(MockTransport::new().page("SystemInfoRpm.htm", SYSTEM_INFO));
        driver.open().await.unwrap();
        assert!(driver.is_open());

        let requests = driver.transport().requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].path, "logon.cgi");
        assert_eq!(requests[0].param("username"), Some("admin"));
        assert_eq!(requests[0].param("password"), Some("secret"));
        assert_eq!(requests[0].param("cpassword"), Some(""));
        assert_eq!(requests[0].param("logon"), Some("Login"));
        assert_eq!(requests[1].path, "SystemInfoRpm.htm");
    }

    #[tokio::test]
    async fn test_open_rejects_missing_probe_marker() {
        let mut driver = driver(MockTransport::new().page("SystemInfoRpm.htm", LOGIN_PAGE));
        let err = driver.open().await.unwrap_err();

        assert!(matches!(
            err,
            Error::Driver(DriverError::AuthenticationFailed { ref user, .. }) if user == "admin"
        ));
        assert!(!driver.is_open());
    }

    #[tokio::test]
    async fn test_deploy_requires_open() {
        let config = config();
        let mut driver = driver(MockTransport::new());

        let err = driver
            .deploy(&config.switches["desk"], &config.vlans)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Driver(DriverError::NotConnected)));
        assert!(driver.transport().requests().is_empty());
    }

    #[tokio::test]
    async fn test_deploy_removes_only_undeclared_vlan() {
        let config = config();
        let transport = MockTransport::new()
            .page("SystemInfoRpm.htm", SYSTEM_INFO)
            .page("Vlan8021QRpm.htm", vlan_page(1, &[10, 20, 99]));
        let mut driver = driver(transport);
        driver.open().await.unwrap();

        let summary = driver
            .deploy(&config.switches["desk"], &config.vlans)
            .await
            .unwrap();

        assert!(!summary.enabled_8021q);
        assert_eq!(summary.vlans_configured, [10, 20]);
        assert_eq!(summary.pvids_set, 5);
        assert_eq!(summary.vlans_removed, [99]);

        let deletes: Vec<_> = driver
            .transport()
            .requests_to("qvlanSet.cgi")
            .into_iter()
            .filter(|r| r.param("qvlan_del").is_some())
            .collect();
        assert_eq!(deletes.len(), 1);
        assert_eq!(deletes[0].param("selVlans"), Some("99"));
        assert_eq!(deletes[0].param("qvlan_del"), Some("Delete"));
    }

    #[tokio::test]
    async fn test_deploy_request_contents() {
        let config = config();
        let transport = MockTransport::new()
            .page("SystemInfoRpm.htm", SYSTEM_INFO)
            .page("Vlan8021QRpm.htm", vlan_page(1, &[10, 20]));
        let mut driver = driver(transport);
        driver.open().await.unwrap();
        driver
            .deploy(&config.switches["desk"], &config.vlans)
            .await
            .unwrap();

        let transport = driver.transport();
        let adds = transport.requests_to("qvlanSet.cgi");
        assert_eq!(adds.len(), 2);

        let office = &adds[0];
        assert_eq!(office.param("vid"), Some("10"));
        assert_eq!(office.param("vname"), Some("office"));
        assert_eq!(office.param("qvlan_add"), Some("Add/Modify"));
        // trunk, untagged override, untagged default, absent, absent
        let codes: Vec<_> = (1..=5)
            .map(|p| office.param(&format!("selType_{}", p)).unwrap().to_string())
            .collect();
        assert_eq!(codes, ["1", "0", "0", "2", "2"]);

        let iot = &adds[1];
        assert_eq!(iot.param("vid"), Some("20"));
        let codes: Vec<_> = (1..=5)
            .map(|p| iot.param(&format!("selType_{}", p)).unwrap().to_string())
            .collect();
        assert_eq!(codes, ["1", "1", "2", "2", "2"]);

        let pvids = transport.requests_to("vlanPvidSet.cgi");
        let pairs: Vec<(&str, &str)> = pvids
            .iter()
            .map(|r| (r.param("pbm").unwrap(), r.param("pvid").unwrap()))
            .collect();
        assert_eq!(
            pairs,
            [("1", "10"), ("2", "10"), ("4", "10"), ("8", "1"), ("16", "1")]
        );
    }

    #[tokio::test]
    async fn test_deploy_enables_8021q_first() {
        let config = config();
        let transport = MockTransport::new()
            .page("SystemInfoRpm.htm", SYSTEM_INFO)
            .page("Vlan8021QRpm.htm", vlan_page(0, &[]))
            .page("Vlan8021QRpm.htm", vlan_page(1, &[10, 20]));
        let mut driver = driver(transport);
        driver.open().await.unwrap();

        let summary = driver
            .deploy(&config.switches["desk"], &config.vlans)
            .await
            .unwrap();
        assert!(summary.enabled_8021q);
        assert!(summary.vlans_removed.is_empty());

        let sets = driver.transport().requests_to("qvlanSet.cgi");
        assert_eq!(sets[0].param("qvlan_en"), Some("1"));
        assert_eq!(sets[0].param("qvlan_mode"), Some("Apply"));
        assert_eq!(sets[1].param("vid"), Some("10"));
    }

    #[tokio::test]
    async fn test_cleanup_failure_is_wrapped() {
        let config = config();
        let transport = MockTransport::new()
            .page("SystemInfoRpm.htm", SYSTEM_INFO)
            .page("Vlan8021QRpm.htm", vlan_page(1, &[10, 20, 99]))
            .page("Vlan8021QRpm.htm", "<html>session timeout</html>");
        let mut driver = driver(transport);
        driver.open().await.unwrap();

        let err = driver
            .deploy(&config.switches["desk"], &config.vlans)
            .await
            .unwrap_err();

        match err {
            Error::Driver(DriverError::VlanCleanupFailed { switch, source }) => {
                assert_eq!(switch, "desk");
                assert!(matches!(
                    *source,
                    Error::Page(PageError::MarkerNotFound { .. })
                ));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_http_failure_aborts_deploy() {
        let config = config();
        let transport = MockTransport::new()
            .page("SystemInfoRpm.htm", SYSTEM_INFO)
            .page("Vlan8021QRpm.htm", vlan_page(1, &[10, 20, 99]))
            .failing("vlanPvidSet.cgi");
        let mut driver = driver(transport);
        driver.open().await.unwrap();

        let err = driver
            .deploy(&config.switches["desk"], &config.vlans)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Transport(TransportError::Status { status: 500, .. })
        ));

        let transport = driver.transport();
        assert_eq!(transport.requests_to("vlanPvidSet.cgi").len(), 1);
        assert!(
            transport
                .requests_to("qvlanSet.cgi")
                .iter()
                .all(|r| r.param("qvlan_del").is_none())
        );
    }

    #[tokio::test]
    async fn test_too_many_vlans() {
        let config = config();
        let mut vlans = config::Vlans::new();
        for id in 1..=32 {
            vlans.insert(format!("v{}", id), id);
        }

        let mut driver = driver(MockTransport::new().page("SystemInfoRpm.htm", SYSTEM_INFO));
        driver.open().await.unwrap();

        let err = driver
            .deploy(&config.switches["desk"], &vlans)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Driver(DriverError::TooManyVlans { count: 32, max: 31, .. })
        ));
        assert_eq!(driver.transport().requests().len(), 2);
    }

    #[tokio::test]
    async fn test_plan_sends_no_changes() {
        let config = config();
        let transport = MockTransport::new()
            .page("SystemInfoRpm.htm", SYSTEM_INFO)
            .page("Vlan8021QRpm.htm", vlan_page(1, &[10, 20, 99]));
        let mut driver = driver(transport);
        driver.open().await.unwrap();

        let changes = driver
            .plan(&config.switches["desk"], &config.vlans)
            .await
            .unwrap();
        assert_eq!(changes.len(), 2 + 5 + 1);
        assert_eq!(changes.last(), Some(&Change::DeleteVlan { id: 99 }));

        let paths: Vec<String> = driver
            .transport()
            .requests()
            .into_iter()
            .map(|r| r.path)
            .collect();
        assert_eq!(paths, ["logon.cgi", "SystemInfoRpm.htm", "Vlan8021QRpm.htm"]);
    }
}
