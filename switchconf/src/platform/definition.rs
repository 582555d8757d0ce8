//! Platform definition for device-specific capabilities.

/// Where a web-managed switch exposes its login, status and VLAN pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebInterface {
    /// Login form target (POST).
    pub login_path: String,

    /// Page fetched after login to confirm the session.
    pub probe_path: String,

    /// Text the probe page contains only when logged in.
    pub probe_marker: String,

    /// 802.1Q VLAN overview page.
    pub vlan_page: String,

    /// Script variable on the overview page holding the VLAN table.
    pub vlan_table_var: String,

    /// CGI for enabling 802.1Q and adding, modifying or deleting VLANs.
    pub vlan_set_path: String,

    /// CGI for setting port PVIDs.
    pub pvid_set_path: String,
}

/// Platform definition containing all device-specific configuration.
///
/// Models of one family share a single driver; they differ only in the
/// values held here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformDefinition {
    /// Device type identifier (e.g., "tlsg108e"), always lowercase.
    pub name: String,

    /// Human readable model name.
    pub model: String,

    /// Number of physical ports, numbered 1..=num_ports.
    pub num_ports: usize,

    /// Maximum number of 802.1Q VLANs the device accepts.
    pub max_vlans: usize,

    /// Web interface layout.
    pub web: WebInterface,
}

impl PlatformDefinition {
    /// Create a new platform definition.
    pub fn new(name: impl Into<String>, web: WebInterface) -> Self {
        let name = name.into().to_ascii_lowercase();
        Self {
            model: name.clone(),
            name,
            num_ports: 8,
            max_vlans: 32,
            web,
        }
    }

    /// Set the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the physical port count.
    pub fn with_ports(mut self, num_ports: usize) -> Self {
        self.num_ports = num_ports;
        self
    }

    /// Set the VLAN cap.
    pub fn with_max_vlans(mut self, max_vlans: usize) -> Self {
        self.max_vlans = max_vlans;
        self
    }

    /// Physical port numbers, in order.
    pub fn ports(&self) -> impl Iterator<Item = usize> {
        1..=self.num_ports
    }
}
