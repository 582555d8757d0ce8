//! TP-Link Easy Smart platform definitions.
//!
//! The TL-SG105E, TL-SG108E and TL-SG108PE run the same web firmware and
//! differ only in port count. The firmware accepts at most 31 configured
//! 802.1Q VLANs.
//!
//! # Pages
//!
//! ```text
//! logon.cgi           POST username, password, cpassword, logon
//! SystemInfoRpm.htm   var info_ds = {...};   (present only when logged in)
//! Vlan8021QRpm.htm    var qvlan_ds = {state:1, vids:[...], ...};
//! qvlanSet.cgi        qvlan_en/qvlan_mode | vid/vname/selType_N/qvlan_add | selVlans/qvlan_del
//! vlanPvidSet.cgi     pbm, pvid
//! ```

use crate::platform::{PlatformDefinition, WebInterface};

/// VLANs configurable on Easy Smart switches.
pub const MAX_VLANS: usize = 31;

/// Web interface layout shared by the Easy Smart family.
pub fn web_interface() -> WebInterface {
    WebInterface {
        login_path: "logon.cgi".to_string(),
        probe_path: "SystemInfoRpm.htm".to_string(),
        probe_marker: "info_ds".to_string(),
        vlan_page: "Vlan8021QRpm.htm".to_string(),
        vlan_table_var: "qvlan_ds".to_string(),
        vlan_set_path: "qvlanSet.cgi".to_string(),
        pvid_set_path: "vlanPvidSet.cgi".to_string(),
    }
}

/// Create an Easy Smart platform definition.
pub fn easy_smart(name: &str, model: &str, num_ports: usize) -> PlatformDefinition {
    PlatformDefinition::new(name, web_interface())
        .with_model(model)
        .with_ports(num_ports)
        .with_max_vlans(MAX_VLANS)
}

/// All built-in Easy Smart models.
pub fn platforms() -> Vec<PlatformDefinition> {
    vec![
        easy_smart("tlsg105e", "TL-SG105E", 5),
        easy_smart("tlsg108e", "TL-SG108E", 8),
        easy_smart("tlsg108pe", "TL-SG108PE", 8),
    ]
}
