//! Builder for creating switch drivers.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use super::generic::GenericDriver;
use crate::config::SwitchConfig;
use crate::error::{DriverError, Result};
use crate::platform::{PlatformDefinition, PlatformRegistry};
use crate::transport::{Credentials, HttpConfig, HttpTransport, Transport};

/// Builder for constructing switch drivers.
///
/// # Example
///
/// ```rust,no_run
/// use switchconf::driver::{Driver, DriverBuilder};
///
/// # async fn example() -> Result<(), switchconf::Error> {
/// let mut driver = DriverBuilder::new("192.168.0.1")
///     .username("admin")
///     .password("secret")
///     .platform("tlsg108e")
///     .build()?;
///
/// driver.open().await?;
/// let table = driver.vlan_table().await?;
/// println!("{:?}", table.vlan_ids);
/// # Ok(())
/// # }
/// ```
pub struct DriverBuilder {
    host: String,
    name: Option<String>,
    username: Option<String>,
    password: Option<SecretString>,
    platform_name: Option<String>,
    custom_platform: Option<PlatformDefinition>,
    timeout: Option<Duration>,
}

impl DriverBuilder {
    /// Create a new driver builder for the specified host.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            name: None,
            username: None,
            password: None,
            platform_name: None,
            custom_platform: None,
            timeout: None,
        }
    }

    /// Create a builder from a resolved switch entry.
    pub fn for_switch(switch: &SwitchConfig) -> Self {
        Self::new(&switch.ip)
            .name(&switch.name)
            .username(&switch.username)
            .password(switch.password.expose_secret())
            .platform(&switch.device_type)
    }

    /// Set the switch name used in messages (default: the host).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the username for the web login.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the password for the web login.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(SecretString::from(password.into()));
        self
    }

    /// Set the platform by device type (e.g., "tlsg105e").
    pub fn platform(mut self, platform: impl Into<String>) -> Self {
        self.platform_name = Some(platform.into());
        self
    }

    /// Set a custom platform definition.
    pub fn custom_platform(mut self, platform: PlatformDefinition) -> Self {
        self.custom_platform = Some(platform);
        self
    }

    /// Set a per-request timeout (default: the HTTP client's).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the driver over HTTP.
    ///
    /// This creates the driver but does not log in. Call `open()` on the
    /// returned driver to establish the session.
    pub fn build(self) -> Result<GenericDriver> {
        let config = HttpConfig {
            host: self.host.clone(),
            timeout: self.timeout,
        };
        let transport = HttpTransport::new(config)?;
        self.build_with_transport(transport)
    }

    /// Build the driver over a caller-supplied transport.
    pub fn build_with_transport<T: Transport>(self, transport: T) -> Result<GenericDriver<T>> {
        let username = self.username.ok_or_else(|| DriverError::InvalidConfig {
            message: "Username is required".to_string(),
        })?;
        let password = self.password.ok_or_else(|| DriverError::InvalidConfig {
            message: "Password is required".to_string(),
        })?;

        let platform = if let Some(custom) = self.custom_platform {
            custom
        } else if let Some(name) = self.platform_name {
            PlatformRegistry::lookup(&name)?
        } else {
            return Err(DriverError::InvalidConfig {
                message: "Platform must be specified".to_string(),
            }
            .into());
        };

        let name = self.name.unwrap_or(self.host);
        Ok(GenericDriver::new(
            name,
            platform,
            Credentials { username, password },
            transport,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::Driver;
    use crate::error::{Error, PlatformError};
    use crate::platform::vendors::tplink;
    use crate::transport::mock::MockTransport;

    #[test]
    fn test_build_from_registry() {
        let driver = DriverBuilder::new("192.0.2.10")
            .username("admin")
            .password("secret")
            .platform("TLSG105E")
            .build_with_transport(MockTransport::new())
            .unwrap();

        assert_eq!(driver.name(), "192.0.2.10");
        assert_eq!(driver.platform().num_ports, 5);
        assert!(!driver.is_open());
    }

    #[test]
    fn test_build_custom_platform() {
        let driver = DriverBuilder::new("192.0.2.10")
            .name("rack")
            .username("admin")
            .password("secret")
            .custom_platform(tplink::easy_smart("tlsg116e", "TL-SG116E", 16))
            .build_with_transport(MockTransport::new())
            .unwrap();

        assert_eq!(driver.name(), "rack");
        assert_eq!(driver.platform().num_ports, 16);
    }

    #[test]
    fn test_build_http_transport() {
        let driver = DriverBuilder::new("192.0.2.10")
            .username("admin")
            .password("secret")
            .platform("tlsg108e")
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();

        assert_eq!(driver.transport().config().host, "192.0.2.10");
        assert_eq!(driver.transport().config().timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_unsupported_device_type() {
        let result = DriverBuilder::new("192.0.2.10")
            .username("admin")
            .password("secret")
            .platform("dgs-1100")
            .build_with_transport(MockTransport::new());

        assert!(matches!(
            result,
            Err(Error::Platform(PlatformError::UnsupportedDeviceType { .. }))
        ));
    }

    #[test]
    fn test_missing_fields() {
        let result = DriverBuilder::new("192.0.2.10")
            .password("secret")
            .platform("tlsg108e")
            .build_with_transport(MockTransport::new());
        assert!(matches!(
            result,
            Err(Error::Driver(DriverError::InvalidConfig { .. }))
        ));

        let result = DriverBuilder::new("192.0.2.10")
            .username("admin")
            .password("secret")
            .build_with_transport(MockTransport::new());
        assert!(matches!(
            result,
            Err(Error::Driver(DriverError::InvalidConfig { .. }))
        ));
    }
}
