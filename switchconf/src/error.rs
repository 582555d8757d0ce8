//! Error types for switchconf.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Main error type for switchconf operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration loading or resolution errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// HTTP transport-level errors
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Errors extracting data from device pages
    #[error("Page error: {0}")]
    Page(#[from] PageError),

    /// Driver-level errors
    #[error("Driver error: {0}")]
    Driver(#[from] DriverError),

    /// Platform/device-type errors
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    /// An error raised while working on one switch of the fleet
    #[error("Switch '{switch}': {operation} failed: {source}")]
    Switch {
        switch: String,
        operation: Operation,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Wrap this error with the switch and the operation that produced it.
    pub fn in_switch(self, switch: impl Into<String>, operation: Operation) -> Self {
        Error::Switch {
            switch: switch.into(),
            operation,
            source: Box::new(self),
        }
    }

    /// Whether this error (or the error it wraps) came from the configuration.
    pub fn is_config(&self) -> bool {
        match self {
            Error::Config(_) => true,
            Error::Switch { source, .. } => source.is_config(),
            _ => false,
        }
    }
}

/// Fleet-level operation named in [`Error::Switch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Connect,
    Plan,
    Deploy,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Operation::Connect => "connect",
            Operation::Plan => "plan",
            Operation::Deploy => "deploy",
        };
        f.write_str(name)
    }
}

/// Configuration errors (file loading, YAML parsing, port resolution).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The config file is not valid YAML for the expected schema
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A VLAN name is referenced but never declared
    #[error("VLAN '{name}' not found")]
    UnknownVlan { name: String },

    /// A tagged port's PVID is not one of its tagged VLANs
    #[error(
        "Port {port} - PVID {vlan} (ID: {id}) is not a member of the tagged port; \
         set `pvid` explicitly or add the VLAN to this port"
    )]
    PvidNotTagged { port: String, vlan: String, id: u16 },

    /// Port type string is not untagged, tagged or trunk
    #[error("Port {port} - type '{kind}' unknown")]
    UnknownPortType { port: String, kind: String },

    /// VLAN ID outside 1..=4094
    #[error("VLAN '{name}' has invalid ID {id} (expected 1-4094)")]
    InvalidVlanId { name: String, id: u32 },

    /// Two VLAN names share one ID
    #[error("VLAN ID {id} is declared by both '{first}' and '{second}'")]
    DuplicateVlanId {
        id: u16,
        first: String,
        second: String,
    },

    /// An error resolving one switch's ports
    #[error("Switch {switch}: {source}")]
    Switch {
        switch: String,
        #[source]
        source: Box<ConfigError>,
    },
}

/// HTTP transport errors.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Failed to build the HTTP client
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request could not be completed
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The device answered with a non-success status
    #[error("Request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

/// Errors extracting embedded script variables from device pages.
#[derive(Error, Debug)]
pub enum PageError {
    /// The `name = ...;` assignment is not on the page
    #[error("Variable '{variable}' not found in page")]
    MarkerNotFound { variable: String },

    /// The assignment was found but its payload does not parse
    #[error("Variable '{variable}' has a malformed payload: {source}")]
    MalformedPayload {
        variable: String,
        #[source]
        source: json5::Error,
    },
}

/// Driver layer errors (login, deployment).
#[derive(Error, Debug)]
pub enum DriverError {
    /// Driver not logged in
    #[error("Driver not connected - call open() first")]
    NotConnected,

    /// Login did not produce the expected session
    #[error("Authentication failed for user '{user}' on {host} (login failed or firmware incompatible)")]
    AuthenticationFailed { host: String, user: String },

    /// The desired VLAN set is larger than the device supports
    #[error("Switch {switch} supports at most {max} VLANs, {count} requested")]
    TooManyVlans {
        switch: String,
        count: usize,
        max: usize,
    },

    /// Removing stale VLANs failed
    #[error("Switch {switch} - failed while removing old VLANs: {source}")]
    VlanCleanupFailed {
        switch: String,
        #[source]
        source: Box<Error>,
    },

    /// Invalid configuration in the driver builder
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

/// Platform/device-type errors.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// No platform is registered under this device type
    #[error("Unsupported device type '{name}'")]
    UnsupportedDeviceType { name: String },

    /// Platform name already registered
    #[error("Platform '{name}' is already registered")]
    AlreadyRegistered { name: String },
}

/// Result type alias using switchconf's Error.
pub type Result<T> = std::result::Result<T, Error>;
