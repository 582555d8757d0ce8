//! Global platform registry for looking up platform definitions.

use std::collections::HashMap;
use std::sync::RwLock;

use once_cell::sync::Lazy;

use super::definition::PlatformDefinition;
use super::vendors;
use crate::error::{PlatformError, Result};

/// Global platform registry.
static REGISTRY: Lazy<RwLock<PlatformRegistry>> = Lazy::new(|| {
    let mut registry = PlatformRegistry::new();
    registry.register_builtin_platforms();
    RwLock::new(registry)
});

/// Registry for platform definitions, keyed by lowercase device type.
#[derive(Debug, Default)]
pub struct PlatformRegistry {
    platforms: HashMap<String, PlatformDefinition>,
}

impl PlatformRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            platforms: HashMap::new(),
        }
    }

    /// Get the global registry.
    pub fn global() -> &'static RwLock<PlatformRegistry> {
        &REGISTRY
    }

    /// Look up a device type in the global registry.
    pub fn lookup(device_type: &str) -> Result<PlatformDefinition> {
        let registry = REGISTRY.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        registry
            .get(device_type)
            .cloned()
            .ok_or_else(|| {
                PlatformError::UnsupportedDeviceType {
                    name: device_type.to_string(),
                }
                .into()
            })
    }

    /// Register built-in platforms.
    fn register_builtin_platforms(&mut self) {
        for platform in vendors::tplink::platforms() {
            self.platforms.insert(platform.name.clone(), platform);
        }
    }

    /// Register a platform definition.
    pub fn register(&mut self, platform: PlatformDefinition) -> Result<()> {
        if self.platforms.contains_key(&platform.name) {
            return Err(PlatformError::AlreadyRegistered {
                name: platform.name.clone(),
            }
            .into());
        }
        self.platforms.insert(platform.name.clone(), platform);
        Ok(())
    }

    /// Get a platform by device type, ignoring case.
    pub fn get(&self, name: &str) -> Option<&PlatformDefinition> {
        self.platforms.get(&name.to_ascii_lowercase())
    }

    /// Check if a platform is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// List all registered platform names.
    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.platforms.keys()
    }
}
