//! Device-control collaborator
//!
//! The rest of the crate talks to devices through the [`DeviceControl`] trait;
//! [`AdbClient`] is the production implementation speaking the adb server's
//! smart-socket protocol over TCP. Wire framing and output parsing live in
//! [`protocol`] so they stay testable without a device.

pub mod client;
pub mod protocol;

pub use client::AdbClient;

use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;

/// Package identifier, unique within one device's inventory
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageId(String);

impl PackageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PackageId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Connection state as reported by `host:devices-l`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceState {
    Device,
    Offline,
    Unauthorized,
    Other(String),
}

impl DeviceState {
    pub fn parse(state: &str) -> Self {
        match state {
            "device" => DeviceState::Device,
            "offline" => DeviceState::Offline,
            "unauthorized" => DeviceState::Unauthorized,
            other => DeviceState::Other(other.to_string()),
        }
    }

    /// Offline devices cannot accept transport connections
    pub fn is_online(&self) -> bool {
        !matches!(self, DeviceState::Offline)
    }
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceState::Device => f.write_str("device"),
            DeviceState::Offline => f.write_str("offline"),
            DeviceState::Unauthorized => f.write_str("unauthorized"),
            DeviceState::Other(s) => f.write_str(s),
        }
    }
}

/// One row from the device listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub serial: String,
    pub state: DeviceState,
}

/// Abstract contract over the device-control daemon
#[async_trait]
pub trait DeviceControl: Send + Sync {
    /// Enumerate known devices, online or not
    async fn list_devices(&self) -> Result<Vec<DeviceInfo>>;

    /// Read the device's system property map
    async fn device_properties(&self, serial: &str) -> Result<HashMap<String, String>>;

    /// List installed package identifiers
    async fn list_packages(&self, serial: &str) -> Result<Vec<PackageId>>;

    /// Uninstall one package; `Ok(false)` means the package manager refused
    /// (system package, already gone), which callers record but do not retry.
    async fn remove_package(&self, serial: &str, package: &PackageId) -> Result<bool>;
}
