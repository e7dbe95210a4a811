//! tokio TCP client for the adb server
//!
//! Host queries (`host:...`) use a fresh connection each, matching how the
//! adb server drops the socket after answering. Shell services hold the
//! connection through `host:transport:<serial>` and then stream the command
//! output until EOF.

use super::protocol;
use super::{DeviceControl, DeviceInfo, PackageId};
use crate::config::ConnectionTarget;
use crate::error::{self, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

pub struct AdbClient {
    target: ConnectionTarget,
}

impl AdbClient {
    pub fn new(target: ConnectionTarget) -> Self {
        Self { target }
    }

    async fn connect(&self) -> Result<TcpStream> {
        TcpStream::connect((self.target.host, self.target.port))
            .await
            .map_err(|e| error::connect_failed(self.target.to_string(), e.to_string()))
    }

    /// Send one framed request and check the 4-byte status reply
    async fn send_request(stream: &mut TcpStream, service: &str) -> Result<()> {
        stream.write_all(&protocol::encode_request(service)).await?;
        let mut status = [0u8; 4];
        stream.read_exact(&mut status).await?;
        if &status == protocol::STATUS_OKAY {
            Ok(())
        } else if &status == protocol::STATUS_FAIL {
            let message = Self::read_block(stream).await?;
            Err(error::request_failed(message))
        } else {
            Err(error::protocol(format!(
                "unexpected status '{}'",
                String::from_utf8_lossy(&status)
            )))
        }
    }

    /// Read one hex-length-prefixed payload
    async fn read_block(stream: &mut TcpStream) -> Result<String> {
        let mut prefix = [0u8; 4];
        stream.read_exact(&mut prefix).await?;
        let len = protocol::decode_hex_length(&prefix)?;
        let mut payload = vec![0u8; len];
        stream.read_exact(&mut payload).await?;
        String::from_utf8(payload).map_err(|_| error::protocol("payload is not valid UTF-8"))
    }

    async fn host_query(&self, service: &str) -> Result<String> {
        let mut stream = self.connect().await?;
        Self::send_request(&mut stream, service).await?;
        Self::read_block(&mut stream).await
    }

    /// Run a shell command on the device and collect its output to EOF
    async fn shell(&self, serial: &str, command: &str) -> Result<String> {
        let mut stream = self.connect().await?;
        Self::send_request(&mut stream, &format!("host:transport:{serial}")).await?;
        Self::send_request(&mut stream, &format!("shell:{command}")).await?;
        let mut output = Vec::new();
        stream.read_to_end(&mut output).await?;
        Ok(String::from_utf8_lossy(&output).into_owned())
    }
}

#[async_trait]
impl DeviceControl for AdbClient {
    async fn list_devices(&self) -> Result<Vec<DeviceInfo>> {
        let payload = self.host_query("host:devices-l").await?;
        Ok(protocol::parse_device_list(&payload))
    }

    async fn device_properties(&self, serial: &str) -> Result<HashMap<String, String>> {
        let output = self.shell(serial, "getprop").await?;
        Ok(protocol::parse_properties(&output))
    }

    async fn list_packages(&self, serial: &str) -> Result<Vec<PackageId>> {
        let output = self.shell(serial, "pm list packages").await?;
        Ok(protocol::parse_package_list(&output))
    }

    async fn remove_package(&self, serial: &str, package: &PackageId) -> Result<bool> {
        let output = self
            .shell(serial, &format!("pm uninstall {}", package.as_str()))
            .await?;
        Ok(protocol::uninstall_succeeded(&output))
    }
}
