//! adb smart-socket wire format and shell-output parsing
//!
//! Requests are the service string prefixed with its length as four lowercase
//! hex digits. Replies start with a 4-byte status (`OKAY`/`FAIL`); `FAIL` is
//! followed by a hex-length-prefixed message, and host queries answer with a
//! hex-length-prefixed payload.

use super::{DeviceInfo, DeviceState, PackageId};
use crate::error::{self, Result};
use std::collections::HashMap;

pub const STATUS_OKAY: &[u8; 4] = b"OKAY";
pub const STATUS_FAIL: &[u8; 4] = b"FAIL";

/// Frame a service request for the wire
pub fn encode_request(service: &str) -> Vec<u8> {
    let mut frame = format!("{:04x}", service.len()).into_bytes();
    frame.extend_from_slice(service.as_bytes());
    frame
}

/// Decode a 4-digit hex length prefix
pub fn decode_hex_length(prefix: &[u8; 4]) -> Result<usize> {
    let text = std::str::from_utf8(prefix)
        .map_err(|_| error::protocol("length prefix is not valid UTF-8"))?;
    usize::from_str_radix(text, 16)
        .map_err(|_| error::protocol(format!("invalid length prefix '{text}'")))
}

/// Parse one `host:devices-l` payload into device rows
///
/// Each line is `<serial> <state> [key:value ...]`; the trailing extras
/// (product, model, transport_id) are not needed here, properties come from
/// `getprop` instead.
pub fn parse_device_list(payload: &str) -> Vec<DeviceInfo> {
    payload
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let serial = fields.next()?;
            let state = fields.next()?;
            Some(DeviceInfo {
                serial: serial.to_string(),
                state: DeviceState::parse(state),
            })
        })
        .collect()
}

/// Parse `getprop` output (`[key]: [value]` per line) into a property map
pub fn parse_properties(output: &str) -> HashMap<String, String> {
    output
        .lines()
        .filter_map(|line| {
            let (key, value) = line.split_once("]: [")?;
            let key = key.strip_prefix('[')?;
            let value = value.strip_suffix(']')?;
            Some((key.to_string(), value.to_string()))
        })
        .collect()
}

/// Parse `pm list packages` output (`package:<id>` per line)
pub fn parse_package_list(output: &str) -> Vec<PackageId> {
    output
        .lines()
        .filter_map(|line| line.strip_prefix("package:"))
        .map(|id| PackageId::new(id.trim()))
        .collect()
}

/// `pm uninstall` reports `Success` on its own line when the package is gone;
/// anything else (`Failure [...]`, permission noise) counts as failure.
pub fn uninstall_succeeded(output: &str) -> bool {
    output.lines().any(|line| line.trim() == "Success")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_request() {
        assert_eq!(encode_request("host:version"), b"000chost:version");
        assert_eq!(
            encode_request("host:transport:emulator-5554"),
            b"001chost:transport:emulator-5554"
        );
    }

    #[test]
    fn test_decode_hex_length() {
        assert_eq!(decode_hex_length(b"0000").unwrap(), 0);
        assert_eq!(decode_hex_length(b"00a2").unwrap(), 162);
        assert!(decode_hex_length(b"zzzz").is_err());
    }

    #[test]
    fn test_parse_device_list() {
        let payload = "emulator-5554          device product:sdk_gphone64 model:sdk_gphone64_x86_64 transport_id:1\n\
                       0A031FDD4002349E       offline transport_id:2\n";
        let devices = parse_device_list(payload);
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].serial, "emulator-5554");
        assert_eq!(devices[0].state, DeviceState::Device);
        assert_eq!(devices[1].serial, "0A031FDD4002349E");
        assert_eq!(devices[1].state, DeviceState::Offline);
    }

    #[test]
    fn test_parse_device_list_skips_blank_lines() {
        assert!(parse_device_list("\n\n").is_empty());
    }

    #[test]
    fn test_parse_properties() {
        let output = "[ro.product.model]: [Pixel 7]\n[ro.build.version.sdk]: [34]\nnot a property line\n";
        let props = parse_properties(output);
        assert_eq!(props.get("ro.product.model").map(String::as_str), Some("Pixel 7"));
        assert_eq!(props.get("ro.build.version.sdk").map(String::as_str), Some("34"));
        assert_eq!(props.len(), 2);
    }

    #[test]
    fn test_parse_package_list() {
        let output = "package:com.android.chrome\npackage:com.example.app\njunk line\n";
        let packages = parse_package_list(output);
        assert_eq!(
            packages,
            vec![
                PackageId::from("com.android.chrome"),
                PackageId::from("com.example.app")
            ]
        );
    }

    #[test]
    fn test_uninstall_succeeded() {
        assert!(uninstall_succeeded("Success\n"));
        assert!(uninstall_succeeded("some warning\nSuccess\n"));
        assert!(!uninstall_succeeded(
            "Failure [DELETE_FAILED_INTERNAL_ERROR]\n"
        ));
        assert!(!uninstall_succeeded("Successful-ish\n"));
    }
}
