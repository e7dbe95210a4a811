//! Connection target resolution for the adb server
//!
//! `ADB_SERVER_SOCKET` may override where the adb server lives, in the same
//! `tcp:<host>:<port>` format the adb tooling itself uses. Anything malformed
//! (wrong scheme, non-IPv4 host, out-of-range port) falls back to the default
//! target rather than failing the run, and an unset variable is treated the
//! same as a malformed one.

use std::fmt;
use std::net::Ipv4Addr;

pub const ADB_SERVER_SOCKET_VAR: &str = "ADB_SERVER_SOCKET";

pub const DEFAULT_HOST: Ipv4Addr = Ipv4Addr::new(127, 0, 0, 1);
pub const DEFAULT_PORT: u16 = 5037;

/// Resolved adb server address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionTarget {
    pub host: Ipv4Addr,
    pub port: u16,
}

impl Default for ConnectionTarget {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST,
            port: DEFAULT_PORT,
        }
    }
}

impl fmt::Display for ConnectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Parse a `tcp:<ipv4>:<port>` socket spec. `None` means "use the default".
pub fn parse_server_socket(socket: &str) -> Option<ConnectionTarget> {
    let rest = socket.strip_prefix("tcp:")?;
    let (host, port) = rest.rsplit_once(':')?;
    let host: Ipv4Addr = host.parse().ok()?;
    let port: u16 = port.parse().ok()?;
    if port == 0 {
        return None;
    }
    Some(ConnectionTarget { host, port })
}

/// Resolve the adb server target from the environment
pub fn server_target() -> ConnectionTarget {
    std::env::var(ADB_SERVER_SOCKET_VAR)
        .ok()
        .and_then(|socket| parse_server_socket(&socket))
        .unwrap_or_default()
}
