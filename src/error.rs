//! Error types and handling for adbsweep
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Per-item failures are not errors here: a failed catalog lookup degrades the
//! record to bare, and a failed uninstall lands in the removal report. Only
//! structural failures (transport, protocol, malformed selection) abort a run.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for adbsweep operations
#[derive(Error, Diagnostic, Debug)]
pub enum SweepError {
    // adb transport errors
    #[error("Failed to connect to adb server at {target}: {reason}")]
    #[diagnostic(
        code(adbsweep::adb::connect_failed),
        help("Check that the adb server is running ('adb start-server') and ADB_SERVER_SOCKET points at it")
    )]
    AdbConnectFailed { target: String, reason: String },

    #[error("adb server rejected request: {message}")]
    #[diagnostic(code(adbsweep::adb::request_failed))]
    AdbRequestFailed { message: String },

    #[error("Malformed adb protocol data: {message}")]
    #[diagnostic(
        code(adbsweep::adb::protocol),
        help("The adb server sent a frame this client could not parse; it may be an incompatible version")
    )]
    AdbProtocol { message: String },

    // Device errors
    #[error("No devices connected")]
    #[diagnostic(
        code(adbsweep::device::none_connected),
        help("Connect a device with USB debugging enabled and check 'adb devices'")
    )]
    NoDevices,

    #[error("Device '{serial}' has no installed packages")]
    #[diagnostic(code(adbsweep::device::no_packages))]
    NoPackages { serial: String },

    // Selection errors
    #[error("Interaction layer returned an invalid selection: {message}")]
    #[diagnostic(
        code(adbsweep::selection::malformed),
        help("This is a defect in the prompt integration, not an operator mistake")
    )]
    MalformedSelection { message: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(adbsweep::io))]
    Io { message: String },
}

impl From<std::io::Error> for SweepError {
    fn from(err: std::io::Error) -> Self {
        SweepError::Io {
            message: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for SweepError {
    fn from(err: inquire::InquireError) -> Self {
        SweepError::Io {
            message: err.to_string(),
        }
    }
}

/// Creates an adb connect error
pub fn connect_failed(target: impl Into<String>, reason: impl Into<String>) -> SweepError {
    SweepError::AdbConnectFailed {
        target: target.into(),
        reason: reason.into(),
    }
}

/// Creates an adb request rejection error
pub fn request_failed(message: impl Into<String>) -> SweepError {
    SweepError::AdbRequestFailed {
        message: message.into(),
    }
}

/// Creates an adb protocol error
pub fn protocol(message: impl Into<String>) -> SweepError {
    SweepError::AdbProtocol {
        message: message.into(),
    }
}

/// Creates a malformed selection error
pub fn malformed_selection(message: impl Into<String>) -> SweepError {
    SweepError::MalformedSelection {
        message: message.into(),
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, SweepError>;
