//! Sequential batch removal
//!
//! Removal is irreversible, so the batch runs strictly one package at a time
//! and never retries. Each outcome becomes data: a success bumps the counter,
//! a refusal or transport error lands the id on the failed list. Any failure
//! in the final report maps to a non-zero process exit; partial success is
//! still overall failure.

use crate::adb::{DeviceControl, PackageId};

/// Aggregate result of one removal batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalReport {
    pub succeeded: usize,
    pub failed: Vec<PackageId>,
}

impl RemovalReport {
    pub fn attempted(&self) -> usize {
        self.succeeded + self.failed.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Status line for one completed attempt
pub fn progress_line(attempted: usize, total: usize, errors: usize) -> String {
    let noun = if errors == 1 { "error" } else { "errors" };
    format!("{attempted}/{total} packages uninstalled ({errors} {noun})")
}

/// Remove each id in order, emitting one progress line per attempt.
///
/// Transport errors for a single package are absorbed into its failure; the
/// batch always runs to completion.
pub async fn remove_all(
    device: &dyn DeviceControl,
    serial: &str,
    ids: &[PackageId],
    mut on_progress: impl FnMut(&str),
) -> RemovalReport {
    let mut succeeded = 0usize;
    let mut failed = Vec::new();

    for id in ids {
        let removed = device
            .remove_package(serial, id)
            .await
            .unwrap_or(false);
        if removed {
            succeeded += 1;
        } else {
            failed.push(id.clone());
        }
        let attempted = succeeded + failed.len();
        on_progress(&progress_line(attempted, ids.len(), failed.len()));
    }

    RemovalReport { succeeded, failed }
}
