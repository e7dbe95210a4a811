//! Run orchestration
//!
//! Composes the phases in order: enumerate devices, choose one, list its
//! packages, enrich, index, select, confirm, remove. Owns every collection
//! that flows between phases; nothing survives the run.

use crate::adb::{AdbClient, DeviceControl, DeviceInfo};
use crate::catalog::PlayCatalog;
use crate::cli::Cli;
use crate::config;
use crate::error::{Result, SweepError};
use crate::metadata;
use crate::progress::PhaseProgress;
use crate::prompt::{self, DeviceChoice};
use crate::removal::{self, RemovalReport};
use crate::search::SearchIndex;
use console::Style;
use std::collections::HashMap;
use std::sync::Arc;

/// Label a device row as `"<model-or-serial> (<state>)"`, falling back to
/// the serial when the model property is missing or blank
fn device_label(info: &DeviceInfo, props: &HashMap<String, String>) -> String {
    let model = props
        .get("ro.product.model")
        .map(|m| m.trim())
        .unwrap_or("");
    let name = if model.is_empty() {
        info.serial.as_str()
    } else {
        model
    };
    format!("{name} ({})", info.state)
}

pub async fn run(cli: &Cli) -> Result<RemovalReport> {
    let client = AdbClient::new(config::server_target());

    let devices: Vec<DeviceInfo> = client
        .list_devices()
        .await?
        .into_iter()
        .filter(|d| d.state.is_online())
        .collect();
    if devices.is_empty() {
        return Err(SweepError::NoDevices);
    }

    let mut choices = Vec::with_capacity(devices.len());
    for info in &devices {
        // Unauthorized devices refuse shell access; label by serial then
        let props = client
            .device_properties(&info.serial)
            .await
            .unwrap_or_default();
        choices.push(DeviceChoice {
            serial: info.serial.clone(),
            label: device_label(info, &props),
        });
    }
    let serial = prompt::choose_device(choices)?;

    let packages = client.list_packages(&serial).await?;
    if packages.is_empty() {
        return Err(SweepError::NoPackages { serial });
    }

    let fetch_bar = PhaseProgress::fetch(packages.len() as u64);
    let catalog = Arc::new(PlayCatalog::new());
    let records = metadata::enrich(catalog, &packages, cli.concurrency, |done, _| {
        fetch_bar.set_completed(done as u64);
    })
    .await;
    fetch_bar.finish();

    let index = SearchIndex::build(&records);
    let selection = prompt::choose_packages(&index)?;
    if selection.is_empty() {
        println!("Nothing selected.");
        return Ok(RemovalReport {
            succeeded: 0,
            failed: Vec::new(),
        });
    }

    prompt::confirm_destruction()?;

    let removal_bar = PhaseProgress::removal(selection.len() as u64);
    let report = removal::remove_all(&client, &serial, &selection, |line| {
        removal_bar.inc();
        removal_bar.set_message(line.to_string());
    })
    .await;
    removal_bar.finish();

    if report.is_clean() {
        println!(
            "\n{} apps were uninstalled successfully!",
            Style::new().green().bold().apply_to(report.succeeded)
        );
    } else {
        eprintln!("\nUnable to uninstall:");
        for id in &report.failed {
            eprintln!("  - {}", Style::new().red().apply_to(id));
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adb::DeviceState;

    fn info(serial: &str, state: DeviceState) -> DeviceInfo {
        DeviceInfo {
            serial: serial.to_string(),
            state,
        }
    }

    #[test]
    fn test_device_label_prefers_model() {
        let mut props = HashMap::new();
        props.insert("ro.product.model".to_string(), " Pixel 7 ".to_string());
        let label = device_label(&info("emulator-5554", DeviceState::Device), &props);
        assert_eq!(label, "Pixel 7 (device)");
    }

    #[test]
    fn test_device_label_falls_back_to_serial() {
        let label = device_label(
            &info("0A031FDD", DeviceState::Unauthorized),
            &HashMap::new(),
        );
        assert_eq!(label, "0A031FDD (unauthorized)");

        let mut blank = HashMap::new();
        blank.insert("ro.product.model".to_string(), "   ".to_string());
        let label = device_label(&info("0A031FDD", DeviceState::Device), &blank);
        assert_eq!(label, "0A031FDD (device)");
    }
}
