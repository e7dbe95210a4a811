//! Interactive prompts: device choice, searchable package multi-select, and
//! the destructive-action confirmation gate.
//!
//! The multi-select delegates ranking to [`SearchIndex::score_record`] on
//! every keystroke via inquire's scorer hook, so the prompt and the index
//! never disagree about what matches.

use crate::adb::PackageId;
use crate::error::{self, Result};
use crate::search::{Choice, SearchIndex};
use inquire::validator::Validation;
use inquire::{MultiSelect, Select, Text};
use std::fmt;

/// The exact phrase gating removal. Case variants, prefixes and empty input
/// re-prompt; nothing else passes.
pub const CONFIRMATION_PHRASE: &str = "I know what I'm doing";

const PAGE_SIZE: usize = 10;

/// One selectable device row
#[derive(Debug, Clone)]
pub struct DeviceChoice {
    pub serial: String,
    pub label: String,
}

impl fmt::Display for DeviceChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Single-select over connected devices
pub fn choose_device(devices: Vec<DeviceChoice>) -> Result<String> {
    let chosen = Select::new("Select device to use", devices).prompt()?;
    Ok(chosen.serial)
}

/// Search-as-you-type multi-select over the indexed records.
///
/// Options are presented in build order (the empty-query view); typing
/// filters and re-ranks them through the index. The raw prompt result carries
/// each option's original index, which is validated against the record set
/// before use.
pub fn choose_packages(index: &SearchIndex) -> Result<Vec<PackageId>> {
    let options: Vec<Choice> = index.query("");
    let scorer =
        |input: &str, _opt: &Choice, _display: &str, idx: usize| index.score_record(idx, input);

    let selected = MultiSelect::new("Select packages to uninstall", options)
        .with_scorer(&scorer)
        .with_page_size(PAGE_SIZE)
        .raw_prompt()?;

    selected
        .into_iter()
        .map(|opt| {
            if opt.index >= index.len() {
                return Err(error::malformed_selection(format!(
                    "option index {} out of range for {} records",
                    opt.index,
                    index.len()
                )));
            }
            Ok(opt.value.id().clone())
        })
        .collect()
}

/// Whether typed input passes the confirmation gate
pub fn phrase_matches(input: &str) -> bool {
    input == CONFIRMATION_PHRASE
}

/// Free-text confirmation gate. The validator re-prompts until the operator
/// types the exact phrase; there is no default and no shortcut.
pub fn confirm_destruction() -> Result<()> {
    let message = format!(
        "Are you sure you want to delete the selected packages? This action is destructive. Type \"{CONFIRMATION_PHRASE}\" to confirm."
    );
    Text::new(&message)
        .with_validator(|input: &str| {
            if phrase_matches(input) {
                Ok(Validation::Valid)
            } else {
                Ok(Validation::Invalid(
                    "Type the exact phrase to continue".into(),
                ))
            }
        })
        .prompt()?;
    Ok(())
}
