//! Reading JSON documents from files or stdin

use crate::error::CliResult;
use lsv_tuner_types::{FunctionValueMap, ProfileInput};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::io::Read;

fn read_source(path: &str) -> CliResult<String> {
    if path == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

fn read_json<T: DeserializeOwned>(path: &str) -> CliResult<T> {
    let contents = read_source(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Profile input; `-` reads stdin.
pub fn read_profile(path: &str) -> CliResult<ProfileInput> {
    read_json(path)
}

/// Settings map keyed by numeric function id; `-` reads stdin.
///
/// Ids are read as plain numbers first so an unknown one is reported by
/// number rather than as a parse failure.
pub fn read_settings(path: &str) -> CliResult<FunctionValueMap> {
    let raw: BTreeMap<u8, i32> = read_json(path)?;
    Ok(FunctionValueMap::from_raw(raw)?)
}
