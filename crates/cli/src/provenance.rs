//! Provenance sidecars: `<report>.provenance.json` records which code, config
//! and input files produced a report.

use anyhow::{Context, Result};
use irrigation::cfg::EngineCfg;
use serde::Serialize;
use std::ffi::OsStr;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Callsite {
    pub file: &'static str,
    pub line: u32,
}

/// An input file and its size when the analysis read it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputFile {
    pub path: String,
    pub bytes: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Provenance {
    pub code_rev: String,
    pub engine_version: &'static str,
    pub callsite: Callsite,
    pub config: EngineCfg,
    pub water_merged: usize,
    pub inputs: Vec<InputFile>,
    pub outputs: Vec<String>,
}

impl Provenance {
    /// Start a record for a run with `config`; the callsite is the caller.
    #[track_caller]
    pub fn new(config: EngineCfg) -> Self {
        let at = Location::caller();
        Self {
            code_rev: current_git_rev(),
            engine_version: irrigation::VERSION,
            callsite: Callsite {
                file: at.file(),
                line: at.line(),
            },
            config,
            water_merged: 0,
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn input(&mut self, path: &Path) {
        self.inputs.push(InputFile {
            path: path.to_string_lossy().into_owned(),
            bytes: fs::metadata(path).ok().map(|m| m.len()),
        });
    }

    pub fn output(&mut self, path: &Path) {
        self.outputs.push(path.to_string_lossy().into_owned());
    }

    /// Write the record beside `report` and return the sidecar path.
    pub fn write_beside(&self, report: &Path) -> Result<PathBuf> {
        let path = sidecar_path(report);
        fs::write(&path, serde_json::to_vec_pretty(self)?)
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }
}

fn sidecar_path(report: &Path) -> PathBuf {
    let stem = report.file_stem().unwrap_or(OsStr::new("report"));
    let mut name = stem.to_os_string();
    name.push(".provenance.json");
    report.with_file_name(name)
}

/// `GIT_COMMIT` (build time, then run time), else `git rev-parse HEAD`, else
/// `"unknown"`.
pub fn current_git_rev() -> String {
    [
        option_env!("GIT_COMMIT").map(str::to_string),
        std::env::var("GIT_COMMIT").ok(),
    ]
    .into_iter()
    .flatten()
    .find(|rev| !rev.is_empty())
    .or_else(git_head)
    .unwrap_or_else(|| "unknown".to_string())
}

fn git_head() -> Option<String> {
    let out = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
    if !out.status.success() {
        return None;
    }
    let rev = String::from_utf8(out.stdout).ok()?;
    Some(rev.trim().to_string()).filter(|r| !r.is_empty())
}
