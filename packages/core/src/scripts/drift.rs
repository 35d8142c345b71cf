//! Installed-copy drift detection
//!
//! Compares a reference store (normally the embedded bundle) against another
//! store, usually an installed directory, to find stale or hand-edited copies.

use super::{ScriptError, ScriptStore};
use serde::Serialize;
use std::collections::BTreeSet;

pub const RESYNC_COMMAND: &str = "continuous-scripts export --force";

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ScriptDrift {
    pub drift_detected: bool,
    /// Present in both stores with different bytes
    pub mismatched: Vec<String>,
    /// Present in the reference store only
    pub missing: Vec<String>,
    /// Present in the candidate store only
    pub extra: Vec<String>,
    /// Probes that could not be completed
    pub diagnostics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ProbeOutcome {
    Match,
    Mismatch,
    Missing,
    ProbeFailed(String),
}

/// Compare every script in `reference` with its copy in `candidate`
///
/// Errors only when the reference store cannot be read; candidate failures
/// are reported in the drift report.
pub fn detect_script_drift(
    reference: &dyn ScriptStore,
    candidate: &dyn ScriptStore,
) -> Result<ScriptDrift, ScriptError> {
    let reference_keys = reference.keys()?;

    let mut diagnostics = Vec::new();
    let candidate_keys = match candidate.keys() {
        Ok(keys) => keys,
        Err(err) => {
            diagnostics.push(format!("{}: {err}", candidate.describe()));
            Vec::new()
        }
    };

    let mut results = Vec::with_capacity(reference_keys.len());
    for key in &reference_keys {
        let expected = reference.get(key)?;
        results.push((key.clone(), probe_script(candidate, key, &expected)));
    }

    let known: BTreeSet<&str> = reference_keys.iter().map(String::as_str).collect();
    let extra = candidate_keys
        .into_iter()
        .filter(|key| !known.contains(key.as_str()))
        .collect();

    let mut report = build_drift_report(&results, extra);
    diagnostics.append(&mut report.diagnostics);
    report.diagnostics = diagnostics;
    Ok(report)
}

pub fn drift_warning_lines(report: &ScriptDrift, location: &str) -> Vec<String> {
    if !report.drift_detected {
        return Vec::new();
    }

    let mut lines = vec![format!(
        "Installed scripts at {location} are out of sync with the bundled scripts."
    )];
    if !report.mismatched.is_empty() {
        lines.push(format!("Modified: {}", report.mismatched.join(", ")));
    }
    if !report.missing.is_empty() {
        lines.push(format!("Missing: {}", report.missing.join(", ")));
    }
    if !report.extra.is_empty() {
        lines.push(format!("Not bundled: {}", report.extra.join(", ")));
    }
    lines.push(format!("Resync with: {RESYNC_COMMAND} {location}"));
    lines
}

fn probe_script(candidate: &dyn ScriptStore, key: &str, expected: &[u8]) -> ProbeOutcome {
    match candidate.get(key) {
        Ok(actual) if *actual == *expected => ProbeOutcome::Match,
        Ok(_) => ProbeOutcome::Mismatch,
        Err(err) if err.is_not_found() => ProbeOutcome::Missing,
        Err(err) => ProbeOutcome::ProbeFailed(err.to_string()),
    }
}

fn build_drift_report(results: &[(String, ProbeOutcome)], extra: Vec<String>) -> ScriptDrift {
    let mut report = ScriptDrift {
        extra,
        ..ScriptDrift::default()
    };

    for (name, outcome) in results {
        match outcome {
            ProbeOutcome::Match => {}
            ProbeOutcome::Mismatch => report.mismatched.push(name.clone()),
            ProbeOutcome::Missing => report.missing.push(name.clone()),
            ProbeOutcome::ProbeFailed(detail) => {
                report.diagnostics.push(format!("{name}: {detail}"));
            }
        }
    }

    report.drift_detected =
        !report.mismatched.is_empty() || !report.missing.is_empty() || !report.extra.is_empty();
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scripts::{DirectoryStore, EmbeddedStore, export_to_dir};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn mismatch_detection_marks_drift() {
        let report = build_drift_report(
            &[("bootstrap.sh".to_string(), ProbeOutcome::Mismatch)],
            Vec::new(),
        );
        assert!(report.drift_detected);
        assert_eq!(report.mismatched, vec!["bootstrap.sh".to_string()]);
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn no_drift_when_all_scripts_match() {
        let report = build_drift_report(
            &[
                ("bootstrap.sh".to_string(), ProbeOutcome::Match),
                ("services/redis".to_string(), ProbeOutcome::Match),
            ],
            Vec::new(),
        );
        assert!(!report.drift_detected);
        assert!(report.mismatched.is_empty());
        assert!(report.missing.is_empty());
    }

    #[test]
    fn probe_failures_are_diagnostics_not_drift() {
        let report = build_drift_report(
            &[(
                "setupscripts/ruby".to_string(),
                ProbeOutcome::ProbeFailed("permission denied".to_string()),
            )],
            Vec::new(),
        );
        assert!(!report.drift_detected);
        assert_eq!(report.diagnostics, vec!["setupscripts/ruby: permission denied"]);
    }

    #[test]
    fn fresh_export_has_no_drift() {
        let dest = TempDir::new().unwrap();
        export_to_dir(&EmbeddedStore::new(), dest.path(), false).unwrap();

        let report =
            detect_script_drift(&EmbeddedStore::new(), &DirectoryStore::new(dest.path())).unwrap();
        assert_eq!(report, ScriptDrift::default());
    }

    #[test]
    fn edited_missing_and_extra_scripts_are_reported() {
        let dest = TempDir::new().unwrap();
        export_to_dir(&EmbeddedStore::new(), dest.path(), false).unwrap();
        fs::write(dest.path().join("bootstrap.sh"), b"echo edited\n").unwrap();
        fs::remove_file(dest.path().join("services").join("mongodb")).unwrap();
        fs::write(dest.path().join("services").join("couchdb"), b"#!/bin/sh\n").unwrap();

        let report =
            detect_script_drift(&EmbeddedStore::new(), &DirectoryStore::new(dest.path())).unwrap();
        assert!(report.drift_detected);
        assert_eq!(report.mismatched, vec!["bootstrap.sh".to_string()]);
        assert_eq!(report.missing, vec!["services/mongodb".to_string()]);
        assert_eq!(report.extra, vec!["services/couchdb".to_string()]);
    }

    #[test]
    fn missing_directory_reports_every_script_missing() {
        let dest = TempDir::new().unwrap();
        let candidate = DirectoryStore::new(dest.path().join("absent"));

        let report = detect_script_drift(&EmbeddedStore::new(), &candidate).unwrap();
        assert!(report.drift_detected);
        assert_eq!(report.missing, EmbeddedStore::new().keys().unwrap());
        assert_eq!(report.diagnostics.len(), 1);
    }

    #[test]
    fn warning_lines_include_resync_command() {
        let report = ScriptDrift {
            drift_detected: true,
            mismatched: vec!["bootstrap.sh".to_string()],
            missing: vec!["services/mongodb".to_string()],
            ..ScriptDrift::default()
        };
        let lines = drift_warning_lines(&report, "/opt/scripts");
        assert!(lines.iter().any(|line| line.contains("bootstrap.sh")));
        assert!(lines.iter().any(|line| line.starts_with("Missing:")));
        assert!(
            lines
                .iter()
                .any(|line| line.contains(RESYNC_COMMAND) && line.contains("/opt/scripts"))
        );
        assert!(drift_warning_lines(&ScriptDrift::default(), "/opt/scripts").is_empty());
    }
}
