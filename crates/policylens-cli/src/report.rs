//! Labeled dataset loading and evaluation report types.

use crate::error::{CliError, Result};
use policylens_domain::Classification;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// One labeled policy.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Policy document
    pub policy: Value,
    /// Expected verdict
    pub label: Classification,
}

#[derive(Deserialize)]
struct RawSample {
    policy: Value,
    label: String,
}

/// Load a labeled dataset: a JSON array of `{ "policy": ..., "label": ... }`.
pub fn load_dataset(path: &Path) -> Result<Vec<Sample>> {
    if !path.exists() {
        return Err(CliError::InvalidInput(format!(
            "Dataset not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path)?;
    let raw: Vec<RawSample> = serde_json::from_str(&contents)?;

    raw.into_iter()
        .enumerate()
        .map(|(idx, sample)| {
            let label = Classification::parse(&sample.label).ok_or_else(|| {
                CliError::InvalidInput(format!(
                    "Sample {} has invalid label '{}'",
                    idx + 1,
                    sample.label
                ))
            })?;
            Ok(Sample {
                policy: sample.policy,
                label,
            })
        })
        .collect()
}

/// Metrics for one evaluated model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetrics {
    /// Backend name
    pub provider: String,
    /// Model identifier
    pub model: String,
    /// Correct predictions as a percentage, rounded to 2 decimals
    pub accuracy: f64,
    /// Dataset size
    pub total_samples: usize,
    /// Predictions matching the label
    pub correct_predictions: usize,
    /// Samples that produced no prediction
    pub failures: usize,
}

impl ModelMetrics {
    /// Build metrics from raw counts.
    pub fn new(
        provider: impl Into<String>,
        model: impl Into<String>,
        total_samples: usize,
        correct_predictions: usize,
        failures: usize,
    ) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
            accuracy: accuracy_percent(correct_predictions, total_samples),
            total_samples,
            correct_predictions,
            failures,
        }
    }
}

/// One row of the evaluation report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReportEntry {
    /// The model ran over the dataset
    Metrics(ModelMetrics),

    /// The model could not be run at all
    Failed {
        /// Backend name
        provider: String,
        /// Model identifier
        model: String,
        /// Why the run was skipped
        error: String,
    },
}

/// Percentage of `correct` over `total`, rounded to 2 decimals; 0 for an empty set.
pub fn accuracy_percent(correct: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let percent = correct as f64 / total as f64 * 100.0;
    (percent * 100.0).round() / 100.0
}

/// Write the report as pretty JSON, creating parent directories.
pub fn write_report(path: &Path, entries: &[ReportEntry]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let contents = serde_json::to_string_pretty(entries)?;
    fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_accuracy_rounding() {
        assert_eq!(accuracy_percent(0, 0), 0.0);
        assert_eq!(accuracy_percent(3, 4), 75.0);
        assert_eq!(accuracy_percent(2, 3), 66.67);
        assert_eq!(accuracy_percent(1, 3), 33.33);
        assert_eq!(accuracy_percent(5, 5), 100.0);
    }

    #[test]
    fn test_load_dataset() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"policy": {{"Statement": [{{"Effect": "Allow", "Action": "s3:*", "Resource": "*"}}]}}, "label": "Weak"}},
                {{"policy": {{"Statement": []}}, "label": "Strong"}}
            ]"#
        )
        .unwrap();

        let dataset = load_dataset(file.path()).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset[0].label, Classification::Weak);
        assert_eq!(dataset[1].label, Classification::Strong);
        assert_eq!(dataset[1].policy["Statement"], serde_json::json!([]));
    }

    #[test]
    fn test_load_dataset_rejects_unknown_label() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"[{{"policy": {{}}, "label": "weak"}}]"#).unwrap();

        match load_dataset(file.path()) {
            Err(CliError::InvalidInput(message)) => assert!(message.contains("Sample 1")),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_load_dataset_missing_file() {
        let dir = tempdir().unwrap();
        let result = load_dataset(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn test_report_serialization_shape() {
        let entries = vec![
            ReportEntry::Metrics(ModelMetrics::new("openai", "gpt-3.5-turbo", 3, 2, 1)),
            ReportEntry::Failed {
                provider: "huggingface".to_string(),
                model: "meta-llama/Meta-Llama-3-8B-Instruct".to_string(),
                error: "Missing API key: HF_API_TOKEN".to_string(),
            },
        ];

        let value = serde_json::to_value(&entries).unwrap();
        assert_eq!(
            value[0],
            serde_json::json!({
                "provider": "openai",
                "model": "gpt-3.5-turbo",
                "accuracy": 66.67,
                "total_samples": 3,
                "correct_predictions": 2,
                "failures": 1
            })
        );
        assert_eq!(value[1]["error"], "Missing API key: HF_API_TOKEN");
        assert!(value[1].get("accuracy").is_none());
    }

    #[test]
    fn test_write_report_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("outputs").join("nested").join("results.json");
        let entries = vec![ReportEntry::Metrics(ModelMetrics::new("openai", "m", 1, 1, 0))];

        write_report(&path, &entries).unwrap();

        let written: Vec<ReportEntry> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, entries);
    }
}
