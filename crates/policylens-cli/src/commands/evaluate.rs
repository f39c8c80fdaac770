//! Evaluate command implementation.

use crate::cli::EvaluateArgs;
use crate::commands::read_credential;
use crate::config::{EvaluationConfig, ModelConfig};
use crate::error::Result;
use crate::output::Formatter;
use crate::report::{load_dataset, write_report, ModelMetrics, ReportEntry, Sample};
use anyhow::Context;
use policylens_classifier::{ClassifierConfig, PolicyClassifier};
use policylens_domain::TextGenerator;
use policylens_llm::ProviderConfig;
use std::fmt;
use tracing::{error, info};

/// Execute the evaluate command.
pub fn execute_evaluate(args: EvaluateArgs, formatter: &Formatter) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => EvaluationConfig::load(path)?,
        None => EvaluationConfig::default(),
    };
    if let Some(dataset) = args.dataset {
        config.dataset = dataset;
    }
    if let Some(output) = args.output {
        config.output = output;
    }

    info!("Starting evaluation");

    let dataset = load_dataset(&config.dataset)?;
    info!("Loaded dataset with {} samples", dataset.len());

    let entries = run_evaluation(&config, &dataset);

    write_report(&config.output, &entries)?;

    println!("{}", formatter.info("Evaluation results"));
    println!("{}", formatter.format_report(&entries)?);

    let skipped = entries
        .iter()
        .filter(|entry| matches!(entry, ReportEntry::Failed { .. }))
        .count();
    if skipped > 0 {
        println!(
            "{}",
            formatter.warning(&format!("{} model(s) could not be evaluated", skipped))
        );
    }

    println!(
        "{}",
        formatter.success(&format!("Saved to: {}", config.output.display()))
    );

    Ok(())
}

/// Run every configured model over the dataset, one report entry per model.
///
/// A model that cannot be set up (missing credential, bad config) yields a
/// `Failed` entry; the remaining models still run.
pub fn run_evaluation(config: &EvaluationConfig, dataset: &[Sample]) -> Vec<ReportEntry> {
    config
        .models
        .iter()
        .map(|model| {
            info!(
                "Evaluating provider={}, model={}",
                model.provider, model.model
            );

            match run_model(model, &config.classifier, dataset) {
                Ok(metrics) => {
                    info!(
                        "Completed evaluation for {} (accuracy={}%)",
                        model.model, metrics.accuracy
                    );
                    ReportEntry::Metrics(metrics)
                }
                Err(e) => {
                    error!("Evaluation failed for {}: {:#}", model.model, e);
                    ReportEntry::Failed {
                        provider: model.provider.to_string(),
                        model: model.model.clone(),
                        error: format!("{:#}", e),
                    }
                }
            }
        })
        .collect()
}

fn run_model(
    model: &ModelConfig,
    classifier_config: &ClassifierConfig,
    dataset: &[Sample],
) -> anyhow::Result<ModelMetrics> {
    let credential = read_credential(model.credential_env())?;

    let mut provider_config = ProviderConfig::new(model.provider, model.model.clone(), credential);
    if let Some(base_url) = &model.base_url {
        provider_config = provider_config.with_base_url(base_url.clone());
    }
    let provider = provider_config
        .build()
        .with_context(|| format!("Failed to set up {} provider", model.provider))?;

    let classifier =
        PolicyClassifier::new(provider, classifier_config.clone()).map_err(anyhow::Error::msg)?;
    Ok(score_model(
        &classifier,
        model.provider.as_str(),
        &model.model,
        dataset,
    ))
}

/// Classify every sample and count matches against the labels.
///
/// Failed classifications are logged and counted as failures, never as
/// predictions.
pub fn score_model<G>(
    classifier: &PolicyClassifier<G>,
    provider: &str,
    model: &str,
    dataset: &[Sample],
) -> ModelMetrics
where
    G: TextGenerator,
    G::Error: fmt::Display,
{
    let mut correct = 0;
    let mut failures = 0;

    for (idx, sample) in dataset.iter().enumerate() {
        match classifier.classify(&sample.policy) {
            Ok(result) => {
                if result.classification() == sample.label {
                    correct += 1;
                }
            }
            Err(e) => {
                error!(
                    "[{}:{}] Failed on sample {}: {}",
                    provider,
                    model,
                    idx + 1,
                    e
                );
                failures += 1;
            }
        }
    }

    ModelMetrics::new(provider, model, dataset.len(), correct, failures)
}

#[cfg(test)]
mod tests {
    use super::*;
    use policylens_classifier::build_prompt;
    use policylens_domain::Classification;
    use policylens_llm::{MockProvider, ProviderKind};
    use serde_json::json;

    fn sample(policy: serde_json::Value, label: Classification) -> Sample {
        Sample { policy, label }
    }

    #[test]
    fn test_score_model_counts() {
        let weak = json!({"Statement": [{"Effect": "Allow", "Action": "*", "Resource": "*"}]});
        let strong = json!({"Statement": [{"Effect": "Allow", "Action": "s3:GetObject", "Resource": "arn:aws:s3:::b/*"}]});
        let broken = json!({"Sid": "unparseable"});

        let mut llm = MockProvider::new(r#"{"classification": "Weak", "reason": "Default answer."}"#);
        llm.add_response(
            build_prompt(&strong),
            r#"{"classification": "Weak", "reason": "Wrong on purpose."}"#,
        );
        llm.add_response(build_prompt(&broken), "no json at all");

        let dataset = vec![
            sample(weak, Classification::Weak),
            sample(strong, Classification::Strong),
            sample(broken, Classification::Strong),
        ];

        let classifier = PolicyClassifier::default_config(llm.clone());
        let metrics = score_model(&classifier, "mock", "canned", &dataset);

        assert_eq!(metrics.total_samples, 3);
        assert_eq!(metrics.correct_predictions, 1);
        assert_eq!(metrics.failures, 1);
        assert_eq!(metrics.accuracy, 33.33);
        assert_eq!(llm.call_count(), 3);
    }

    #[test]
    fn test_score_model_empty_dataset() {
        let classifier = PolicyClassifier::default_config(MockProvider::default());
        let metrics = score_model(&classifier, "mock", "canned", &[]);
        assert_eq!(metrics.total_samples, 0);
        assert_eq!(metrics.accuracy, 0.0);
    }

    #[test]
    fn test_missing_credential_yields_error_entry() {
        let mut model = ModelConfig::new(ProviderKind::OpenAi, "gpt-3.5-turbo");
        model.credential_env = Some("POLICYLENS_TEST_NEVER_SET_9c2e".to_string());
        let config = EvaluationConfig {
            models: vec![model],
            ..EvaluationConfig::default()
        };

        let entries = run_evaluation(&config, &[sample(json!({}), Classification::Weak)]);

        assert_eq!(
            entries,
            vec![ReportEntry::Failed {
                provider: "openai".to_string(),
                model: "gpt-3.5-turbo".to_string(),
                error: "Missing API key: POLICYLENS_TEST_NEVER_SET_9c2e".to_string(),
            }]
        );
    }
}
