//! Classify command implementation.

use crate::cli::ClassifyArgs;
use crate::commands::read_credential;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use policylens_classifier::{ClassifierConfig, Policy, PolicyClassifier};
use policylens_domain::TextGenerator;
use policylens_llm::{ProviderConfig, ProviderKind};
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::info;

/// Execute the classify command.
pub fn execute_classify(args: ClassifyArgs, formatter: &Formatter) -> Result<()> {
    let policy = load_policy(&args.policy_file)?;

    let kind: ProviderKind = args.provider.into();
    let credential_env = args
        .credential_env
        .unwrap_or_else(|| kind.default_credential_env().to_string());
    let credential = read_credential(&credential_env)?;

    let mut provider_config = ProviderConfig::new(kind, args.model.clone(), credential);
    if let Some(base_url) = args.base_url {
        provider_config = provider_config.with_base_url(base_url);
    }
    let provider = provider_config.build()?;

    let config = ClassifierConfig {
        max_tokens: args.max_tokens,
    };
    let classifier = PolicyClassifier::new(provider, config).map_err(CliError::Config)?;

    info!(
        "Classifying {} with {}:{}",
        args.policy_file.display(),
        kind,
        args.model
    );

    let output = classify_policy(&classifier, &policy, formatter)?;
    println!("{}", output);

    Ok(())
}

/// Load a policy document from a JSON file.
pub fn load_policy(path: &Path) -> Result<Policy> {
    if !path.exists() {
        return Err(CliError::InvalidInput(format!(
            "Policy file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Classify one policy and render the result.
///
/// On failure the kind, detail and raw model output go to stderr.
pub fn classify_policy<G>(
    classifier: &PolicyClassifier<G>,
    policy: &Policy,
    formatter: &Formatter,
) -> Result<String>
where
    G: TextGenerator,
    G::Error: fmt::Display,
{
    match classifier.classify(policy) {
        Ok(result) => formatter.format_result(&result),
        Err(e) => {
            eprintln!("{}", formatter.classification_failure(&e));
            Err(CliError::Classification {
                kind: e.kind(),
                message: e.to_string(),
            })
        }
    }
}
