//! `validate` command implementation.

use anyhow::{Context, Result};
use contracts::SessionBlueprint;
use serde::Serialize;
use tracing::info;

use super::load_blueprint;
use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigSummary>,
}

#[derive(Serialize)]
struct ConfigSummary {
    version: String,
    device: String,
    tick_ms: u64,
    list_a_items: usize,
    list_b_items: usize,
    feedback_count: usize,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating configuration");

    let result = validate_config(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Configuration validation failed")
    }
}

fn validate_config(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.config.display().to_string();

    match load_blueprint(&args.config) {
        Ok(blueprint) => {
            let warnings = collect_warnings(&blueprint);
            ValidationResult {
                valid: true,
                config_path,
                error: None,
                warnings: if warnings.is_empty() {
                    None
                } else {
                    Some(warnings)
                },
                summary: Some(ConfigSummary {
                    version: format!("{:?}", blueprint.version),
                    device: blueprint.device.name.clone(),
                    tick_ms: blueprint.device.tick_ms,
                    list_a_items: blueprint.menu.list_a.items.len(),
                    list_b_items: blueprint.menu.list_b.items.len(),
                    feedback_count: blueprint.feedback.len(),
                }),
            }
        }
        Err(e) => ValidationResult {
            valid: false,
            config_path,
            error: Some(format!("{e:#}")),
            warnings: None,
            summary: None,
        },
    }
}

/// Non-fatal issues
fn collect_warnings(blueprint: &SessionBlueprint) -> Vec<String> {
    let mut warnings = Vec::new();

    if blueprint.feedback.is_empty() {
        warnings.push("No feedback sinks configured - device commands will be dropped".to_string());
    }

    if blueprint.capture.trigger_pose.is_none() {
        warnings.push("capture.trigger_pose is unset - gestures can only be captured with --capture".to_string());
    }

    if blueprint.intake.max_events_per_tick > blueprint.intake.backlog_capacity {
        warnings.push(format!(
            "intake.max_events_per_tick ({}) exceeds backlog_capacity ({})",
            blueprint.intake.max_events_per_tick, blueprint.intake.backlog_capacity
        ));
    }

    for list in [&blueprint.menu.list_a, &blueprint.menu.list_b] {
        if list.items.len() == 1 {
            warnings.push(format!("List '{}' has a single item - tilting does nothing", list.name));
        }
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Configuration is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Version: {}", summary.version);
            println!("  Device: {} ({} ms tick)", summary.device, summary.tick_ms);
            println!("  List A items: {}", summary.list_a_items);
            println!("  List B items: {}", summary.list_b_items);
            println!("  Feedback sinks: {}", summary.feedback_count);
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Configuration is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}
