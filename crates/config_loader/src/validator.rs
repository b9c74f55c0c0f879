//! Configuration validation
//!
//! Rules:
//! - tick period and backlog capacity are non-zero
//! - move threshold fits inside the bucket range
//! - delays are positive and the segment timeout exceeds the settle delay
//! - both menu lists have items
//! - designated poses are real gesture poses and pairwise distinct
//! - feedback sink names are present and unique

use std::collections::HashSet;

use contracts::{ContractError, Pose, SessionBlueprint, BUCKET_COUNT};

/// Validate a SessionBlueprint
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(blueprint: &SessionBlueprint) -> Result<(), ContractError> {
    validate_device(blueprint)?;
    validate_intake(blueprint)?;
    validate_capture(blueprint)?;
    validate_menu_lists(blueprint)?;
    validate_poses(blueprint)?;
    validate_feedback(blueprint)?;
    Ok(())
}

fn validate_device(blueprint: &SessionBlueprint) -> Result<(), ContractError> {
    if blueprint.device.tick_ms == 0 {
        return Err(ContractError::config_validation(
            "device.tick_ms",
            "tick_ms must be > 0",
        ));
    }
    Ok(())
}

fn validate_intake(blueprint: &SessionBlueprint) -> Result<(), ContractError> {
    if blueprint.intake.backlog_capacity == 0 {
        return Err(ContractError::config_validation(
            "intake.backlog_capacity",
            "backlog_capacity must be > 0",
        ));
    }
    if blueprint.intake.max_events_per_tick == 0 {
        return Err(ContractError::config_validation(
            "intake.max_events_per_tick",
            "max_events_per_tick must be > 0",
        ));
    }
    Ok(())
}

fn validate_capture(blueprint: &SessionBlueprint) -> Result<(), ContractError> {
    let capture = &blueprint.capture;

    if capture.move_threshold == 0 || capture.move_threshold >= BUCKET_COUNT {
        return Err(ContractError::config_validation(
            "capture.move_threshold",
            format!(
                "move_threshold must be in 1..={}, got {}",
                BUCKET_COUNT - 1,
                capture.move_threshold
            ),
        ));
    }

    for (field, value) in [
        ("capture.settle_delay_ms", capture.settle_delay_ms),
        ("capture.segment_pause_ms", capture.segment_pause_ms),
        ("capture.segment_timeout_ms", capture.segment_timeout_ms),
    ] {
        if value == 0 {
            return Err(ContractError::config_validation(field, "must be > 0"));
        }
    }

    if capture.segment_timeout_ms <= capture.settle_delay_ms {
        return Err(ContractError::config_validation(
            "capture.segment_timeout_ms",
            format!(
                "segment_timeout_ms ({}) must be > settle_delay_ms ({})",
                capture.segment_timeout_ms, capture.settle_delay_ms
            ),
        ));
    }

    Ok(())
}

fn validate_menu_lists(blueprint: &SessionBlueprint) -> Result<(), ContractError> {
    for (field, list) in [
        ("menu.list_a", &blueprint.menu.list_a),
        ("menu.list_b", &blueprint.menu.list_b),
    ] {
        if list.items.is_empty() {
            return Err(ContractError::config_validation(
                format!("{field}.items"),
                format!("list '{}' has no items", list.name),
            ));
        }
    }
    Ok(())
}

/// Designated poses must be distinguishable from each other and from rest
fn validate_poses(blueprint: &SessionBlueprint) -> Result<(), ContractError> {
    let menu = &blueprint.menu;
    let mut designated: Vec<(&str, Pose)> = vec![
        ("menu.open_list_a_pose", menu.open_list_a_pose),
        ("menu.open_list_b_pose", menu.open_list_b_pose),
        ("menu.cancel_pose", menu.cancel_pose),
        ("menu.confirm_pose", menu.confirm_pose),
    ];
    if let Some(trigger) = blueprint.capture.trigger_pose {
        designated.push(("capture.trigger_pose", trigger));
    }

    let mut seen = HashSet::new();
    for (field, pose) in designated {
        if !pose.is_gesture() {
            return Err(ContractError::config_validation(
                field,
                format!("'{pose}' is not a gesture pose"),
            ));
        }
        if !seen.insert(pose) {
            return Err(ContractError::config_validation(
                field,
                format!("duplicate pose '{pose}'"),
            ));
        }
    }
    Ok(())
}

fn validate_feedback(blueprint: &SessionBlueprint) -> Result<(), ContractError> {
    let mut seen = HashSet::new();
    for (idx, feedback) in blueprint.feedback.iter().enumerate() {
        if feedback.name.is_empty() {
            return Err(ContractError::config_validation(
                format!("feedback[{idx}].name"),
                "feedback name cannot be empty",
            ));
        }
        if !seen.insert(feedback.name.as_str()) {
            return Err(ContractError::config_validation(
                format!("feedback[name={}]", feedback.name),
                "duplicate feedback name",
            ));
        }
    }
    Ok(())
}
