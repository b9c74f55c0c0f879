//! `info` command implementation.

use anyhow::{Context, Result};
use contracts::{MenuListConfig, SessionBlueprint};
use serde::Serialize;
use tracing::info;

use super::load_blueprint;
use crate::cli::InfoArgs;

/// Configuration info for JSON output
#[derive(Serialize)]
struct ConfigInfo {
    version: String,
    device: DeviceInfo,
    intake: IntakeInfo,
    capture: CaptureInfo,
    menu: MenuInfo,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    feedback: Vec<FeedbackInfo>,
}

#[derive(Serialize)]
struct DeviceInfo {
    name: String,
    tick_ms: u64,
}

#[derive(Serialize)]
struct IntakeInfo {
    backlog_capacity: usize,
    max_events_per_tick: usize,
    drop_policy: String,
}

#[derive(Serialize)]
struct CaptureInfo {
    arming_lag: bool,
    move_threshold: u8,
    settle_delay_ms: u64,
    segment_pause_ms: u64,
    segment_timeout_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    trigger_pose: Option<String>,
}

#[derive(Serialize)]
struct MenuInfo {
    open_list_a_pose: String,
    open_list_b_pose: String,
    confirm_pose: String,
    cancel_pose: String,
    lists: Vec<ListInfo>,
}

#[derive(Serialize)]
struct ListInfo {
    name: String,
    item_count: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    items: Vec<String>,
}

#[derive(Serialize)]
struct FeedbackInfo {
    name: String,
    feedback_type: String,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration info");

    let blueprint = load_blueprint(&args.config)?;

    if args.json {
        let info = build_config_info(&blueprint, args.items);
        let json =
            serde_json::to_string_pretty(&info).context("Failed to serialize config info")?;
        println!("{}", json);
    } else {
        print_config_info(&blueprint, args.items);
    }

    Ok(())
}

fn list_info(list: &MenuListConfig, with_items: bool) -> ListInfo {
    ListInfo {
        name: list.name.clone(),
        item_count: list.items.len(),
        items: if with_items {
            list.items.clone()
        } else {
            Vec::new()
        },
    }
}

fn build_config_info(blueprint: &SessionBlueprint, with_items: bool) -> ConfigInfo {
    let capture = &blueprint.capture;
    let menu = &blueprint.menu;

    ConfigInfo {
        version: format!("{:?}", blueprint.version),
        device: DeviceInfo {
            name: blueprint.device.name.clone(),
            tick_ms: blueprint.device.tick_ms,
        },
        intake: IntakeInfo {
            backlog_capacity: blueprint.intake.backlog_capacity,
            max_events_per_tick: blueprint.intake.max_events_per_tick,
            drop_policy: format!("{:?}", blueprint.intake.drop_policy),
        },
        capture: CaptureInfo {
            arming_lag: capture.arming_lag,
            move_threshold: capture.move_threshold,
            settle_delay_ms: capture.settle_delay_ms,
            segment_pause_ms: capture.segment_pause_ms,
            segment_timeout_ms: capture.segment_timeout_ms,
            trigger_pose: capture.trigger_pose.map(|p| p.to_string()),
        },
        menu: MenuInfo {
            open_list_a_pose: menu.open_list_a_pose.to_string(),
            open_list_b_pose: menu.open_list_b_pose.to_string(),
            confirm_pose: menu.confirm_pose.to_string(),
            cancel_pose: menu.cancel_pose.to_string(),
            lists: vec![
                list_info(&menu.list_a, with_items),
                list_info(&menu.list_b, with_items),
            ],
        },
        feedback: blueprint
            .feedback
            .iter()
            .map(|f| FeedbackInfo {
                name: f.name.clone(),
                feedback_type: format!("{:?}", f.feedback_type),
            })
            .collect(),
    }
}

fn print_config_info(blueprint: &SessionBlueprint, with_items: bool) {
    let capture = &blueprint.capture;
    let menu = &blueprint.menu;

    println!("Armband Navigator Configuration\n");

    println!("Device");
    println!("   ├─ Version: {:?}", blueprint.version);
    println!("   ├─ Name: {}", blueprint.device.name);
    println!("   └─ Tick: {} ms", blueprint.device.tick_ms);

    println!("\nIntake");
    println!("   ├─ Backlog: {}", blueprint.intake.backlog_capacity);
    println!("   ├─ Per tick: {}", blueprint.intake.max_events_per_tick);
    println!("   └─ Drop policy: {:?}", blueprint.intake.drop_policy);

    println!("\nGesture Capture");
    println!("   ├─ Move threshold: {} buckets", capture.move_threshold);
    println!("   ├─ Settle delay: {} ms", capture.settle_delay_ms);
    println!("   ├─ Segment pause: {} ms", capture.segment_pause_ms);
    println!("   ├─ Segment timeout: {} ms", capture.segment_timeout_ms);
    match capture.trigger_pose {
        Some(pose) => println!("   └─ Trigger pose: {pose}"),
        None => println!("   └─ Trigger pose: (none)"),
    }

    println!("\nMenu");
    println!("   ├─ {} opens '{}'", menu.open_list_a_pose, menu.list_a.name);
    println!("   ├─ {} opens '{}'", menu.open_list_b_pose, menu.list_b.name);
    println!("   ├─ {} confirms", menu.confirm_pose);
    println!("   └─ {} cancels", menu.cancel_pose);

    for list in [&menu.list_a, &menu.list_b] {
        println!("\nList '{}' ({} items)", list.name, list.items.len());
        if with_items {
            for (i, item) in list.items.iter().enumerate() {
                let prefix = if i + 1 == list.items.len() { "└─" } else { "├─" };
                println!("   {} {:>2}: {}", prefix, i, item);
            }
        }
    }

    if !blueprint.feedback.is_empty() {
        println!("\nFeedback ({})", blueprint.feedback.len());
        for (i, sink) in blueprint.feedback.iter().enumerate() {
            let prefix = if i + 1 == blueprint.feedback.len() { "└─" } else { "├─" };
            println!("   {} {} ({:?})", prefix, sink.name, sink.feedback_type);
        }
    }

    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_json_shape() {
        let info = build_config_info(&SessionBlueprint::default(), false);
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["device"]["tick_ms"], 50);
        assert_eq!(json["menu"]["open_list_a_pose"], "waveIn");
        assert_eq!(json["menu"]["lists"][0]["item_count"], 11);
        assert!(json["menu"]["lists"][0].get("items").is_none());
        assert_eq!(json["feedback"][0]["name"], "device_log");
    }

    #[test]
    fn test_info_with_items() {
        let info = build_config_info(&SessionBlueprint::default(), true);
        assert_eq!(info.menu.lists[1].items.len(), 11);
    }
}
