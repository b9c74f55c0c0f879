//! # Integration Tests
//!
//! End-to-end scenarios across crates.
//!
//! Covers:
//! - Contract snapshot checks
//! - Demo session: mock source -> pump -> engine -> feedback
//! - Record / replay through a file
//! - Live channel intake and per-tick rate limiting

#[cfg(test)]
mod contract_tests {
    use contracts::{SessionBlueprint, BUCKET_COUNT, SEGMENTS_PER_GESTURE};

    #[test]
    fn test_contract_constants() {
        assert_eq!(BUCKET_COUNT, 18);
        assert_eq!(SEGMENTS_PER_GESTURE, 3);
    }

    #[test]
    fn test_default_blueprint_is_valid() {
        let blueprint = SessionBlueprint::default();
        config_loader::ConfigLoader::validate(&blueprint).unwrap();
        assert_eq!(blueprint.engine_config().tick_ms, 50);
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::io::BufReader;

    use contracts::{
        EngineEvent, EventSource, GestureLabel, MenuMode, SensorEvent, SessionBlueprint, TickReport,
    };
    use feedback::{FeedbackDispatcher, RecordingFeedback};
    use gesture_engine::GestureEngine;
    use ingestion::{
        full_turn_angle, orientation, pitch_angle, BackpressureConfig, DropPolicy, EventPump,
        MockEventSource, ReplayEventSource, ReplayWriter,
    };
    use observability::SessionMetricsAggregator;

    struct SessionOutcome {
        reports: Vec<TickReport>,
        recorded: feedback::RecordedCommands,
    }

    impl SessionOutcome {
        fn events(&self) -> impl Iterator<Item = &EngineEvent> {
            self.reports.iter().flat_map(|r| r.events.iter())
        }

        fn selections(&self) -> Vec<(MenuMode, usize)> {
            self.reports.iter().flat_map(|r| r.selections()).collect()
        }

        fn menu_changes(&self) -> Vec<MenuMode> {
            self.events()
                .filter_map(|e| match e {
                    EngineEvent::MenuChanged { to, .. } => Some(*to),
                    _ => None,
                })
                .collect()
        }
    }

    /// Drive one full session the way the CLI does
    fn run_session(source: Box<dyn EventSource>, config: BackpressureConfig) -> SessionOutcome {
        let blueprint = SessionBlueprint::default();
        let mut pump = EventPump::new(source, config);
        let mut engine = GestureEngine::new(blueprint.engine_config()).unwrap();

        let recording = RecordingFeedback::new("rec");
        let recorded = recording.recorded();
        let mut feedback = FeedbackDispatcher::new();
        feedback.add_sink(Box::new(recording)).unwrap();

        let mut reports = Vec::new();
        while let Some(batch) = pump.pump() {
            let report = engine.tick(&batch);
            feedback.dispatch_all(&report.commands);
            reports.push(report);
        }

        SessionOutcome { reports, recorded }
    }

    fn level() -> SensorEvent {
        orientation(full_turn_angle(9), pitch_angle(9), full_turn_angle(9))
    }

    /// End-to-end test: MockEventSource -> EventPump -> GestureEngine -> FeedbackDispatcher
    #[test]
    fn test_demo_session() {
        let outcome = run_session(
            Box::new(MockEventSource::demo()),
            BackpressureConfig::default(),
        );

        // message list opened, item "8a" confirmed, emoji list opened and cancelled
        assert_eq!(
            outcome.menu_changes(),
            vec![
                MenuMode::ListA,
                MenuMode::Main,
                MenuMode::ListB,
                MenuMode::Main
            ]
        );
        assert_eq!(outcome.selections(), vec![(MenuMode::ListA, 7)]);

        let emoji_moves: Vec<usize> = outcome
            .events()
            .filter_map(|e| match e {
                EngineEvent::CursorMoved {
                    mode: MenuMode::ListB,
                    index,
                    ..
                } => Some(*index),
                _ => None,
            })
            .collect();
        assert_eq!(emoji_moves, vec![4]);

        // one capture, triggered by doubleTap, three segments, yaw dominated
        assert_eq!(
            outcome
                .events()
                .filter(|e| matches!(e, EngineEvent::CaptureStarted))
                .count(),
            1
        );
        let segments: Vec<usize> = outcome
            .events()
            .filter_map(|e| match e {
                EngineEvent::SegmentRecorded { index, .. } => Some(*index),
                _ => None,
            })
            .collect();
        assert_eq!(segments, vec![0, 1, 2]);

        let gesture = outcome
            .reports
            .iter()
            .find_map(|r| r.gesture())
            .expect("gesture recognized");
        assert_eq!(gesture.label, Some(GestureLabel::Wave));
        assert_eq!(gesture.middle().delta.yaw, -9);
        assert_eq!(gesture.middle().delta.pitch, 0);

        assert_eq!(outcome.reports.iter().flat_map(|r| r.faults()).count(), 0);

        // every gesture pose vibrates; every pose keeps the device unlocked
        assert_eq!(outcome.recorded.vibrations(), 5);
        assert_eq!(outcome.recorded.len(), 15);
    }

    #[test]
    fn test_demo_session_metrics() {
        let outcome = run_session(
            Box::new(MockEventSource::demo()),
            BackpressureConfig::default(),
        );
        let mut aggregator = SessionMetricsAggregator::new();
        for report in &outcome.reports {
            observability::record_tick_report(report);
            aggregator.update(report);
        }

        let summary = aggregator.summary();
        assert_eq!(summary.total_ticks, outcome.reports.len() as u64);
        assert_eq!(summary.selections.get("list_a"), Some(&1));
        assert_eq!(summary.gestures.get("WAVE"), Some(&1));
        assert!(summary.faults.is_empty());
        assert_eq!(summary.cursor_moves, 3);
        assert!(summary.scroll_delay_ms.min >= 100.0);
    }

    #[test]
    fn test_recorded_session_replays_identically() {
        let mut demo = MockEventSource::demo();
        let mut writer = ReplayWriter::new(Vec::new());
        while let Some(batch) = demo.next_batch() {
            writer.write_batch(&batch).unwrap();
        }
        let bytes = writer.finish().unwrap();

        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), &bytes).unwrap();

        let live = run_session(
            Box::new(MockEventSource::demo()),
            BackpressureConfig::default(),
        );
        let replayed = run_session(
            Box::new(ReplayEventSource::from_path(file.path()).unwrap()),
            BackpressureConfig::default(),
        );
        let from_memory = run_session(
            Box::new(ReplayEventSource::from_reader(BufReader::new(bytes.as_slice())).unwrap()),
            BackpressureConfig::default(),
        );

        assert_eq!(live.reports.len(), replayed.reports.len());
        for (a, b) in live.reports.iter().zip(&replayed.reports) {
            assert_eq!(a.events, b.events, "tick {}", a.tick);
            assert_eq!(a.commands, b.commands, "tick {}", a.tick);
        }
        assert_eq!(replayed.selections(), from_memory.selections());
    }

    #[test]
    fn test_live_channel_session() {
        let (tx, source) = ingestion::channel("live", 16);
        tx.try_send(SensorEvent::ArmSync {
            arm: contracts::Arm::Right,
            direction: contracts::XDirection::TowardElbow,
        })
        .unwrap();
        tx.try_send(SensorEvent::Unlock).unwrap();
        tx.try_send(level()).unwrap();
        tx.try_send(SensorEvent::Pose {
            pose: contracts::Pose::WaveOut,
        })
        .unwrap();
        drop(tx);

        let outcome = run_session(Box::new(source), BackpressureConfig::default());
        assert_eq!(outcome.reports.len(), 1);
        assert_eq!(outcome.menu_changes(), vec![MenuMode::ListB]);
        assert_eq!(outcome.recorded.vibrations(), 1);
    }

    #[test]
    fn test_rate_limit_splits_pose_burst() {
        use contracts::Pose;

        // all poses arrive in one batch; released one per tick each becomes an edge
        let burst = vec![
            level(),
            SensorEvent::Pose { pose: Pose::WaveIn },
            SensorEvent::Pose { pose: Pose::Rest },
            SensorEvent::Pose {
                pose: Pose::WaveOut,
            },
        ];
        let source = MockEventSource::new("burst", vec![burst.clone()]);
        let outcome = run_session(
            Box::new(source),
            BackpressureConfig::new(16, 1, DropPolicy::DropOldest),
        );
        assert_eq!(outcome.reports.len(), 4);
        assert_eq!(
            outcome.menu_changes(),
            vec![MenuMode::ListA, MenuMode::ListB]
        );

        // unlimited release collapses the burst to its final pose
        let source = MockEventSource::new("burst", vec![burst]);
        let outcome = run_session(Box::new(source), BackpressureConfig::default());
        assert_eq!(outcome.reports.len(), 1);
        assert_eq!(outcome.menu_changes(), vec![MenuMode::ListB]);
    }

    #[tokio::test]
    async fn test_async_producer_feeds_engine() {
        let (tx, source) = ingestion::channel("async", 8);
        let producer = tokio::spawn(async move {
            tx.send(level()).await.unwrap();
            tx.send(SensorEvent::Pose {
                pose: contracts::Pose::WaveIn,
            })
            .await
            .unwrap();
        });
        producer.await.unwrap();

        let outcome = run_session(Box::new(source), BackpressureConfig::default());
        assert_eq!(outcome.menu_changes(), vec![MenuMode::ListA]);
    }
}

#[cfg(test)]
mod config_tests {
    use config_loader::{ConfigFormat, ConfigLoader};
    use contracts::{DeviceCommand, EngineEvent, MenuMode, Pose, SensorEvent};
    use feedback::FeedbackDispatcher;
    use gesture_engine::GestureEngine;
    use std::io::Write;

    const SESSION_TOML: &str = r#"
[device]
name = "armband"
tick_ms = 40

[capture]
trigger_pose = "double_tap"

[menu]
confirm_pose = "fingers_spread"

[menu.list_a]
name = "messages"
items = ["on my way", "running late", "call me"]

[[feedback]]
name = "capture"
feedback_type = "record"
"#;

    fn pose(pose: Pose) -> SensorEvent {
        SensorEvent::Pose { pose }
    }

    #[test]
    fn test_toml_session_drives_engine_and_feedback() {
        let blueprint = ConfigLoader::load_from_str(SESSION_TOML, ConfigFormat::Toml).unwrap();
        let mut engine = GestureEngine::new(blueprint.engine_config()).unwrap();
        let mut feedback = FeedbackDispatcher::from_configs(&blueprint.feedback).unwrap();
        assert_eq!(feedback.sink_names(), vec!["capture"]);

        let mut selected = Vec::new();
        for batch in [
            vec![SensorEvent::Orientation {
                quat: contracts::Quaternion::IDENTITY,
            }],
            vec![pose(Pose::WaveIn)],
            vec![pose(Pose::Rest)],
            vec![pose(Pose::FingersSpread)],
        ] {
            let report = engine.tick(&batch);
            feedback.dispatch_all(&report.commands);
            for (mode, index) in report.selections() {
                selected.push(engine.navigator().item(mode, index).map(str::to_string));
            }
        }

        // three items put the cursor on the second one
        assert_eq!(selected, vec![Some("running late".to_string())]);
        assert_eq!(engine.now_ms(), 160);
        assert_eq!(engine.navigator().mode(), MenuMode::Main);

        let recorded = feedback.recorded("capture").unwrap();
        assert_eq!(recorded.len(), 5);
        assert_eq!(recorded.last(), Some(&DeviceCommand::NotifyAction));
    }

    #[test]
    fn test_config_file_with_empty_list_is_rejected() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(b"[menu.list_b]\nname = \"emojis\"\nitems = []\n")
            .unwrap();
        assert!(ConfigLoader::load_from_path(file.path()).is_err());
    }

    #[test]
    fn test_missing_trigger_pose_disables_capture() {
        let blueprint = ConfigLoader::load_from_str(
            "[capture]\nsettle_delay_ms = 100\n",
            ConfigFormat::Toml,
        )
        .unwrap();
        let mut config = blueprint.engine_config();
        config.capture.trigger_pose = None;
        let mut engine = GestureEngine::new(config).unwrap();

        let report = engine.tick(&[pose(Pose::DoubleTap)]);
        assert!(!report.events.contains(&EngineEvent::CaptureStarted));
        assert!(!engine.capture_in_progress());
    }
}
