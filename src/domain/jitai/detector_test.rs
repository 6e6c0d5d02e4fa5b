#[cfg(test)]
mod tests {
    use crate::domain::activity::{
        ActivitySnapshot, DailyCard, JournalEntry, Meeting, MiddayPulseCheck, SceneUsage,
    };
    use crate::domain::foundation::{SceneId, Timestamp};
    use crate::domain::jitai::{
        ConditionOperator, ConditionParams, DetectionSettings, JitaiRule, RuleAction,
        RuleCondition, SignalDetector, SignalType, SuggestedAction,
    };

    fn now() -> Timestamp {
        Timestamp::parse_rfc3339("2024-03-10T20:00:00Z").unwrap()
    }

    /// One check per day, oldest first, the last one today.
    fn checks(values: &[(u8, u8)]) -> Vec<DailyCard> {
        let n = values.len() as i64;
        values
            .iter()
            .enumerate()
            .map(|(i, (mood, craving))| {
                let at = now().minus_days(n - 1 - i as i64);
                DailyCard::with_pulse_check(MiddayPulseCheck::new(*mood, *craving, at).unwrap())
            })
            .collect()
    }

    /// Journaled yesterday and met two days ago: only the checks under test fire.
    fn quiet_snapshot() -> ActivitySnapshot {
        let mut snapshot = ActivitySnapshot::new();
        snapshot.journal_entries = vec![JournalEntry::new("ok day", now().minus_days(1))];
        snapshot.meetings = vec![Meeting::attended("Tuesday group", now().minus_days(2))];
        snapshot
    }

    fn types(signals: &[crate::domain::jitai::RiskSignal]) -> Vec<SignalType> {
        signals.iter().map(|s| s.signal_type).collect()
    }

    fn priority_rule(priority: u8) -> JitaiRule {
        JitaiRule::new(
            "Too many scenes",
            RuleCondition::SceneUsage(ConditionParams::new(
                ConditionOperator::GreaterThan,
                0.0,
                7,
            )),
            RuleAction {
                action_type: SuggestedAction::ContactSponsor,
                priority,
            },
            "You lean on scenes when things get heavy.",
        )
        .unwrap()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Built-in checks
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn three_high_cravings_fire_one_signal() {
        let mut snapshot = quiet_snapshot();
        snapshot.daily_cards = checks(&[(4, 8), (4, 9), (4, 7)]);

        let signals = SignalDetector::new().detect(&snapshot, now());

        assert_eq!(types(&signals), vec![SignalType::HighCravings]);
        let signal = &signals[0];
        assert_eq!(signal.inputs.count("days"), Some(3));
        assert_eq!(signal.inputs.number("avgCraving"), Some(8.0));
        assert_eq!(signal.severity, 32);
        assert_eq!(
            signal.suggested_actions,
            vec![
                SuggestedAction::ShowSafetyPlan,
                SuggestedAction::SuggestMeeting,
                SuggestedAction::SuggestTool,
            ]
        );
        assert_eq!(
            signal.explanation(),
            "Your cravings have averaged 8/10 for 3 nights in a row."
        );
    }

    #[test]
    fn cravings_need_enough_high_samples() {
        let mut snapshot = quiet_snapshot();
        snapshot.daily_cards = checks(&[(4, 8), (4, 3), (4, 9)]);
        assert!(SignalDetector::new().detect(&snapshot, now()).is_empty());
    }

    #[test]
    fn cravings_need_enough_samples_in_window() {
        let mut snapshot = quiet_snapshot();
        snapshot.daily_cards = checks(&[(4, 9), (4, 9)]);
        assert!(SignalDetector::new().high_cravings(&snapshot, now()).is_none());
    }

    #[test]
    fn old_cravings_fall_out_of_lookback() {
        let mut snapshot = quiet_snapshot();
        // the first high check is four days old, leaving one high sample in the window
        snapshot.daily_cards = checks(&[(4, 9), (4, 9), (4, 2), (4, 2), (4, 2)]);
        assert!(SignalDetector::new().high_cravings(&snapshot, now()).is_none());
    }

    #[test]
    fn low_mood_fires_with_average() {
        let mut snapshot = quiet_snapshot();
        snapshot.daily_cards = checks(&[(1, 2), (2, 2), (1, 2)]);

        let signal = SignalDetector::new().low_mood(&snapshot, now()).unwrap();

        assert_eq!(signal.signal_type, SignalType::LowMood);
        assert_eq!(signal.inputs.count("days"), Some(3));
        assert_eq!(signal.inputs.number("avgMood"), Some(1.3));
        // (6 - 1.333) / 5 * 30 = 28
        assert_eq!(signal.severity, 28);
    }

    #[test]
    fn meeting_ten_days_ago_is_skipped() {
        let mut snapshot = quiet_snapshot();
        snapshot.meetings = vec![Meeting::attended("Home group", now().minus_days(10))];

        let signals = SignalDetector::new().detect(&snapshot, now());

        assert_eq!(types(&signals), vec![SignalType::SkippedMeetings]);
        let signal = &signals[0];
        assert_eq!(signal.inputs.count("gapDays"), Some(10));
        assert_eq!(
            signal.inputs.text("lastMeetingISO"),
            Some(now().minus_days(10).to_iso_string().as_str())
        );
        assert_eq!(signal.severity, 20);
        assert_eq!(signal.suggested_actions, vec![SuggestedAction::SuggestMeeting]);
    }

    #[test]
    fn meeting_gap_threshold_is_inclusive() {
        let detector = SignalDetector::new();
        let mut snapshot = quiet_snapshot();

        snapshot.meetings = vec![Meeting::attended("Home group", now().minus_days(7))];
        let signal = detector.skipped_meetings(&snapshot, now()).unwrap();
        assert_eq!(signal.inputs.count("gapDays"), Some(7));
        assert_eq!(signal.severity, 20);

        snapshot.meetings = vec![Meeting::attended("Home group", now().minus_days(6))];
        assert!(detector.skipped_meetings(&snapshot, now()).is_none());

        // 6 days 23 hours truncates to 6
        snapshot.meetings = vec![Meeting::attended("Home group", now().minus_days(6).minus_hours(23))];
        assert!(detector.skipped_meetings(&snapshot, now()).is_none());
    }

    #[test]
    fn undated_meetings_never_count_as_skipped() {
        let mut snapshot = quiet_snapshot();
        snapshot.meetings = vec![Meeting::undated("Someday")];
        assert!(SignalDetector::new().skipped_meetings(&snapshot, now()).is_none());
    }

    #[test]
    fn no_recent_journal_is_isolation() {
        let mut snapshot = quiet_snapshot();
        snapshot.journal_entries = vec![JournalEntry::new("long ago", now().minus_days(5))];

        let signals = SignalDetector::new().detect(&snapshot, now());

        assert_eq!(types(&signals), vec![SignalType::Isolation]);
        assert!(signals[0].severity >= 20);
        assert_eq!(signals[0].inputs.count("days"), Some(3));
    }

    #[test]
    fn frequent_scene_usage_is_a_trigger() {
        let scene = SceneId::new();
        let mut snapshot = quiet_snapshot();
        snapshot.scene_usages = (0..3)
            .map(|d| SceneUsage::new(scene, now().minus_days(d)))
            .collect();

        let signals = SignalDetector::new().detect(&snapshot, now());

        assert_eq!(types(&signals), vec![SignalType::TriggerScene]);
        assert_eq!(signals[0].inputs.count("count"), Some(3));
        assert_eq!(signals[0].inputs.count("days"), Some(7));
        assert_eq!(signals[0].severity, 10);
        assert_eq!(signals[0].suggested_actions, vec![SuggestedAction::OpenScene]);
    }

    #[test]
    fn scene_window_start_is_inclusive() {
        let detector = SignalDetector::new();
        let scene = SceneId::new();
        let mut snapshot = quiet_snapshot();

        snapshot.scene_usages = vec![
            SceneUsage::new(scene, now().minus_days(7)),
            SceneUsage::new(scene, now().minus_days(3)),
            SceneUsage::new(scene, now()),
        ];
        let signal = detector.frequent_scene_usage(&snapshot, now()).unwrap();
        assert_eq!(signal.inputs.count("count"), Some(3));

        snapshot.scene_usages[0] = SceneUsage::new(scene, now().minus_days(7).minus_hours(1));
        assert!(detector.frequent_scene_usage(&snapshot, now()).is_none());
    }

    // ─────────────────────────────────────────────────────────────────────
    // Custom rules
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn matching_rule_emits_custom_signal() {
        let mut snapshot = quiet_snapshot();
        let rule = priority_rule(3);
        snapshot.jitai_rules = vec![rule.clone()];

        let signals = SignalDetector::new().detect(&snapshot, now());

        assert_eq!(types(&signals), vec![SignalType::Custom]);
        let signal = &signals[0];
        assert_eq!(signal.severity, 30);
        assert_eq!(signal.inputs.text("ruleId"), Some(rule.id.to_string().as_str()));
        assert_eq!(signal.inputs.text("ruleName"), Some("Too many scenes"));
        assert_eq!(signal.inputs.text("conditionType"), Some("scene-usage"));
        assert_eq!(signal.suggested_actions, vec![SuggestedAction::ContactSponsor]);
        assert_eq!(signal.explanation(), "You lean on scenes when things get heavy.");
    }

    #[test]
    fn rule_priority_severity_is_clamped() {
        let detector = SignalDetector::with_settings(DetectionSettings {
            rule_priority_weight: 15,
            ..DetectionSettings::default()
        });
        let signal = detector
            .rule_signal(&priority_rule(10), &quiet_snapshot(), now())
            .unwrap();
        assert_eq!(signal.severity, 100);
    }

    #[test]
    fn disabled_rule_emits_nothing() {
        let mut snapshot = quiet_snapshot();
        let mut rule = priority_rule(3);
        rule.disable();
        snapshot.jitai_rules = vec![rule];
        assert!(SignalDetector::new().detect(&snapshot, now()).is_empty());
    }

    // ─────────────────────────────────────────────────────────────────────
    // Whole pass
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn empty_snapshot_only_reports_isolation() {
        let signals = SignalDetector::new().detect(&ActivitySnapshot::new(), now());
        assert_eq!(types(&signals), vec![SignalType::Isolation]);
    }

    #[test]
    fn built_ins_come_first_then_rules_in_stored_order() {
        let scene = SceneId::new();
        let mut snapshot = ActivitySnapshot::new();
        snapshot.daily_cards = checks(&[(1, 9), (2, 8), (1, 10)]);
        snapshot.meetings = vec![Meeting::attended("Home group", now().minus_days(12))];
        snapshot.scene_usages = (0..4)
            .map(|d| SceneUsage::new(scene, now().minus_days(d)))
            .collect();
        let first = priority_rule(1);
        let second = JitaiRule {
            name: "Second".into(),
            ..priority_rule(2)
        };
        snapshot.jitai_rules = vec![first, second];

        let signals = SignalDetector::new().detect(&snapshot, now());

        assert_eq!(
            types(&signals),
            vec![
                SignalType::HighCravings,
                SignalType::LowMood,
                SignalType::SkippedMeetings,
                SignalType::Isolation,
                SignalType::TriggerScene,
                SignalType::Custom,
                SignalType::Custom,
            ]
        );
        assert_eq!(signals[5].inputs.text("ruleName"), Some("Too many scenes"));
        assert_eq!(signals[6].inputs.text("ruleName"), Some("Second"));
    }

    #[test]
    fn detection_is_repeatable_with_fresh_ids() {
        let mut snapshot = ActivitySnapshot::new();
        snapshot.daily_cards = checks(&[(1, 9), (2, 8), (1, 10)]);
        let detector = SignalDetector::new();

        let first = detector.detect(&snapshot, now());
        let second = detector.detect(&snapshot, now());

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.signal_type, b.signal_type);
            assert_eq!(a.severity, b.severity);
            assert_eq!(a.inputs, b.inputs);
            assert_eq!(a.detected_at, b.detected_at);
            assert_ne!(a.id, b.id);
        }
    }

    #[test]
    fn every_severity_stays_in_range() {
        let mut snapshot = ActivitySnapshot::new();
        snapshot.daily_cards = checks(&[(1, 10), (1, 10), (1, 10), (1, 10)]);
        snapshot.meetings = vec![Meeting::attended("Home group", now().minus_days(60))];
        snapshot.jitai_rules = vec![priority_rule(10)];

        for signal in SignalDetector::new().detect(&snapshot, now()) {
            assert!(signal.severity <= 100);
            assert!(signal.detected_at == now());
        }
    }
}
