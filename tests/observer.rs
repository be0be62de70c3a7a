mod tests {
    use myrtio_pattern_fader::{
        Duration, EventLog, FaderConfig, Instant, LevelLatch, PatternEngine, PatternEvent,
        PatternObserver, PatternProfile, Phase, Polarity,
    };

    fn config() -> FaderConfig {
        let idle = PatternProfile::new(
            Duration::from_millis(300),
            Duration::from_millis(300),
            Duration::from_millis(300),
            Duration::from_millis(500),
            150,
        );
        let mut config = FaderConfig::new(idle, Polarity::ActiveHigh);
        config.ramp_up = Duration::from_millis(1000);
        config.ramp_down = Duration::from_millis(2000);
        config
    }

    #[test]
    fn test_event_log_drops_oldest() {
        let mut log = EventLog::<4>::new();
        for excited in [true, false, true, false, true, false] {
            log.on_event(PatternEvent::ExcitementChanged(excited));
        }
        assert_eq!(log.len(), 4);
        assert_eq!(log.dropped(), 2);
        assert_eq!(log.pop(), Some(PatternEvent::ExcitementChanged(true)));

        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.dropped(), 0);
    }

    #[test]
    fn test_zero_capacity_log_counts_every_event() {
        let mut log = EventLog::<0>::new();
        log.on_event(PatternEvent::QuickRampEngaged);
        log.on_event(PatternEvent::ExcitementChanged(true));
        assert!(log.is_empty());
        assert_eq!(log.dropped(), 2);
    }

    #[test]
    fn test_engine_reports_blended_profile() {
        let mut engine = PatternEngine::with_observer(
            LevelLatch::default(),
            EventLog::<8>::new(),
            &config(),
            Instant::from_millis(0),
        );
        engine.advance(Instant::from_millis(0));
        assert!(engine.observer().is_empty());

        engine.set_excited(true);
        engine.advance(Instant::from_millis(100));
        let current = *engine.current_profile();
        assert!(current.fade_in < Duration::from_millis(300));

        let log = engine.observer_mut();
        assert_eq!(log.pop(), Some(PatternEvent::ExcitementChanged(true)));
        assert_eq!(log.pop(), Some(PatternEvent::ProfileBlended(current)));
        assert_eq!(log.pop(), None);
    }

    #[test]
    fn test_engine_reports_phase_changes_in_order() {
        let mut engine = PatternEngine::with_observer(
            LevelLatch::default(),
            EventLog::<8>::new(),
            &config(),
            Instant::from_millis(0),
        );
        for step in 0..=14u64 {
            engine.advance(Instant::from_millis(step * 100));
        }

        let transitions = [
            (Phase::Off, Phase::FadeIn),
            (Phase::FadeIn, Phase::On),
            (Phase::On, Phase::FadeOut),
            (Phase::FadeOut, Phase::Off),
        ];
        let log = engine.observer_mut();
        for (from, to) in transitions {
            assert_eq!(log.pop(), Some(PatternEvent::PhaseChanged { from, to }));
        }
        assert_eq!(log.pop(), None);
    }

    #[test]
    fn test_engine_reports_excitement_and_settling() {
        let mut engine = PatternEngine::with_observer(
            LevelLatch::default(),
            EventLog::<64>::new(),
            &config(),
            Instant::from_millis(0),
        );
        engine.set_excited(true);
        engine.set_excited(true);
        for step in 0..20u64 {
            engine.advance(Instant::from_millis(step * 100));
        }

        let log = engine.observer();
        let excitement = log
            .iter()
            .filter(|event| matches!(event, PatternEvent::ExcitementChanged(_)))
            .count();
        let settled = log
            .iter()
            .filter(|event| **event == PatternEvent::ProfileSettled { excited: true })
            .count();
        assert_eq!(excitement, 1);
        assert_eq!(settled, 1);
        assert_eq!(engine.current_profile(), engine.excited_profile());
    }

    #[test]
    fn test_quick_ramp_reported_once() {
        let mut config = config();
        config.quick_ramp = true;
        let mut engine = PatternEngine::with_observer(
            LevelLatch::default(),
            EventLog::<16>::new(),
            &config,
            Instant::from_millis(0),
        );
        engine.set_excited(true);
        for step in 0..5u64 {
            engine.advance(Instant::from_millis(step * 100));
        }

        let (_, log) = engine.into_parts();
        let engaged = log
            .iter()
            .filter(|event| **event == PatternEvent::QuickRampEngaged)
            .count();
        assert_eq!(engaged, 1);
        assert!(log.iter().any(|event| *event
            == PatternEvent::PhaseChanged {
                from: Phase::Off,
                to: Phase::On
            }));
    }
}
