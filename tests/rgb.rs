mod tests {
    use myrtio_pattern_fader::{
        Channel, Duration, FaderConfig, Instant, OutputDriver, PatternProfile, Phase, Polarity,
        Rgb, RgbFader,
    };

    #[derive(Default)]
    struct RecordingDriver {
        last: Option<Rgb>,
        frames: usize,
    }

    impl OutputDriver for RecordingDriver {
        fn write(&mut self, colors: &[Rgb]) {
            assert_eq!(colors.len(), 1);
            self.last = Some(colors[0]);
            self.frames += 1;
        }
    }

    fn config(polarity: Polarity) -> FaderConfig {
        let idle = PatternProfile::new(
            Duration::from_millis(1500),
            Duration::from_millis(2000),
            Duration::from_millis(1500),
            Duration::from_millis(3000),
            polarity.full_level() / 2 + 1,
        );
        FaderConfig::new(idle, polarity)
    }

    #[test]
    fn test_idle_fader_starts_dark() {
        let mut fader = RgbFader::new(
            RecordingDriver::default(),
            &config(Polarity::ActiveHigh),
            Instant::from_millis(0),
        );
        fader.advance(Instant::from_millis(0));
        assert_eq!(fader.driver().last, Some(Rgb { r: 0, g: 0, b: 0 }));
        assert_eq!(fader.driver().frames, 1);
    }

    #[test]
    fn test_active_low_dark_is_full_level() {
        let mut fader = RgbFader::new(
            RecordingDriver::default(),
            &config(Polarity::ActiveLow),
            Instant::from_millis(0),
        );
        fader.advance(Instant::from_millis(0));
        assert_eq!(fader.pixel(), Rgb {
            r: 255,
            g: 255,
            b: 255
        });
    }

    #[test]
    fn test_channels_are_excited_independently() {
        let mut config = config(Polarity::ActiveHigh);
        config.quick_ramp = true;
        let mut fader = RgbFader::new(RecordingDriver::default(), &config, Instant::from_millis(0));

        fader.set_excited(Channel::Red, true);
        fader.advance(Instant::from_millis(100));

        assert_eq!(fader.driver().last, Some(Rgb { r: 255, g: 0, b: 0 }));
        assert_eq!(fader.engine(Channel::Red).phase(), Phase::On);
        assert_eq!(fader.engine(Channel::Green).phase(), Phase::Off);
        assert!(!fader.engine(Channel::Blue).is_excited());
    }

    #[test]
    fn test_jitter_seeds_differ_per_channel() {
        let mut config = config(Polarity::ActiveHigh);
        config.jitter_seed = Some(7);
        let now = Instant::from_millis(60_000);
        let fader = RgbFader::new(RecordingDriver::default(), &config, now);

        let starts = Channel::ALL.map(|channel| fader.engine(channel).phase_start());
        assert!(starts.iter().all(|start| *start <= now));
        assert!(starts[0] != starts[1] || starts[1] != starts[2]);
    }
}
