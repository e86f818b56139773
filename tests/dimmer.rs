mod tests {
    use embassy_time::{Duration, Instant};
    use ws2811_light_dimmer::{DimmerConfig, DimmerState, LightDimmer};

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    fn ms(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    #[test]
    fn test_turn_on_ramp() {
        // rise=250, fall=250, on=200, period=900, max=255
        let mut dimmer = LightDimmer::new();
        dimmer.turn_on(at(0));
        assert_eq!(dimmer.state(), DimmerState::Rising);

        // 255 * 100 / 250, truncated
        assert_eq!(dimmer.advance(at(100)), 102);
        assert_eq!(dimmer.state(), DimmerState::Rising);

        assert_eq!(dimmer.advance(at(250)), 255);
        assert_eq!(dimmer.state(), DimmerState::On);

        // Ramp completion pre-schedules the next blink edge at
        // 250 + 900 - 200 - 250 - 250 = 450, observable once blinking.
        dimmer.start_blink();
        assert_eq!(dimmer.advance(at(449)), 255);
        assert_eq!(dimmer.state(), DimmerState::On);
        assert_eq!(dimmer.advance(at(450)), 255);
        assert_eq!(dimmer.state(), DimmerState::Falling);
        assert_eq!(dimmer.advance(at(575)), 128);
    }

    #[test]
    fn test_rising_monotone() {
        let mut dimmer = LightDimmer::new();
        dimmer.turn_on(at(0));

        let mut previous = 0;
        for now in 0..=250 {
            let level = dimmer.advance(at(now));
            assert!(level >= previous);
            assert!(level <= dimmer.max_level());
            previous = level;
        }
        assert_eq!(previous, 255);
    }

    #[test]
    fn test_falling_monotone() {
        let mut dimmer = LightDimmer::new();
        dimmer.force_full(255, at(0));
        dimmer.advance(at(0));
        dimmer.turn_off(at(0));

        let mut previous = 255;
        for now in 0..=250 {
            let level = dimmer.advance(at(now));
            assert!(level <= previous);
            previous = level;
        }
        assert_eq!(previous, 0);
        assert_eq!(dimmer.state(), DimmerState::Off);
    }

    #[test]
    fn test_turn_on_noop_when_rising() {
        let mut dimmer = LightDimmer::new();
        dimmer.turn_on(at(0));
        assert_eq!(dimmer.advance(at(100)), 102);

        // A second turn_on must not restart the ramp.
        dimmer.turn_on(at(100));
        assert_eq!(dimmer.advance(at(200)), 204);
        assert_eq!(dimmer.advance(at(250)), 255);
    }

    #[test]
    fn test_turn_on_noop_when_on() {
        let mut dimmer = LightDimmer::new();
        dimmer.force_full(255, at(0));
        assert_eq!(dimmer.advance(at(0)), 255);
        assert!(dimmer.is_on());

        dimmer.turn_on(at(500));
        assert!(dimmer.is_on());
        assert_eq!(dimmer.advance(at(1000)), 255);
    }

    #[test]
    fn test_proportional_reversal_from_falling() {
        let mut dimmer = LightDimmer::new();
        dimmer.set_rise_time(ms(200));
        dimmer.set_fall_time(ms(400));
        dimmer.force_full(255, at(0));
        dimmer.advance(at(0));

        dimmer.turn_off(at(0));
        assert_eq!(dimmer.state(), DimmerState::Falling);

        // Half of the fall remains at t=200; the reversed rise must take
        // half of rise_time, completing at 200 + 100 = 300.
        dimmer.turn_on(at(200));
        assert_eq!(dimmer.state(), DimmerState::Rising);
        assert_eq!(dimmer.advance(at(250)), 191); // 255 * 150 / 200
        assert_eq!(dimmer.advance(at(300)), 255);
        assert_eq!(dimmer.state(), DimmerState::On);
    }

    #[test]
    fn test_proportional_reversal_from_rising() {
        let mut dimmer = LightDimmer::new();
        dimmer.set_rise_time(ms(400));
        dimmer.set_fall_time(ms(200));

        dimmer.turn_on(at(0));
        // Half of the rise remains at t=200; the reversed fall completes
        // at 200 + 100 = 300.
        dimmer.turn_off(at(200));
        assert_eq!(dimmer.state(), DimmerState::Falling);
        assert_eq!(dimmer.advance(at(300)), 0);
        assert_eq!(dimmer.state(), DimmerState::Off);
    }

    #[test]
    fn test_force_full_is_zero_duration_rise() {
        let mut dimmer = LightDimmer::new();
        dimmer.force_full(180, at(1000));
        assert_eq!(dimmer.state(), DimmerState::Rising);

        assert_eq!(dimmer.advance(at(1000)), 180);
        assert!(dimmer.is_on());
        assert!(!dimmer.is_blinking());
    }

    #[test]
    fn test_start_blink_refused_when_period_too_short() {
        let mut dimmer = LightDimmer::new();
        // rise 250 + on 200 + fall 250 = 700 > 500
        dimmer.set_period(ms(500));
        dimmer.start_blink();
        assert!(!dimmer.is_blinking());

        // The channel stays dark: no rise edge is ever scheduled.
        assert_eq!(dimmer.advance(at(10_000)), 0);
        assert!(dimmer.is_off());
    }

    #[test]
    fn test_start_blink_accepted_at_exact_fit() {
        let mut dimmer = LightDimmer::new();
        dimmer.set_period(ms(700));
        dimmer.start_blink();
        assert!(dimmer.is_blinking());
    }

    #[test]
    fn test_blink_cycle() {
        let mut dimmer = LightDimmer::new();
        dimmer.start_blink();

        // First cycle: rise 0..250, on until 450, fall until 700, dark until 900.
        assert_eq!(dimmer.advance(at(0)), 0);
        assert_eq!(dimmer.state(), DimmerState::Rising);
        assert_eq!(dimmer.advance(at(125)), 127);
        assert_eq!(dimmer.advance(at(250)), 255);
        assert_eq!(dimmer.state(), DimmerState::On);
        assert_eq!(dimmer.advance(at(449)), 255);
        assert_eq!(dimmer.advance(at(450)), 255);
        assert_eq!(dimmer.state(), DimmerState::Falling);
        assert_eq!(dimmer.advance(at(575)), 128);
        assert_eq!(dimmer.advance(at(700)), 0);
        assert_eq!(dimmer.state(), DimmerState::Off);
        assert_eq!(dimmer.advance(at(899)), 0);

        // Next cycle starts one period after the first.
        assert_eq!(dimmer.advance(at(900)), 0);
        assert_eq!(dimmer.state(), DimmerState::Rising);
        assert_eq!(dimmer.advance(at(1150)), 255);
        assert_eq!(dimmer.state(), DimmerState::On);
    }

    #[test]
    fn test_stop_blink_settles() {
        let mut dimmer = LightDimmer::new();
        dimmer.start_blink();
        assert_eq!(dimmer.advance(at(0)), 0);
        assert_eq!(dimmer.advance(at(250)), 255);
        assert!(dimmer.is_on());

        dimmer.stop_blink();
        assert!(!dimmer.is_blinking());
        assert!(dimmer.is_on());
        assert_eq!(dimmer.advance(at(60_000)), 255);
        assert!(dimmer.is_on());
    }

    #[test]
    fn test_turn_on_cancels_blink() {
        let mut dimmer = LightDimmer::new();
        dimmer.start_blink();
        assert!(dimmer.is_blinking());
        dimmer.turn_on(at(0));
        assert!(!dimmer.is_blinking());
    }

    #[test]
    fn test_ramp_times_clamped() {
        let mut dimmer = LightDimmer::new();
        dimmer.set_rise_time(ms(0));
        dimmer.set_fall_time(ms(0));
        assert_eq!(dimmer.rise_time(), ms(1));
        assert_eq!(dimmer.fall_time(), ms(1));
    }

    #[test]
    fn test_configure_round_trip() {
        let mut dimmer = LightDimmer::new();
        dimmer.configure(&DimmerConfig {
            max_level: 100,
            rise_time: ms(0),
            fall_time: ms(40),
            on_time: ms(30),
            period: ms(500),
        });
        assert_eq!(dimmer.max_level(), 100);
        assert_eq!(dimmer.rise_time(), ms(1)); // clamped
        assert_eq!(dimmer.fall_time(), ms(40));
        assert_eq!(dimmer.on_time(), ms(30));
        assert_eq!(dimmer.period(), ms(500));
    }

    #[test]
    fn test_advance_bounded_by_max_level() {
        let mut dimmer = LightDimmer::new();
        dimmer.set_max_level(60);
        dimmer.turn_on(at(0));
        for now in (0..400).step_by(7) {
            assert!(dimmer.advance(at(now)) <= 60);
        }
    }
}
