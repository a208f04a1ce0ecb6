mod common;

mod tests {
    use crate::common::{MockActuator, ms};
    use myrtio_blossom::animation::Animations;
    use myrtio_blossom::{Calibration, Duration, Instant, PetalController};

    const CALIBRATION: Calibration = Calibration {
        closed_angle: 1000,
        open_angle: 2000,
        calibrated: true,
        hardware_revision: 7,
    };

    fn setup() -> (Animations, PetalController<MockActuator>) {
        (
            Animations::new(),
            PetalController::new(MockActuator::default(), CALIBRATION),
        )
    }

    fn advance(
        animations: &mut Animations,
        petals: &mut PetalController<MockActuator>,
        now: Instant,
    ) {
        animations.tick(now, |update| petals.on_update(update, now));
        petals.handle_timers(now);
    }

    #[test]
    fn test_starts_closed_and_unpowered() {
        let (_, petals) = setup();
        assert_eq!(petals.target_open_level(), None);
        assert_eq!(petals.current_angle(), 1000);
        assert_eq!(petals.driver().angles, vec![1000]);
        assert_eq!(petals.driver().power, vec![false]);
        assert!(!petals.is_powered());
        assert!(petals.is_calibrated());
    }

    #[test]
    fn test_moves_linearly_to_level() {
        let (mut animations, mut petals) = setup();
        assert!(petals.set_open_level(&mut animations, 50, Duration::from_millis(1000), ms(0)));
        assert_eq!(petals.target_open_level(), Some(50));
        assert_eq!(petals.target_angle(), 1500);

        advance(&mut animations, &mut petals, ms(500));
        assert!(petals.is_moving(&animations));
        assert_eq!(petals.current_angle(), 1250);
        assert_eq!(petals.driver().last_angle(), Some(1250));
        assert_eq!(petals.current_open_level(&animations), Some(25));
        assert!(petals.is_powered());

        advance(&mut animations, &mut petals, ms(1000));
        assert!(!petals.is_moving(&animations));
        assert_eq!(petals.current_angle(), 1500);
        assert_eq!(petals.current_open_level(&animations), Some(50));
    }

    #[test]
    fn test_same_level_does_not_restart_move() {
        let (mut animations, mut petals) = setup();
        petals.set_open_level(&mut animations, 80, Duration::from_millis(1000), ms(0));
        advance(&mut animations, &mut petals, ms(500));

        assert!(!petals.set_open_level(&mut animations, 80, Duration::from_millis(1000), ms(500)));

        advance(&mut animations, &mut petals, ms(750));
        assert_eq!(petals.current_angle(), 1600);

        advance(&mut animations, &mut petals, ms(1000));
        assert!(!petals.is_moving(&animations));
        assert_eq!(petals.current_angle(), 1800);
    }

    #[test]
    fn test_new_level_starts_from_current_angle() {
        let (mut animations, mut petals) = setup();
        petals.set_open_level(&mut animations, 100, Duration::from_millis(1000), ms(0));
        advance(&mut animations, &mut petals, ms(500));
        assert_eq!(petals.current_angle(), 1500);

        petals.set_open_level(&mut animations, 0, Duration::from_millis(1000), ms(500));
        advance(&mut animations, &mut petals, ms(1000));
        assert_eq!(petals.current_angle(), 1250);

        advance(&mut animations, &mut petals, ms(1500));
        assert_eq!(petals.current_angle(), 1000);
    }

    #[test]
    fn test_full_level_snaps_to_open_angle() {
        let (mut animations, mut petals) = setup();
        petals.set_open_level(&mut animations, 150, Duration::from_millis(0), ms(0));
        assert_eq!(petals.target_open_level(), Some(100));
        assert_eq!(petals.target_angle(), 2000);

        advance(&mut animations, &mut petals, ms(0));
        assert_eq!(petals.current_angle(), 2000);
        assert!(!petals.is_moving(&animations));
    }

    #[test]
    fn test_powers_down_after_settle_delay() {
        let (mut animations, mut petals) = setup();
        petals.set_open_level(&mut animations, 30, Duration::from_millis(200), ms(0));
        advance(&mut animations, &mut petals, ms(100));
        assert!(petals.driver().is_powered());

        advance(&mut animations, &mut petals, ms(200));
        advance(&mut animations, &mut petals, ms(700));
        assert!(petals.is_powered());

        advance(&mut animations, &mut petals, ms(701));
        assert!(!petals.is_powered());
        assert_eq!(petals.driver().power, vec![false, true, false]);
    }

    #[test]
    fn test_inverted_calibration() {
        let calibration = Calibration {
            closed_angle: 2000,
            open_angle: 1000,
            ..CALIBRATION
        };
        let mut animations = Animations::new();
        let mut petals = PetalController::new(MockActuator::default(), calibration);

        petals.set_open_level(&mut animations, 40, Duration::from_millis(100), ms(0));
        assert_eq!(petals.target_angle(), 1600);

        advance(&mut animations, &mut petals, ms(50));
        assert_eq!(petals.current_angle(), 1800);
        assert_eq!(petals.current_open_level(&animations), Some(20));
    }

    #[test]
    fn test_uncalibrated_moves_without_bounds() {
        let calibration = Calibration {
            calibrated: false,
            ..CALIBRATION
        };
        let mut animations = Animations::new();
        let mut petals = PetalController::new(MockActuator::default(), calibration);
        assert!(!petals.is_calibrated());

        petals.set_open_level(&mut animations, 100, Duration::from_millis(100), ms(0));
        advance(&mut animations, &mut petals, ms(100));
        assert_eq!(petals.driver().last_angle(), Some(2000));
    }
}
