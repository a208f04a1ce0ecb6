mod common;

mod tests {
    use crate::common::ms;
    use myrtio_blossom::{Duration, TouchClassifier, TouchEvent, TouchSensor, TouchTimings};

    /// Touch held for `press_ms` with an interrupt edge every 20 ms, polled
    /// every 10 ms until `until_ms`
    fn press(press_ms: u64, until_ms: u64) -> Vec<(u64, TouchEvent)> {
        let sensor = TouchSensor::new();
        let mut classifier = TouchClassifier::new(&sensor, TouchTimings::default());
        let mut events = Vec::new();
        for t in (0..=until_ms).step_by(10) {
            if t <= press_ms && t % 20 == 0 {
                sensor.on_edge(ms(t));
            }
            for event in classifier.poll(ms(t)) {
                events.push((t, event));
            }
        }
        events
    }

    fn kinds(events: &[(u64, TouchEvent)]) -> Vec<TouchEvent> {
        events.iter().map(|(_, event)| *event).collect()
    }

    #[test]
    fn test_long_touch() {
        let events = press(2500, 3000);
        assert_eq!(
            kinds(&events),
            vec![TouchEvent::Down, TouchEvent::Long, TouchEvent::Up]
        );
        assert_eq!(events[0].0, 0);
        assert_eq!(events[1].0, 2010);
        assert_eq!(events[2].0, 2580);
    }

    #[test]
    fn test_hold_touch() {
        let events = press(5500, 6000);
        assert_eq!(
            kinds(&events),
            vec![
                TouchEvent::Down,
                TouchEvent::Long,
                TouchEvent::Hold,
                TouchEvent::Up
            ]
        );
        assert_eq!(events[2].0, 5010);
    }

    #[test]
    fn test_short_tap() {
        let sensor = TouchSensor::new();
        let mut classifier = TouchClassifier::new(&sensor, TouchTimings::default());
        sensor.on_edge(ms(0));
        sensor.on_edge(ms(10));

        let events = classifier.poll(ms(100));
        assert_eq!(events.as_slice(), &[TouchEvent::Down, TouchEvent::Up]);
        assert!(!classifier.is_pressed());
    }

    #[test]
    fn test_no_events_without_touch() {
        let sensor = TouchSensor::new();
        let mut classifier = TouchClassifier::new(&sensor, TouchTimings::default());
        assert!(classifier.poll(ms(0)).is_empty());
        assert!(classifier.poll(ms(10_000)).is_empty());
        assert!(classifier.is_armed());
    }

    #[test]
    fn test_down_reported_once_while_pressed() {
        let events = press(1000, 1100);
        let downs = events
            .iter()
            .filter(|(_, event)| *event == TouchEvent::Down)
            .count();
        assert_eq!(downs, 1);
    }

    #[test]
    fn test_cooldown_ignores_edges() {
        let sensor = TouchSensor::new();
        let mut classifier = TouchClassifier::new(&sensor, TouchTimings::default());

        sensor.on_edge(ms(0));
        assert_eq!(classifier.poll(ms(0)).as_slice(), &[TouchEvent::Down]);
        assert_eq!(classifier.poll(ms(80)).as_slice(), &[TouchEvent::Up]);

        sensor.on_edge(ms(100));
        assert!(!classifier.is_pressed());
        assert!(classifier.poll(ms(200)).is_empty());
        assert!(!classifier.is_armed());

        assert!(classifier.poll(ms(381)).is_empty());
        assert!(classifier.is_armed());

        sensor.on_edge(ms(400));
        assert_eq!(classifier.poll(ms(400)).as_slice(), &[TouchEvent::Down]);
    }

    #[test]
    fn test_cooldown_boundary_is_exclusive() {
        let sensor = TouchSensor::new();
        let mut classifier = TouchClassifier::new(&sensor, TouchTimings::default());

        sensor.on_edge(ms(0));
        classifier.poll(ms(0));
        classifier.poll(ms(80));

        classifier.poll(ms(380));
        assert!(!classifier.is_armed());
        classifier.poll(ms(381));
        assert!(classifier.is_armed());
    }

    #[test]
    fn test_outside_touch() {
        let sensor = TouchSensor::new();
        let mut classifier = TouchClassifier::new(&sensor, TouchTimings::default());

        sensor.register_outside_touch(ms(50));
        assert!(classifier.is_pressed());
        assert_eq!(classifier.poll(ms(60)).as_slice(), &[TouchEvent::Down]);
        assert_eq!(classifier.poll(ms(200)).as_slice(), &[TouchEvent::Up]);
    }

    #[test]
    fn test_custom_timings() {
        let sensor = TouchSensor::new();
        let timings = TouchTimings {
            long: Duration::from_millis(100),
            ..TouchTimings::default()
        };
        let mut classifier = TouchClassifier::new(&sensor, timings);

        sensor.on_edge(ms(0));
        sensor.on_edge(ms(60));
        sensor.on_edge(ms(120));
        assert_eq!(
            classifier.poll(ms(150)).as_slice(),
            &[TouchEvent::Down, TouchEvent::Long]
        );
    }
}
