#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::Time;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn test_time_new() {
        let time = Time::new();
        assert_eq!(time.delta(), Duration::default());
    }

    #[test]
    fn test_time_update() {
        let mut time = Time::new();

        // Sleep to allow some time to pass
        sleep(Duration::from_millis(10));

        time.update();
        assert!(time.delta() >= Duration::from_millis(10));
    }

    #[test]
    fn test_delta_measures_since_last_update() {
        let mut time = Time::new();
        sleep(Duration::from_millis(20));
        time.update();

        // An immediate second update only sees the time since the first
        time.update();
        assert!(time.delta() < Duration::from_millis(20));
    }
}
