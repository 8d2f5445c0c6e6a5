//! Helpers for the game loop

use std::time::{Duration, Instant};

/// One simulation tick per frame, so the frame rate is also the game speed
pub fn frame_duration(target_fps: u64) -> Duration {
    Duration::from_nanos(1_000_000_000 / target_fps.max(1))
}

/// Apply frame rate limiting to maintain consistent game speed.
///
/// Call at the end of each loop iteration: sleeps for whatever is left of `frame`
/// since `frame_start`. A frame that ran long is not made up for.
pub fn limit_frame_rate(frame_start: Instant, frame: Duration) {
    let elapsed = frame_start.elapsed();
    if elapsed < frame {
        std::thread::sleep(frame - elapsed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_duration() {
        assert_eq!(frame_duration(50), Duration::from_millis(20));
        assert_eq!(frame_duration(0), Duration::from_secs(1));
    }

    #[test]
    fn test_late_frame_does_not_sleep() {
        let start = Instant::now() - Duration::from_millis(50);
        let before = Instant::now();
        limit_frame_rate(start, Duration::from_millis(16));
        assert!(before.elapsed() < Duration::from_millis(16));
    }
}
