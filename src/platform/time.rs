//! Frame timing: a 60 Hz pacer that counts the simulation ticks due
//!
//! The schedule is kept in whole `Instant` deadlines, so an on-time host
//! gets exactly one tick per wait. A host that falls behind catches up with
//! several ticks, never more than `MAX_SUBSTEPS`.

use std::thread;
use std::time::{Duration, Instant};

use crate::consts::{FRAME_RATE, MAX_SUBSTEPS};

/// Sleeps the host loop to a steady frame rate
#[derive(Debug, Clone)]
pub struct FramePacer {
    frame: Duration,
    next: Instant,
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new(FRAME_RATE)
    }
}

impl FramePacer {
    /// The first frame is due immediately
    pub fn new(rate: u32) -> Self {
        Self {
            frame: Duration::from_secs(1) / rate.max(1),
            next: Instant::now(),
        }
    }

    /// Block until the next frame is due; returns how many ticks to run
    pub fn wait(&mut self) -> u32 {
        let now = Instant::now();
        if self.next > now {
            thread::sleep(self.next - now);
        }
        let woke = Instant::now().max(self.next);
        self.due(woke)
    }

    /// Consume every deadline up to `now`, at most `MAX_SUBSTEPS` of them
    fn due(&mut self, now: Instant) -> u32 {
        let mut ticks = 0;
        while self.next <= now && ticks < MAX_SUBSTEPS {
            self.next += self.frame;
            ticks += 1;
        }
        if self.next <= now {
            // Spiral of death: drop the backlog
            log::debug!("Frame pacer resynced after {:?} behind", now - self.next);
            self.next = now + self.frame;
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_tick_per_frame_on_schedule() {
        let mut pacer = FramePacer::new(60);
        let start = pacer.next;
        assert_eq!(pacer.due(start), 1);
        for i in 1..120u32 {
            // Waking a little late every frame never doubles up
            let woke = start + pacer.frame * i + Duration::from_micros(300);
            assert_eq!(pacer.due(woke), 1, "frame {i}");
        }
    }

    #[test]
    fn test_catch_up_is_capped() {
        let mut pacer = FramePacer::new(60);
        let start = pacer.next;
        assert_eq!(pacer.due(start + pacer.frame * 2), 3);

        let stall = pacer.next + pacer.frame * 50;
        assert_eq!(pacer.due(stall), MAX_SUBSTEPS);
        // Backlog dropped: the next deadline is one frame out
        assert_eq!(pacer.next, stall + pacer.frame);
        assert_eq!(pacer.due(stall), 0);
    }

    #[test]
    fn test_pacer_holds_rate() {
        let mut pacer = FramePacer::new(200);
        let start = Instant::now();
        let mut ticks = 0;
        for _ in 0..4 {
            let due = pacer.wait();
            assert!(due >= 1);
            ticks += due;
        }
        assert!(ticks >= 4);
        assert!(start.elapsed() >= Duration::from_millis(15));
    }
}
