//! Playback state machine - run state, frame cursor, and advance cadence.

use crate::error::SheetError;

/// Playback state for one instance: stopped or running, a current-frame
/// cursor, and an "advance every N queries" cadence.
///
/// The cursor is normalized modulo the live frame count on every query, so a
/// mode's frame list shrinking out from under a running animation can never
/// index out of range - the cursor just wraps into the new, smaller range.
#[derive(Debug, Clone)]
pub struct Animation {
    running: bool,
    advance_every: u32,
    advance_count: u32,
    current_frame: usize,
}

impl Default for Animation {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Animation {
    /// A stopped animation at frame zero, advancing once per `advance_every`
    /// queries. An `advance_every` of 1 advances on every query.
    pub fn new(advance_every: u32) -> Self {
        Self {
            running: false,
            advance_every,
            advance_count: 0,
            current_frame: 0,
        }
    }

    pub fn running(&self) -> bool {
        self.running
    }

    /// Begin playback. The cadence counter resets; the current frame is
    /// preserved.
    pub fn start(&mut self) {
        self.advance_count = 0;
        self.running = true;
    }

    /// Begin playback without resetting anything.
    pub fn resume(&mut self) {
        self.running = true;
    }

    /// Begin playback from frame zero.
    pub fn restart(&mut self) {
        self.advance_count = 0;
        self.current_frame = 0;
        self.running = true;
    }

    /// Stop playback and rewind to frame zero.
    pub fn reset(&mut self) {
        self.advance_count = 0;
        self.current_frame = 0;
        self.running = false;
    }

    /// Stop playback in place. The current frame and cadence counter are
    /// preserved, so a later `start` picks up where playback left off.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Resolve the frame to show for this query and, while running, advance
    /// the cadence.
    ///
    /// The cursor is first normalized modulo `frame_count`. While running,
    /// the cadence counter then increments; when it completes a full
    /// `advance_every` cycle the cursor moves one frame ahead (wrapping) and
    /// the counter resets. Every frame is therefore held for exactly
    /// `advance_every` queries. While stopped, the same frame is returned
    /// indefinitely.
    ///
    /// `frame_count` must be > 0.
    pub fn tick(&mut self, frame_count: usize) -> usize {
        self.current_frame %= frame_count;
        let shown = self.current_frame;
        if self.running {
            self.advance_count += 1;
            if self.advance_count >= self.advance_every {
                self.current_frame = (self.current_frame + 1) % frame_count;
                self.advance_count = 0;
            }
        }
        shown
    }

    /// Current frame normalized against `frame_count`, without advancing.
    pub fn current_frame(&self, frame_count: usize) -> usize {
        self.current_frame % frame_count
    }

    /// True iff the next query returns a different frame than the previous
    /// one (or is the first query since start/restart/reset).
    pub fn next_frame_differs(&self, frame_count: usize) -> bool {
        self.running && self.advance_count == 0 && frame_count > 0
    }

    pub fn advance_every(&self) -> u32 {
        self.advance_every
    }

    /// Change the cadence. Takes effect mid-cycle.
    pub fn set_advance_every(&mut self, advance_every: u32) -> Result<(), SheetError> {
        if advance_every == 0 {
            return Err(SheetError::InvalidAdvanceEvery);
        }
        self.advance_every = advance_every;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_stopped() {
        let anim = Animation::new(1);
        assert!(!anim.running());
        assert_eq!(anim.current_frame(3), 0);
    }

    #[test]
    fn test_stopped_tick_never_advances() {
        let mut anim = Animation::new(1);
        for _ in 0..10 {
            assert_eq!(anim.tick(3), 0);
        }
    }

    #[test]
    fn test_running_advances_every_query_by_default() {
        let mut anim = Animation::new(1);
        anim.start();
        let shown: Vec<usize> = (0..7).map(|_| anim.tick(3)).collect();
        assert_eq!(shown, vec![0, 1, 2, 0, 1, 2, 0]);
    }

    #[test]
    fn test_cadence_holds_each_frame_n_queries() {
        let mut anim = Animation::new(2);
        anim.restart();
        let shown: Vec<usize> = (0..8).map(|_| anim.tick(3)).collect();
        assert_eq!(shown, vec![0, 0, 1, 1, 2, 2, 0, 0]);
    }

    #[test]
    fn test_round_trip_after_frame_count_times_cadence() {
        let mut anim = Animation::new(2);
        anim.restart();
        let first = anim.tick(3);
        for _ in 0..(3 * 2 - 1) {
            anim.tick(3);
        }
        // frame_count * advance_every queries later the cycle is back.
        assert_eq!(anim.tick(3), first);
    }

    #[test]
    fn test_start_preserves_frame_restart_does_not() {
        let mut anim = Animation::new(1);
        anim.start();
        anim.tick(4);
        anim.tick(4);
        anim.stop();
        assert_eq!(anim.current_frame(4), 2);

        anim.start();
        assert_eq!(anim.tick(4), 2);

        anim.restart();
        assert_eq!(anim.tick(4), 0);
    }

    #[test]
    fn test_reset_stops_and_rewinds() {
        let mut anim = Animation::new(1);
        anim.start();
        anim.tick(4);
        anim.tick(4);
        anim.reset();
        assert!(!anim.running());
        assert_eq!(anim.tick(4), 0);
        // Still stopped: no advancement.
        assert_eq!(anim.tick(4), 0);
    }

    #[test]
    fn test_stop_preserves_cadence_counter() {
        let mut anim = Animation::new(3);
        anim.start();
        anim.tick(4); // counter 1
        anim.stop();
        anim.resume();
        anim.tick(4); // counter 2
        assert_eq!(anim.tick(4), 0); // counter 3 -> advances
        assert_eq!(anim.tick(4), 1);
    }

    #[test]
    fn test_cursor_wraps_after_external_shrink() {
        let mut anim = Animation::new(1);
        anim.start();
        for _ in 0..5 {
            anim.tick(6);
        }
        assert_eq!(anim.current_frame(6), 5);
        // Frame count dropped from 6 to 2: cursor re-normalizes.
        assert_eq!(anim.tick(2), 5 % 2);
    }

    #[test]
    fn test_next_frame_differs() {
        let mut anim = Animation::new(2);
        assert!(!anim.next_frame_differs(3)); // stopped

        anim.restart();
        assert!(anim.next_frame_differs(3)); // first query since restart

        anim.tick(3); // counter 1, no advance
        assert!(!anim.next_frame_differs(3));

        anim.tick(3); // counter completes, frame advanced
        assert!(anim.next_frame_differs(3));
    }

    #[test]
    fn test_set_advance_every_rejects_zero() {
        let mut anim = Animation::new(2);
        assert_eq!(
            anim.set_advance_every(0),
            Err(SheetError::InvalidAdvanceEvery)
        );
        assert_eq!(anim.advance_every(), 2);
        anim.set_advance_every(5).unwrap();
        assert_eq!(anim.advance_every(), 5);
    }
}
