// src/animation_lib/clock.rs

use crate::animation_lib::animation::NormalizedTime;
use crate::animation_lib::error::{AnimationError, AnimationResult};

/// Turns wall-clock frame deltas into normalized time for one pass.
///
/// A non-looping clock holds at t = 1 once the pass is over. A looping clock
/// reports t = 1 for the frame that completes a pass, then wraps back to the
/// start on the next advance. Both count completed passes.
#[derive(Clone, Debug)]
pub struct AnimationClock {
    duration_secs: f32,
    elapsed_secs: f32,
    looping: bool,
    paused: bool,
    passes: u32,
    /// The last advance completed a pass; a looping clock wraps before moving on
    pass_complete: bool,
}

impl AnimationClock {
    pub fn new(duration_secs: f32, looping: bool) -> AnimationResult<Self> {
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return Err(AnimationError::InvalidDuration(duration_secs));
        }
        Ok(Self {
            duration_secs,
            elapsed_secs: 0.0,
            looping,
            paused: false,
            passes: 0,
            pass_complete: false,
        })
    }

    pub fn duration_secs(&self) -> f32 { self.duration_secs }
    pub fn is_looping(&self) -> bool { self.looping }
    pub fn is_paused(&self) -> bool { self.paused }
    pub fn pass_count(&self) -> u32 { self.passes }

    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Back to t = 0. The pass counter is kept.
    pub fn restart(&mut self) {
        self.elapsed_secs = 0.0;
        self.pass_complete = false;
    }

    pub fn is_finished(&self) -> bool {
        !self.looping && self.elapsed_secs >= self.duration_secs
    }

    pub fn progress(&self) -> NormalizedTime {
        NormalizedTime::saturating(self.elapsed_secs / self.duration_secs)
    }

    /// Moves the clock forward by `dt_secs` and returns the new progress.
    pub fn advance(&mut self, dt_secs: f32) -> NormalizedTime {
        if self.paused || self.is_finished() {
            return self.progress();
        }
        if !dt_secs.is_finite() || dt_secs < 0.0 {
            log::warn!("ignoring invalid frame delta {}s", dt_secs);
            return self.progress();
        }

        if self.pass_complete {
            let wrapped = (self.elapsed_secs / self.duration_secs).floor();
            self.elapsed_secs -= wrapped * self.duration_secs;
            self.pass_complete = false;
        }

        self.elapsed_secs += dt_secs;
        if self.elapsed_secs >= self.duration_secs {
            self.pass_complete = true;
            if self.looping {
                self.passes += (self.elapsed_secs / self.duration_secs).floor() as u32;
                log::debug!("animation pass {} complete, restarting", self.passes);
            } else {
                self.elapsed_secs = self.duration_secs;
                self.passes += 1;
                log::debug!("animation pass complete, holding at end");
            }
        }
        self.progress()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_duration() {
        assert_eq!(AnimationClock::new(0.0, false).unwrap_err(), AnimationError::InvalidDuration(0.0));
        assert!(AnimationClock::new(-1.0, true).is_err());
        assert!(AnimationClock::new(f32::INFINITY, true).is_err());
    }

    #[test]
    fn test_one_shot_holds_at_end() {
        let mut clock = AnimationClock::new(2.0, false).unwrap();
        assert_eq!(clock.advance(0.5).get(), 0.25);
        assert_eq!(clock.advance(1.0).get(), 0.75);
        assert_eq!(clock.advance(5.0), NormalizedTime::END);
        assert!(clock.is_finished());
        assert_eq!(clock.pass_count(), 1);
        assert_eq!(clock.advance(1.0), NormalizedTime::END);
        assert_eq!(clock.pass_count(), 1);

        clock.restart();
        assert!(!clock.is_finished());
        assert_eq!(clock.progress(), NormalizedTime::START);
    }

    #[test]
    fn test_looping_wraps_and_counts() {
        let mut clock = AnimationClock::new(1.0, true).unwrap();
        assert_eq!(clock.advance(0.75).get(), 0.75);
        // the frame that completes a pass shows its end
        assert_eq!(clock.advance(0.5), NormalizedTime::END);
        assert_eq!(clock.pass_count(), 1);
        // then the overshoot carries into the next pass
        assert_eq!(clock.advance(0.5).get(), 0.75);
        assert_eq!(clock.pass_count(), 1);
        assert_eq!(clock.advance(2.0), NormalizedTime::END);
        assert_eq!(clock.pass_count(), 3);
        assert!(!clock.is_finished());
        assert_eq!(clock.advance(0.0).get(), 0.75);
    }

    #[test]
    fn test_looping_after_one_shot_end_starts_a_new_pass() {
        let mut clock = AnimationClock::new(1.0, false).unwrap();
        assert_eq!(clock.advance(1.0), NormalizedTime::END);
        clock.set_looping(true);
        assert_eq!(clock.advance(0.25).get(), 0.25);
        assert_eq!(clock.pass_count(), 1);
    }

    #[test]
    fn test_paused_and_invalid_deltas_do_not_move() {
        let mut clock = AnimationClock::new(4.0, false).unwrap();
        clock.advance(1.0);
        clock.set_paused(true);
        assert_eq!(clock.advance(1.0).get(), 0.25);
        clock.set_paused(false);
        assert_eq!(clock.advance(f32::NAN).get(), 0.25);
        assert_eq!(clock.advance(-2.0).get(), 0.25);
        assert_eq!(clock.advance(1.0).get(), 0.5);
    }
}
