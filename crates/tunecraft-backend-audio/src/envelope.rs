//! Linear fade envelope.
//!
//! Ramps the signal up from silence over the fade window and back down to
//! silence over the same window at the end, so a tone starts and stops
//! without an audible click.

/// Symmetric linear fade-in / fade-out envelope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFade {
    /// Length of each ramp in seconds. Zero disables the envelope.
    pub fade_seconds: f64,
    /// Total signal length in seconds.
    pub duration_seconds: f64,
}

impl LinearFade {
    /// Creates a new fade envelope.
    pub fn new(fade_seconds: f64, duration_seconds: f64) -> Self {
        Self {
            fade_seconds,
            duration_seconds,
        }
    }

    /// Gain of the fade-in ramp at time `t`.
    #[inline]
    pub fn fade_in(&self, t: f64) -> f64 {
        if self.fade_seconds <= 0.0 {
            return 1.0;
        }
        (t / self.fade_seconds).clamp(0.0, 1.0)
    }

    /// Gain of the fade-out ramp at time `t`.
    #[inline]
    pub fn fade_out(&self, t: f64) -> f64 {
        if self.fade_seconds <= 0.0 {
            return 1.0;
        }
        ((self.duration_seconds - t) / self.fade_seconds).clamp(0.0, 1.0)
    }

    /// Envelope gain at time `t`: the product of both ramps.
    #[inline]
    pub fn gain(&self, t: f64) -> f64 {
        self.fade_in(t) * self.fade_out(t)
    }
}
