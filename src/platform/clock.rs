//! Frame timing
//!
//! Timers are elapsed-time comparisons made once per frame, never separately
//! scheduled callbacks.

/// Converts animation-frame timestamps (ms) into clamped steps (seconds)
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_dt: f32,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last_ms: None,
            max_dt,
        }
    }

    /// Step since the previous frame, in `[0, max_dt]`; the first frame is 0
    pub fn advance(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        if dt.is_finite() {
            dt.clamp(0.0, self.max_dt)
        } else {
            0.0
        }
    }

    /// Timestamp of the last frame seen
    pub fn last(&self) -> Option<f64> {
        self.last_ms
    }

    /// Forget the previous frame (after a stop)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

/// Holds a resize until the surface has stopped changing for a while
#[derive(Debug, Clone, Copy)]
pub struct ResizeDebounce {
    delay_ms: f64,
    pending: Option<Pending>,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    width: f32,
    height: f32,
    requested_at: f64,
}

impl ResizeDebounce {
    pub fn new(delay_ms: f64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    /// Note a new size; restarts the wait
    pub fn request(&mut self, width: f32, height: f32, now_ms: f64) {
        self.pending = Some(Pending {
            width,
            height,
            requested_at: now_ms,
        });
    }

    /// The latest requested size, once the delay has passed
    pub fn poll(&mut self, now_ms: f64) -> Option<(f32, f32)> {
        let pending = self.pending?;
        if now_ms - pending.requested_at >= self.delay_ms {
            self.pending = None;
            Some((pending.width, pending.height))
        } else {
            None
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
