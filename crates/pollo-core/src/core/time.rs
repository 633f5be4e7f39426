//! Virtual-clock timers.
//!
//! Every repeating behaviour in the simulation (movement, animation, gravity,
//! the world loops) is a [`Repeater`] stored in an `Option` on its owner, and
//! every deferred action (despawn, speed recovery) is a [`Delay`]. Cancelling
//! is `handle = None`; arming twice is prevented by checking `is_none()` first.
//! The world advances the clock from one deadline to the next, so nothing here
//! ever reads wall-clock time.

/// Milliseconds on the simulation clock.
pub type Millis = f64;

/// Frame cadence used by the 60 Hz behaviours.
pub const FRAME_MS: Millis = 1000.0 / 60.0;

/// Anything with a pending deadline.
pub trait Timer {
    /// Clock time at which the timer fires next.
    fn due(&self) -> Millis;
}

/// Periodic timer handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Repeater {
    period: Millis,
    next_due: Millis,
}

impl Repeater {
    /// Arm a repeater that first fires one period after `now`.
    pub fn start(now: Millis, period: Millis) -> Self {
        Self {
            period,
            next_due: now + period,
        }
    }

    pub fn period(&self) -> Millis {
        self.period
    }

    /// Consume one firing if the repeater is due. Returns true if it fired.
    pub fn fire(&mut self, now: Millis) -> bool {
        if self.next_due <= now {
            self.next_due += self.period;
            true
        } else {
            false
        }
    }
}

impl Timer for Repeater {
    fn due(&self) -> Millis {
        self.next_due
    }
}

/// One-shot timer handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Delay {
    due: Millis,
}

impl Delay {
    pub fn start(now: Millis, delay: Millis) -> Self {
        Self { due: now + delay }
    }

    pub fn is_due(&self, now: Millis) -> bool {
        self.due <= now
    }
}

impl Timer for Delay {
    fn due(&self) -> Millis {
        self.due
    }
}

/// Fire a repeater slot if it is armed and due.
pub fn poll(slot: &mut Option<Repeater>, now: Millis) -> bool {
    slot.as_mut().is_some_and(|r| r.fire(now))
}

/// Fire a delay slot if it is armed and due. A fired delay disarms itself.
pub fn poll_once(slot: &mut Option<Delay>, now: Millis) -> bool {
    if slot.is_some_and(|d| d.is_due(now)) {
        *slot = None;
        true
    } else {
        false
    }
}

/// Deadline of an optional timer slot.
pub fn due_of<T: Timer>(slot: &Option<T>) -> Option<Millis> {
    slot.as_ref().map(Timer::due)
}

/// The earliest of a set of optional deadlines.
pub fn earliest<I>(deadlines: I) -> Option<Millis>
where
    I: IntoIterator<Item = Option<Millis>>,
{
    deadlines.into_iter().flatten().min_by(|a, b| a.total_cmp(b))
}
