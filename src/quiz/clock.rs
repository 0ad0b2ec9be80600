use std::{
    cell::RefCell,
    rc::Rc,
    time::{
        Duration,
        Instant,
    },
};

/// Timer capability injected into the session. The session arms and stops
/// the one shared timer but never reads a wall clock itself; the host calls
/// `QuizSession::on_timer` on every fire.
pub trait Clock {
    /// Arms the timer to fire repeatedly every `interval`, replacing any
    /// previous schedule.
    fn start(&mut self, interval: Duration);

    fn stop(&mut self);
}

/// Wall-clock implementation shared between the session and the GUI loop.
/// The GUI polls it once per frame and forwards elapsed fires.
#[derive(Clone, Default)]
pub struct SharedTimer {
    inner: Rc<RefCell<TimerInner>>,
}

#[derive(Default)]
struct TimerInner {
    interval: Option<Duration>,
    armed_at: Option<Instant>,
}

impl SharedTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the armed interval has elapsed; rearms for the next fire.
    pub fn poll(&self) -> bool {
        let mut inner = self.inner.borrow_mut();
        let (Some(interval), Some(armed_at)) = (inner.interval, inner.armed_at) else {
            return false;
        };

        if armed_at.elapsed() >= interval {
            inner.armed_at = Some(Instant::now());
            true
        } else {
            false
        }
    }

    /// Time until the next fire, used to schedule the next repaint.
    pub fn time_to_fire(&self) -> Option<Duration> {
        let inner = self.inner.borrow();
        let interval = inner.interval?;
        let armed_at = inner.armed_at?;
        Some(interval.saturating_sub(armed_at.elapsed()))
    }
}

impl Clock for SharedTimer {
    fn start(&mut self, interval: Duration) {
        let mut inner = self.inner.borrow_mut();
        inner.interval = Some(interval);
        inner.armed_at = Some(Instant::now());
    }

    fn stop(&mut self) {
        let mut inner = self.inner.borrow_mut();
        inner.interval = None;
        inner.armed_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unarmed_timer_never_fires() {
        let timer = SharedTimer::new();
        assert!(!timer.poll());
        assert!(timer.time_to_fire().is_none());
    }

    #[test]
    fn stop_disarms() {
        let mut timer = SharedTimer::new();
        timer.start(Duration::from_millis(0));
        assert!(timer.poll());
        timer.stop();
        assert!(!timer.poll());
    }

    #[test]
    fn clones_share_the_schedule() {
        let mut timer = SharedTimer::new();
        let observer = timer.clone();
        timer.start(Duration::from_millis(0));
        assert!(observer.poll());
        timer.stop();
        assert!(!observer.poll());
    }
}
