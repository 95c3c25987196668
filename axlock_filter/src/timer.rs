//! Release timers.
//!
//! A sticky engine owns exactly one [`ReleaseTimer`]. Every processed sample
//! reschedules it, replacing any pending fire, so the callback runs only
//! after `release_after_ms` of inactivity.
//!
//! Two implementations are provided:
//!
//! - [`ThreadTimer`] — one worker thread waiting on a condition variable
//! - [`ManualScheduler`] — virtual millisecond clock driven by the caller,
//!   used for deterministic tests and trace replay
//!
//! Neither `reschedule` nor `cancel` blocks beyond a short internal lock, so
//! both may be called while the engine's own lock is held. Callbacks always
//! run with the timer's internal lock released.

use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex, MutexGuard};
use tracing::trace;

/// Callback invoked when a release timer fires.
pub type ReleaseCallback = Box<dyn Fn() + Send + Sync + 'static>;

/// Single-shot, re-armable delayed callback.
pub trait ReleaseTimer: Send + Sync {
    /// Arm the timer to fire `delay` from now, replacing any pending fire.
    fn reschedule(&self, delay: Duration);

    /// Disarm the timer. A fire already running is not recalled.
    fn cancel(&self);
}

/// Creates release timers bound to a callback.
pub trait TimerFactory {
    /// Create a disarmed timer that runs `on_fire` when it expires.
    fn create(&self, on_fire: ReleaseCallback) -> std::io::Result<Box<dyn ReleaseTimer>>;
}

// ─── Thread-backed timer ────────────────────────────────────────────

#[derive(Debug, Default)]
struct TimerSlot {
    deadline: Option<Instant>,
    shutdown: bool,
}

#[derive(Debug, Default)]
struct TimerShared {
    slot: Mutex<TimerSlot>,
    wake: Condvar,
}

/// Release timer backed by a dedicated worker thread.
///
/// Dropping the timer stops and joins the worker.
pub struct ThreadTimer {
    shared: Arc<TimerShared>,
    worker: Option<JoinHandle<()>>,
}

impl ThreadTimer {
    /// Spawn the worker thread.
    pub fn spawn(name: &str, on_fire: ReleaseCallback) -> std::io::Result<Self> {
        let shared = Arc::new(TimerShared::default());
        let worker_shared = Arc::clone(&shared);
        let worker = std::thread::Builder::new()
            .name(name.to_string())
            .spawn(move || run_worker(&worker_shared, &on_fire))?;
        Ok(Self {
            shared,
            worker: Some(worker),
        })
    }
}

fn run_worker(shared: &TimerShared, on_fire: &ReleaseCallback) {
    let mut slot = shared.slot.lock();
    loop {
        if slot.shutdown {
            return;
        }
        let deadline = slot.deadline;
        match deadline {
            None => shared.wake.wait(&mut slot),
            Some(deadline) if Instant::now() >= deadline => {
                slot.deadline = None;
                trace!("release timer fired");
                MutexGuard::unlocked(&mut slot, || on_fire());
            }
            Some(deadline) => {
                shared.wake.wait_until(&mut slot, deadline);
            }
        }
    }
}

impl ReleaseTimer for ThreadTimer {
    fn reschedule(&self, delay: Duration) {
        let mut slot = self.shared.slot.lock();
        slot.deadline = Some(Instant::now() + delay);
        self.shared.wake.notify_one();
    }

    fn cancel(&self) {
        let mut slot = self.shared.slot.lock();
        slot.deadline = None;
        self.shared.wake.notify_one();
    }
}

impl Drop for ThreadTimer {
    fn drop(&mut self) {
        {
            let mut slot = self.shared.slot.lock();
            slot.shutdown = true;
            slot.deadline = None;
            self.shared.wake.notify_one();
        }
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

/// Factory producing [`ThreadTimer`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadTimerFactory;

impl TimerFactory for ThreadTimerFactory {
    fn create(&self, on_fire: ReleaseCallback) -> std::io::Result<Box<dyn ReleaseTimer>> {
        Ok(Box::new(ThreadTimer::spawn("axlock-release", on_fire)?))
    }
}

// ─── Manual (virtual clock) scheduler ───────────────────────────────

struct ManualSlot {
    deadline_ms: Option<u64>,
    on_fire: Arc<dyn Fn() + Send + Sync + 'static>,
}

/// Slots of dropped timers are `None` and reused by the next `create`.
#[derive(Default)]
struct ManualInner {
    now_ms: u64,
    slots: Vec<Option<ManualSlot>>,
}

impl ManualInner {
    fn slot_mut(&mut self, index: usize) -> Option<&mut ManualSlot> {
        self.slots.get_mut(index).and_then(Option::as_mut)
    }

    fn armed(&self) -> impl Iterator<Item = &ManualSlot> {
        self.slots.iter().flatten().filter(|s| s.deadline_ms.is_some())
    }
}

/// Virtual-time scheduler.
///
/// Timers created through it only fire from [`advance_to`](Self::advance_to)
/// or [`advance`](Self::advance), in deadline order, with the clock set to
/// each deadline as it fires. Clones share the same clock.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    inner: Arc<Mutex<ManualInner>>,
}

impl ManualScheduler {
    /// New scheduler at t = 0 ms.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now_ms(&self) -> u64 {
        self.inner.lock().now_ms
    }

    /// Number of armed timers.
    pub fn pending(&self) -> usize {
        self.inner.lock().armed().count()
    }

    /// Earliest armed deadline.
    pub fn next_deadline_ms(&self) -> Option<u64> {
        self.inner.lock().armed().filter_map(|s| s.deadline_ms).min()
    }

    /// Advance by `delta_ms`, firing due timers. Returns how many fired.
    pub fn advance(&self, delta_ms: u64) -> usize {
        let target = self.now_ms().saturating_add(delta_ms);
        self.advance_to(target)
    }

    /// Advance to `target_ms` (never backwards), firing due timers.
    ///
    /// Returns how many fired.
    pub fn advance_to(&self, target_ms: u64) -> usize {
        let mut fired = 0;
        loop {
            let due = {
                let mut guard = self.inner.lock();
                let inner = &mut *guard;
                let next = inner
                    .slots
                    .iter_mut()
                    .flatten()
                    .filter(|s| s.deadline_ms.is_some_and(|d| d <= target_ms))
                    .min_by_key(|s| s.deadline_ms);
                match next {
                    Some(slot) => {
                        let deadline = slot.deadline_ms.take().unwrap_or(target_ms);
                        let on_fire = Arc::clone(&slot.on_fire);
                        inner.now_ms = inner.now_ms.max(deadline);
                        Some(on_fire)
                    }
                    None => {
                        inner.now_ms = inner.now_ms.max(target_ms);
                        None
                    }
                }
            };
            match due {
                Some(on_fire) => {
                    on_fire();
                    fired += 1;
                }
                None => return fired,
            }
        }
    }
}

impl TimerFactory for ManualScheduler {
    fn create(&self, on_fire: ReleaseCallback) -> std::io::Result<Box<dyn ReleaseTimer>> {
        let mut inner = self.inner.lock();
        let slot = ManualSlot {
            deadline_ms: None,
            on_fire: Arc::from(on_fire),
        };
        let index = match inner.slots.iter().position(Option::is_none) {
            Some(free) => {
                inner.slots[free] = Some(slot);
                free
            }
            None => {
                inner.slots.push(Some(slot));
                inner.slots.len() - 1
            }
        };
        Ok(Box::new(ManualTimer {
            inner: Arc::clone(&self.inner),
            index,
        }))
    }
}

struct ManualTimer {
    inner: Arc<Mutex<ManualInner>>,
    index: usize,
}

impl ReleaseTimer for ManualTimer {
    fn reschedule(&self, delay: Duration) {
        let mut inner = self.inner.lock();
        let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        let deadline = inner.now_ms.saturating_add(delay_ms);
        if let Some(slot) = inner.slot_mut(self.index) {
            slot.deadline_ms = Some(deadline);
        }
    }

    fn cancel(&self) {
        if let Some(slot) = self.inner.lock().slot_mut(self.index) {
            slot.deadline_ms = None;
        }
    }
}

impl Drop for ManualTimer {
    fn drop(&mut self) {
        let mut inner = self.inner.lock();
        if let Some(slot) = inner.slots.get_mut(self.index) {
            *slot = None;
        }
    }
}
