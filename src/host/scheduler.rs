use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameHandle(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerHandle(pub u64);

/// Per-frame and timeout primitives provided by the host platform.
///
/// The host answers a frame request by calling
/// `GlobeEngine::on_animation_frame` and a due timeout by calling
/// `GlobeEngine::on_timer`. Canceling an unknown or already fired handle
/// must be a no-op.
pub trait HostScheduler {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
    fn set_timeout(&mut self, delay_ms: f64) -> TimerHandle;
    fn clear_timeout(&mut self, handle: TimerHandle);
}

/// Call recorded by `ManualScheduler`, in issue order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SchedulerCall {
    RequestFrame(FrameHandle),
    CancelFrame(FrameHandle),
    SetTimeout(TimerHandle, f64),
    ClearTimeout(TimerHandle),
}

#[derive(Debug, Default)]
struct ManualSchedulerInner {
    next_id: u64,
    now_ms: f64,
    frames: Vec<FrameHandle>,
    timers: Vec<(TimerHandle, f64)>,
    calls: Vec<SchedulerCall>,
}

impl ManualSchedulerInner {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Headless scheduler driven explicitly by the embedder or a test.
///
/// Clones share state, so one clone can be handed to the engine while the
/// caller keeps another to fire frames and timers.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    inner: Rc<RefCell<ManualSchedulerInner>>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn now_ms(&self) -> f64 {
        self.inner.borrow().now_ms
    }

    /// Moves the timeout clock; it never goes backwards.
    pub fn set_now_ms(&self, now_ms: f64) {
        let mut inner = self.inner.borrow_mut();
        if now_ms > inner.now_ms {
            inner.now_ms = now_ms;
        }
    }

    #[must_use]
    pub fn pending_frames(&self) -> Vec<FrameHandle> {
        self.inner.borrow().frames.clone()
    }

    #[must_use]
    pub fn has_pending_frame(&self) -> bool {
        !self.inner.borrow().frames.is_empty()
    }

    /// Removes and returns every pending frame, as the platform does right
    /// before running frame callbacks.
    pub fn take_frames(&self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.inner.borrow_mut().frames)
    }

    #[must_use]
    pub fn pending_timers(&self) -> Vec<TimerHandle> {
        self.inner
            .borrow()
            .timers
            .iter()
            .map(|(handle, _)| *handle)
            .collect()
    }

    /// Advances the clock to `now_ms` and removes the timers due by then.
    pub fn take_due_timers(&self, now_ms: f64) -> Vec<TimerHandle> {
        self.set_now_ms(now_ms);
        let mut inner = self.inner.borrow_mut();
        let now = inner.now_ms;
        let (due, pending): (Vec<_>, Vec<_>) =
            inner.timers.drain(..).partition(|(_, due_at)| *due_at <= now);
        inner.timers = pending;
        due.into_iter().map(|(handle, _)| handle).collect()
    }

    #[must_use]
    pub fn calls(&self) -> Vec<SchedulerCall> {
        self.inner.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.inner.borrow_mut().calls.clear();
    }
}

impl HostScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        let mut inner = self.inner.borrow_mut();
        let handle = FrameHandle(inner.next_id());
        inner.frames.push(handle);
        inner.calls.push(SchedulerCall::RequestFrame(handle));
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let mut inner = self.inner.borrow_mut();
        inner.frames.retain(|pending| *pending != handle);
        inner.calls.push(SchedulerCall::CancelFrame(handle));
    }

    fn set_timeout(&mut self, delay_ms: f64) -> TimerHandle {
        let mut inner = self.inner.borrow_mut();
        let handle = TimerHandle(inner.next_id());
        let due_at = inner.now_ms + delay_ms.max(0.0);
        inner.timers.push((handle, due_at));
        inner.calls.push(SchedulerCall::SetTimeout(handle, delay_ms));
        handle
    }

    fn clear_timeout(&mut self, handle: TimerHandle) {
        let mut inner = self.inner.borrow_mut();
        inner.timers.retain(|(pending, _)| *pending != handle);
        inner.calls.push(SchedulerCall::ClearTimeout(handle));
    }
}
