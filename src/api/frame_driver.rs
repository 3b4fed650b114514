use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::PickOutcome;

/// Monotonic id of one scheduled frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FrameToken(u64);

impl FrameToken {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Display-refresh scheduling primitive.
///
/// `schedule` asks the host to call `Scene::on_animation_frame` with the
/// returned token once; `cancel` withdraws a pending request.
pub trait FrameScheduler {
    fn schedule(&mut self) -> FrameToken;
    fn cancel(&mut self, token: FrameToken);
}

#[derive(Debug, Default)]
struct FrameQueue {
    next: u64,
    pending: VecDeque<FrameToken>,
    cancelled: Vec<FrameToken>,
    scheduled: usize,
}

/// Scheduler whose frames the host fires by hand.
///
/// Clones share one queue, so tests and headless hosts keep a handle and pop
/// tokens while the scene owns another clone.
#[derive(Debug, Clone, Default)]
pub struct ManualFrameScheduler {
    queue: Rc<RefCell<FrameQueue>>,
}

impl ManualFrameScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Oldest pending token, removed from the queue.
    #[must_use]
    pub fn take_next(&self) -> Option<FrameToken> {
        self.queue.borrow_mut().pending.pop_front()
    }

    #[must_use]
    pub fn pending(&self) -> Vec<FrameToken> {
        self.queue.borrow().pending.iter().copied().collect()
    }

    #[must_use]
    pub fn scheduled_count(&self) -> usize {
        self.queue.borrow().scheduled
    }

    #[must_use]
    pub fn cancelled(&self) -> Vec<FrameToken> {
        self.queue.borrow().cancelled.clone()
    }
}

impl FrameScheduler for ManualFrameScheduler {
    fn schedule(&mut self) -> FrameToken {
        let mut queue = self.queue.borrow_mut();
        queue.next += 1;
        queue.scheduled += 1;
        let token = FrameToken::new(queue.next);
        queue.pending.push_back(token);
        token
    }

    fn cancel(&mut self, token: FrameToken) {
        let mut queue = self.queue.borrow_mut();
        queue.pending.retain(|pending| *pending != token);
        queue.cancelled.push(token);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameDriverState {
    Idle,
    Active,
    Disposed,
}

/// What one frame callback did.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// Disposed scene or stale token; nothing was touched.
    Skipped,
    Rendered(FrameReport),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub ticks_uploaded: bool,
    pub select_box_active: bool,
    /// `None` while a box gesture suppresses picking.
    pub pick: Option<PickOutcome>,
}

/// Lifecycle and cadence of the scene's frame loop.
///
/// At most one token is pending. A frame is accepted only while `Active` and
/// only for that token, so callbacks fired after `dispose` or superseded by a
/// newer schedule are ignored.
pub struct FrameDriver {
    state: FrameDriverState,
    pending: Option<FrameToken>,
    frames_run: u64,
    scheduler: Box<dyn FrameScheduler>,
}

impl FrameDriver {
    #[must_use]
    pub fn new(scheduler: Box<dyn FrameScheduler>) -> Self {
        Self {
            state: FrameDriverState::Idle,
            pending: None,
            frames_run: 0,
            scheduler,
        }
    }

    #[must_use]
    pub fn state(&self) -> FrameDriverState {
        self.state
    }

    #[must_use]
    pub fn pending(&self) -> Option<FrameToken> {
        self.pending
    }

    #[must_use]
    pub fn frames_run(&self) -> u64 {
        self.frames_run
    }

    /// `Idle → Active`; schedules the first frame.
    pub fn start(&mut self) {
        if self.state != FrameDriverState::Idle {
            return;
        }
        self.state = FrameDriverState::Active;
        self.pending = Some(self.scheduler.schedule());
    }

    /// Claims `token` for execution.
    pub fn begin_frame(&mut self, token: FrameToken) -> bool {
        if self.state != FrameDriverState::Active || self.pending != Some(token) {
            trace!(token = token.raw(), state = ?self.state, "ignoring frame callback");
            return false;
        }
        self.pending = None;
        self.frames_run += 1;
        true
    }

    pub fn reschedule(&mut self) {
        if self.state == FrameDriverState::Active && self.pending.is_none() {
            self.pending = Some(self.scheduler.schedule());
        }
    }

    /// Terminal; cancels any pending frame.
    pub fn dispose(&mut self) {
        if let Some(token) = self.pending.take() {
            self.scheduler.cancel(token);
        }
        self.state = FrameDriverState::Disposed;
    }
}
