// ── Generation-guarded published state ──
//
// Keyed loads race: a slow response for an old key must never overwrite
// the state produced for a newer one. Each load takes a `Ticket` from
// `begin`; `apply` only lands if no later `begin` happened in between.
//
// The counter is only ever touched inside the watch channel's write lock,
// so "bump + reset state" and "check + apply result" are each atomic.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

/// Proof that a load was started at a particular generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// State `S` published through a `watch` channel, guarded by a
/// monotonically increasing generation number.
pub struct Generation<S> {
    current: AtomicU64,
    state: watch::Sender<S>,
}

impl<S: Send + Sync + 'static> Generation<S> {
    pub fn new(initial: S) -> Self {
        let (state, _) = watch::channel(initial);
        Self {
            current: AtomicU64::new(0),
            state,
        }
    }

    /// Start a new load: bump the generation and reset the published
    /// state via `reset`. Every ticket issued before this one goes stale.
    pub fn begin(&self, reset: impl FnOnce(&mut S)) -> Ticket {
        let mut ticket = Ticket(0);
        self.state.send_modify(|s| {
            ticket = Ticket(self.current.fetch_add(1, Ordering::AcqRel) + 1);
            reset(s);
        });
        ticket
    }

    /// Apply a load result if `ticket` is still current.
    ///
    /// Returns `false` (and leaves the state untouched) for stale tickets.
    pub fn apply(&self, ticket: Ticket, update: impl FnOnce(&mut S)) -> bool {
        self.state.send_if_modified(|s| {
            if self.current.load(Ordering::Acquire) != ticket.0 {
                return false;
            }
            update(s);
            true
        })
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.current.load(Ordering::Acquire) == ticket.0
    }

    /// Clone of the latest published state.
    pub fn snapshot(&self) -> S
    where
        S: Clone,
    {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.state.subscribe()
    }
}

impl<S: Default + Send + Sync + 'static> Default for Generation<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}
