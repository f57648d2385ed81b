//! # Axis Interval Synchronization
//!
//! Keeps a group of independently-owned axis views showing the same
//! interval. When any linked view reports an interval change, the group
//! broadcasts the exact bounds to every *other* member with a "silent"
//! set — one that must not trigger the receiving view's own fit/rescale
//! side effects. A propagation guard suppresses the re-entrant
//! notifications those silent sets may still produce, so linked views can
//! never feed back into an infinite update loop.
//!
//! This is a single-writer broadcast, not a convergence algorithm: every
//! member is forced to numeric equality with the source on each change.
//!
//! The group uses interior mutability and is meant to be shared behind an
//! `Rc`, one clone per view's change handler; accesses are
//! single-threaded.

use std::cell::{Cell, RefCell};
use std::fmt;

use log::trace;

/// Errors produced by the sync group
#[derive(Debug, thiserror::Error)]
pub enum AxisSyncError {
    /// The event's source axis was never registered in this group
    #[error("unknown axis: {0}")]
    UnknownAxis(AxisId),

    /// A member view failed to apply a silent interval set
    #[error("silent set failed on {axis}: {reason}")]
    SilentSetFailed {
        /// The member that rejected the set
        axis: AxisId,
        /// The view's failure description
        reason: String,
    },
}

/// Identifier of one registered axis view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AxisId(u32);

impl fmt::Display for AxisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "axis-{}", self.0)
    }
}

/// One axis's displayed interval. Each registered view keeps its own copy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisInterval {
    /// Lower displayed bound
    pub min: f64,
    /// Upper displayed bound
    pub max: f64,
}

impl AxisInterval {
    /// Construct an interval.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// Callback applying a silent interval set on the owning view.
///
/// Receives `(min, max)`; failure descriptions propagate out of
/// [`AxisSyncGroup::on_interval_change`] after the guard is released.
pub type SilentSetFn = Box<dyn FnMut(f64, f64) -> Result<(), String>>;

struct LinkedAxis {
    id: AxisId,
    interval: AxisInterval,
    silent_set: Option<SilentSetFn>,
}

/// Resets the propagation flag on every exit path, including errors.
struct PropagationGuard<'a> {
    flag: &'a Cell<bool>,
}

impl<'a> PropagationGuard<'a> {
    fn arm(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self { flag }
    }
}

impl Drop for PropagationGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

/// A set of linked axis views constrained to identical display intervals.
///
/// The group persists for the process lifetime; there is no terminal
/// state. Initial state is idle.
#[derive(Default)]
pub struct AxisSyncGroup {
    axes: RefCell<Vec<LinkedAxis>>,
    next_id: Cell<u32>,
    propagating: Cell<bool>,
}

impl AxisSyncGroup {
    /// Create an empty group in the idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a view with its current interval. Returns its handle.
    pub fn register(&self, interval: AxisInterval) -> AxisId {
        self.register_axis(interval, None)
    }

    /// Register a view that applies silent sets through `silent_set`.
    pub fn register_with_observer(&self, interval: AxisInterval, silent_set: SilentSetFn) -> AxisId {
        self.register_axis(interval, Some(silent_set))
    }

    fn register_axis(&self, interval: AxisInterval, silent_set: Option<SilentSetFn>) -> AxisId {
        let id = AxisId(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        self.axes.borrow_mut().push(LinkedAxis {
            id,
            interval,
            silent_set,
        });
        id
    }

    /// Number of linked views.
    pub fn len(&self) -> usize {
        self.axes.borrow().len()
    }

    /// Whether the group has no members.
    pub fn is_empty(&self) -> bool {
        self.axes.borrow().is_empty()
    }

    /// The interval currently recorded for `id`.
    pub fn interval(&self, id: AxisId) -> Result<AxisInterval, AxisSyncError> {
        self.axes
            .borrow()
            .iter()
            .find(|axis| axis.id == id)
            .map(|axis| axis.interval)
            .ok_or(AxisSyncError::UnknownAxis(id))
    }

    /// Whether a broadcast is currently in flight.
    pub fn is_propagating(&self) -> bool {
        self.propagating.get()
    }

    /// Handle an interval-change notification from `source`.
    ///
    /// Re-entrant events arriving while a broadcast is in flight are the
    /// group's own silent sets echoing back; they are suppressed, not
    /// errors. Otherwise every member is recorded at exactly `(min, max)`
    /// and every member except the source has its silent-set callback
    /// invoked — the source's own callback is never re-invoked. A callback
    /// failure propagates to the caller after the propagation flag is
    /// reset.
    pub fn on_interval_change(
        &self,
        source: AxisId,
        min: f64,
        max: f64,
    ) -> Result<(), AxisSyncError> {
        if self.propagating.get() {
            trace!("suppressed re-entrant interval change from {source}");
            return Ok(());
        }

        // Armed before the axes borrow: a silent set re-entering this
        // method bails on the flag above without ever touching the
        // RefCell.
        let _guard = PropagationGuard::arm(&self.propagating);

        let mut axes = self.axes.borrow_mut();
        if !axes.iter().any(|axis| axis.id == source) {
            return Err(AxisSyncError::UnknownAxis(source));
        }

        for axis in axes.iter_mut() {
            axis.interval = AxisInterval::new(min, max);
            if axis.id == source {
                continue;
            }
            if let Some(silent_set) = &mut axis.silent_set {
                silent_set(min, max).map_err(|reason| AxisSyncError::SilentSetFailed {
                    axis: axis.id,
                    reason,
                })?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for AxisSyncGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AxisSyncGroup")
            .field("axes", &self.len())
            .field("propagating", &self.propagating.get())
            .finish()
    }
}
