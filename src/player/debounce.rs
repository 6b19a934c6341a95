//! Coalesces bursts of repeated volume/seek key presses.
//!
//! Every press bumps the kind's accumulator and generation and hands back a
//! [`DebounceTimer`] stamped with that generation. When a timer fires it only
//! applies if its generation is still the live one; otherwise a newer press
//! has superseded it and its own timer will apply the running total.

use std::time::Duration;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AdjustKind {
    Volume,
    Seek,
}

/// One-shot timer payload: which kind, and the generation it was armed for.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DebounceTimer {
    pub kind: AdjustKind,
    pub generation: u64,
}

/// Accumulated delta for one kind within the current coalescing window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingAdjustment {
    pub delta: i32,
    pub generation: u64,
}

#[derive(Debug, Clone)]
pub struct InputDebouncer {
    window: Duration,
    volume: PendingAdjustment,
    seek: PendingAdjustment,
}

impl InputDebouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            volume: PendingAdjustment::default(),
            seek: PendingAdjustment::default(),
        }
    }

    /// Quiescence window a timer must be scheduled after.
    pub fn window(&self) -> Duration {
        self.window
    }

    fn slot_mut(&mut self, kind: AdjustKind) -> &mut PendingAdjustment {
        match kind {
            AdjustKind::Volume => &mut self.volume,
            AdjustKind::Seek => &mut self.seek,
        }
    }

    #[cfg(test)]
    pub fn pending(&self, kind: AdjustKind) -> &PendingAdjustment {
        match kind {
            AdjustKind::Volume => &self.volume,
            AdjustKind::Seek => &self.seek,
        }
    }

    /// Record one press of `kind` carrying `unit` (+1/-1). The caller must
    /// schedule the returned timer `window()` from now.
    pub fn push(&mut self, kind: AdjustKind, unit: i32) -> DebounceTimer {
        let slot = self.slot_mut(kind);
        slot.delta = slot.delta.saturating_add(unit);
        slot.generation += 1;
        DebounceTimer {
            kind,
            generation: slot.generation,
        }
    }

    /// Resolve a fired timer. Returns the net delta to apply once per burst;
    /// stale timers and bursts that cancel out to zero yield `None`.
    pub fn fire(&mut self, timer: DebounceTimer) -> Option<i32> {
        let slot = self.slot_mut(timer.kind);
        if timer.generation != slot.generation {
            return None;
        }
        let delta = std::mem::take(&mut slot.delta);
        (delta != 0).then_some(delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn debouncer() -> InputDebouncer {
        InputDebouncer::new(Duration::from_millis(100))
    }

    #[test]
    fn burst_applies_net_sum_once_on_last_timer() {
        let mut d = debouncer();
        let timers: Vec<_> = (0..5).map(|_| d.push(AdjustKind::Volume, 1)).collect();

        for t in &timers[..4] {
            assert_eq!(d.fire(*t), None);
        }
        assert_eq!(d.fire(timers[4]), Some(5));
        // Applied once: firing again is a no-op.
        assert_eq!(d.fire(timers[4]), None);
    }

    #[test]
    fn mixed_signs_sum_to_net_delta() {
        let mut d = debouncer();
        d.push(AdjustKind::Seek, 1);
        d.push(AdjustKind::Seek, 1);
        let last = d.push(AdjustKind::Seek, -1);
        assert_eq!(d.fire(last), Some(1));
    }

    #[test]
    fn cancelled_out_burst_applies_nothing_and_resets() {
        let mut d = debouncer();
        d.push(AdjustKind::Volume, 1);
        let last = d.push(AdjustKind::Volume, -1);
        assert_eq!(d.fire(last), None);
        assert_eq!(d.pending(AdjustKind::Volume).delta, 0);
    }

    #[test]
    fn kinds_are_independent() {
        let mut d = debouncer();
        let v = d.push(AdjustKind::Volume, 1);
        let s = d.push(AdjustKind::Seek, -1);
        assert_eq!(v.generation, 1);
        assert_eq!(s.generation, 1);
        assert_eq!(d.fire(v), Some(1));
        assert_eq!(d.fire(s), Some(-1));
    }

    #[test]
    fn separate_bursts_apply_separately() {
        let mut d = debouncer();
        let first = d.push(AdjustKind::Volume, -1);
        assert_eq!(d.fire(first), Some(-1));
        let second = d.push(AdjustKind::Volume, -1);
        assert_eq!(d.fire(second), Some(-1));
        assert!(second.generation > first.generation);
    }
}
