//! Where step notifications go.

use std::sync::mpsc::{Sender, SyncSender, TrySendError};

use pathviz_core::Step;

/// Receives [`Step`]s from a running search.
///
/// Sinks are write-only from the solver's point of view and must not block
/// for long: the solver's own pacing delay is the only wait it expects.
pub trait StepSink {
    fn step(&mut self, step: Step);
}

impl<S: StepSink + ?Sized> StepSink for &mut S {
    #[inline]
    fn step(&mut self, step: Step) {
        (**self).step(step);
    }
}

/// Hand steps to another thread. A dropped receiver is ignored: the search
/// finishes regardless of whether anyone is watching.
impl StepSink for Sender<Step> {
    fn step(&mut self, step: Step) {
        let _ = self.send(step);
    }
}

/// Bounded hand-off. When the receiver falls behind, steps are dropped
/// rather than stalling the search.
impl StepSink for SyncSender<Step> {
    fn step(&mut self, step: Step) {
        match self.try_send(step) {
            Ok(()) | Err(TrySendError::Disconnected(_)) => {}
            Err(TrySendError::Full(_)) => log::trace!("step channel full, dropping step"),
        }
    }
}

/// Collects every step; handy in tests and for replaying a run.
impl StepSink for Vec<Step> {
    fn step(&mut self, step: Step) {
        self.push(step);
    }
}

/// Discards all steps.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl StepSink for NullSink {
    #[inline]
    fn step(&mut self, _step: Step) {}
}

/// Adapter for closures; see [`from_fn`].
pub struct FnSink<F>(F);

impl<F: FnMut(Step)> StepSink for FnSink<F> {
    #[inline]
    fn step(&mut self, step: Step) {
        (self.0)(step);
    }
}

/// Wrap a closure as a [`StepSink`].
pub fn from_fn<F: FnMut(Step)>(f: F) -> FnSink<F> {
    FnSink(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn sender_ignores_dropped_receiver() {
        let (tx, rx) = mpsc::channel();
        let mut tx: Sender<Step> = tx;
        tx.step(Step::Redraw);
        assert_eq!(rx.recv(), Ok(Step::Redraw));
        drop(rx);
        tx.step(Step::Redraw);
    }

    #[test]
    fn sync_sender_drops_when_full() {
        let (tx, rx) = mpsc::sync_channel(1);
        let mut tx: SyncSender<Step> = tx;
        tx.step(Step::Redraw);
        tx.step(Step::Redraw);
        assert_eq!(rx.try_recv(), Ok(Step::Redraw));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn closure_sink_counts() {
        let mut n = 0;
        {
            let mut sink = from_fn(|_| n += 1);
            sink.step(Step::Redraw);
            sink.step(Step::Redraw);
        }
        assert_eq!(n, 2);
    }

    #[test]
    fn vec_sink_through_reference() {
        fn feed<S: StepSink>(mut sink: S) {
            sink.step(Step::Redraw);
        }
        let mut steps = Vec::new();
        feed(&mut steps);
        feed(&mut steps);
        assert_eq!(steps, vec![Step::Redraw, Step::Redraw]);
        NullSink.step(Step::Redraw);
    }
}
