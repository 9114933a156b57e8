//! Progress events emitted at generation and iteration boundaries.
//!
//! Runners call [`ProgressReporter::report`] once per generation (genetic
//! search) or iteration (annealing). Closures implement the trait directly;
//! [`ChannelReporter`] turns the events into a stream readable from another
//! thread, and [`Broadcast`] fans one event out to several subscribers.

use crate::fitness::Fitness;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

/// Snapshot of a running search.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    Generation {
        generation: usize,
        best_fitness: Fitness,
        /// Mean fitness of the feasible candidates, `None` if there are none.
        average_fitness: Option<f64>,
    },
    Iteration {
        iteration: usize,
        /// Temperature after this iteration's cooling step.
        temperature: f64,
        current_fitness: Fitness,
        best_fitness: Fitness,
    },
}

impl ProgressEvent {
    /// Generation or iteration number, starting at 1.
    pub fn step(&self) -> usize {
        match self {
            ProgressEvent::Generation { generation, .. } => *generation,
            ProgressEvent::Iteration { iteration, .. } => *iteration,
        }
    }

    pub fn best_fitness(&self) -> Fitness {
        match self {
            ProgressEvent::Generation { best_fitness, .. }
            | ProgressEvent::Iteration { best_fitness, .. } => *best_fitness,
        }
    }
}

/// Receives progress events.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, event: &ProgressEvent);
}

impl<F> ProgressReporter for F
where
    F: Fn(&ProgressEvent) + Send + Sync,
{
    fn report(&self, event: &ProgressEvent) {
        self(event)
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl ProgressReporter for Silent {
    fn report(&self, _event: &ProgressEvent) {}
}

/// Forwards events into an `mpsc` channel.
///
/// Sending never blocks; events are dropped once the receiver is gone.
#[derive(Debug, Clone)]
pub struct ChannelReporter {
    sender: Sender<ProgressEvent>,
}

impl ChannelReporter {
    pub fn new(sender: Sender<ProgressEvent>) -> Self {
        Self { sender }
    }

    /// Creates a reporter together with the receiving end of its stream.
    pub fn channel() -> (Self, Receiver<ProgressEvent>) {
        let (sender, receiver) = mpsc::channel();
        (Self::new(sender), receiver)
    }
}

impl ProgressReporter for ChannelReporter {
    fn report(&self, event: &ProgressEvent) {
        let _ = self.sender.send(event.clone());
    }
}

/// Delivers each event to every subscriber in subscription order.
#[derive(Clone, Default)]
pub struct Broadcast {
    subscribers: Vec<Arc<dyn ProgressReporter>>,
}

impl Broadcast {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, reporter: Arc<dyn ProgressReporter>) {
        self.subscribers.push(reporter);
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl std::fmt::Debug for Broadcast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Broadcast")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl ProgressReporter for Broadcast {
    fn report(&self, event: &ProgressEvent) {
        for subscriber in &self.subscribers {
            subscriber.report(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn event(generation: usize) -> ProgressEvent {
        ProgressEvent::Generation {
            generation,
            best_fitness: Fitness::Feasible(1.0),
            average_fitness: Some(0.5),
        }
    }

    #[test]
    fn test_closure_reporter() {
        let seen = Mutex::new(Vec::new());
        let reporter = |e: &ProgressEvent| seen.lock().unwrap().push(e.step());
        reporter.report(&event(1));
        reporter.report(&event(2));
        assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_channel_stream() {
        let (reporter, stream) = ChannelReporter::channel();
        reporter.report(&event(1));
        reporter.report(&event(2));
        drop(reporter);
        let steps: Vec<usize> = stream.iter().map(|e| e.step()).collect();
        assert_eq!(steps, vec![1, 2]);
    }

    #[test]
    fn test_channel_ignores_dropped_receiver() {
        let (reporter, stream) = ChannelReporter::channel();
        drop(stream);
        reporter.report(&event(1));
    }

    #[test]
    fn test_broadcast_reaches_all() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut hub = Broadcast::new();
        for _ in 0..3 {
            let count = Arc::clone(&count);
            hub.subscribe(Arc::new(move |_: &ProgressEvent| {
                count.fetch_add(1, Ordering::Relaxed);
            }));
        }
        hub.report(&event(1));
        assert_eq!(count.load(Ordering::Relaxed), 3);
        assert_eq!(hub.len(), 3);
    }

    #[test]
    fn test_event_accessors() {
        let e = ProgressEvent::Iteration {
            iteration: 4,
            temperature: 10.0,
            current_fitness: Fitness::Feasible(2.0),
            best_fitness: Fitness::Feasible(3.0),
        };
        assert_eq!(e.step(), 4);
        assert_eq!(e.best_fitness(), Fitness::Feasible(3.0));
    }
}
