use crossbeam_channel::Sender;

/// Side channel for batch progress. Implementations must not influence the batch.
pub trait Progress {
    /// `fraction` is in `0.0..=1.0`
    fn report(&mut self, fraction: f32, label: &str);
}

impl<F: FnMut(f32, &str)> Progress for F {
    fn report(&mut self, fraction: f32, label: &str) {
        self(fraction, label)
    }
}

/// Discards every report
#[derive(Debug, Default, Copy, Clone)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn report(&mut self, _fraction: f32, _label: &str) {}
}

/// Emits reports as `tracing` events
#[derive(Debug, Default, Copy, Clone)]
pub struct TraceProgress;

impl Progress for TraceProgress {
    fn report(&mut self, fraction: f32, label: &str) {
        tracing::trace!(fraction, "{label}");
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressEvent {
    pub fraction: f32,
    pub label: String,
}

/// Forwards reports to another thread, e.g. a progress bar.
///
/// A disconnected receiver is ignored.
#[derive(Debug, Clone)]
pub struct ChannelProgress {
    sender: Sender<ProgressEvent>,
}

impl ChannelProgress {
    pub fn new(sender: Sender<ProgressEvent>) -> Self {
        Self { sender }
    }
}

impl Progress for ChannelProgress {
    fn report(&mut self, fraction: f32, label: &str) {
        let _ = self.sender.send(ProgressEvent {
            fraction,
            label: label.to_string(),
        });
    }
}

pub(crate) fn fraction(done: usize, total: usize) -> f32 {
    if total == 0 {
        1.0
    } else {
        done as f32 / total as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_progress() {
        let mut seen = Vec::new();
        {
            let mut progress = |fraction: f32, label: &str| seen.push((fraction, label.to_string()));
            progress.report(0.5, "half");
        }
        assert_eq!(seen, vec![(0.5, "half".to_string())]);
    }

    #[test]
    fn test_channel_progress_forwards() {
        let (sender, receiver) = crossbeam_channel::unbounded();
        let mut progress = ChannelProgress::new(sender);
        progress.report(0.25, "quarter");
        assert_eq!(
            receiver.try_recv().unwrap(),
            ProgressEvent {
                fraction: 0.25,
                label: "quarter".to_string()
            }
        );
    }

    #[test]
    fn test_channel_progress_ignores_closed_receiver() {
        let (sender, receiver) = crossbeam_channel::unbounded();
        drop(receiver);
        let mut progress = ChannelProgress::new(sender);
        progress.report(1.0, "done");
    }

    #[test]
    fn test_fraction() {
        assert_eq!(fraction(0, 0), 1.0);
        assert_eq!(fraction(1, 4), 0.25);
    }
}
