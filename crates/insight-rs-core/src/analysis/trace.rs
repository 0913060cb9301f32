//! Step channel between the conversation loop and its consumer.

use crate::error::InsightCoreError;
use insight_rs_protocol::Step;
use log::debug;
use tokio::sync::mpsc;

/// Producer half of a per-analysis step channel.
///
/// A detached sender drops every step, which is how the non-streaming path
/// runs the same loop.
#[derive(Debug, Clone, Default)]
pub struct TraceSender {
    sender: Option<mpsc::Sender<Step>>,
}

impl TraceSender {
    /// Create a bounded channel of `buffer` steps.
    pub fn channel(buffer: usize) -> (Self, mpsc::Receiver<Step>) {
        let (sender, receiver) = mpsc::channel(buffer.max(1));
        (
            Self {
                sender: Some(sender),
            },
            receiver,
        )
    }

    /// A sender with no consumer.
    pub fn detached() -> Self {
        Self::default()
    }

    /// Forward a step, waiting for capacity.
    ///
    /// Fails with `Cancelled` once the receiver has been dropped.
    pub async fn send(&self, step: Step) -> Result<(), InsightCoreError> {
        let Some(sender) = &self.sender else {
            return Ok(());
        };
        let step_id = step.id;
        let kind = step.kind.label();
        sender
            .send(step)
            .await
            .map_err(|_| InsightCoreError::Cancelled)?;
        debug!("trace step emitted (step_id={}, kind={})", step_id, kind);
        Ok(())
    }

    /// Fail with `Cancelled` if an attached consumer has gone away.
    pub fn ensure_attached(&self) -> Result<(), InsightCoreError> {
        match &self.sender {
            Some(sender) if sender.is_closed() => Err(InsightCoreError::Cancelled),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TraceSender;
    use crate::error::InsightCoreError;
    use insight_rs_protocol::{Analysis, StepKind};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn steps_arrive_in_send_order() {
        let (sender, mut receiver) = TraceSender::channel(4);
        let mut analysis = Analysis::new("q");
        let first = analysis.push_step(StepKind::Reasoning {
            content: "one".to_string(),
        });
        let second = analysis.push_step(StepKind::Reasoning {
            content: "two".to_string(),
        });
        sender.send(first.clone()).await.expect("first");
        sender.send(second.clone()).await.expect("second");

        assert_eq!(receiver.recv().await, Some(first));
        assert_eq!(receiver.recv().await, Some(second));
    }

    #[tokio::test]
    async fn dropped_receiver_cancels() {
        let (sender, receiver) = TraceSender::channel(1);
        drop(receiver);
        assert!(matches!(
            sender.ensure_attached(),
            Err(InsightCoreError::Cancelled)
        ));
        let step = Analysis::new("q").push_step(StepKind::Result {
            content: "done".to_string(),
        });
        assert!(matches!(
            sender.send(step).await,
            Err(InsightCoreError::Cancelled)
        ));
    }

    #[tokio::test]
    async fn detached_sender_accepts_everything() {
        let sender = TraceSender::detached();
        let step = Analysis::new("q").push_step(StepKind::Result {
            content: "done".to_string(),
        });
        sender.send(step).await.expect("detached");
        sender.ensure_attached().expect("never cancelled");
    }
}
