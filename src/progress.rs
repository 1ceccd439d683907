use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::debug;

/// Registry of per-job progress channels. Owned and injected explicitly,
/// never held as ambient global state. At most one channel per job id;
/// subscribing again replaces the previous channel.
///
/// Reporting is advisory only: unknown job ids and closed receivers are
/// silently ignored, and no messages are buffered for late subscribers.
#[derive(Default)]
pub struct ProgressRegistry {
    channels: Mutex<HashMap<String, UnboundedSender<String>>>,
}

impl ProgressRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, job_id: &str) -> UnboundedReceiver<String> {
        let (tx, rx) = unbounded_channel();
        let mut channels = self.channels.lock().unwrap();
        channels.insert(job_id.to_string(), tx);
        rx
    }

    pub fn unsubscribe(&self, job_id: &str) {
        let mut channels = self.channels.lock().unwrap();
        channels.remove(job_id);
    }

    pub fn report(&self, job_id: Option<&str>, message: &str) {
        let Some(job_id) = job_id else { return };
        let channels = self.channels.lock().unwrap();
        if let Some(tx) = channels.get(job_id) {
            if tx.send(message.to_string()).is_err() {
                debug!("Progress receiver for job {} is gone", job_id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_report_delivers_to_subscriber() {
        let registry = ProgressRegistry::new();
        let mut rx = registry.subscribe("job1");
        registry.report(Some("job1"), "Searching locations");
        assert_eq!(rx.recv().await.unwrap(), "Searching locations");
    }

    #[test]
    fn test_report_without_subscriber_is_noop() {
        let registry = ProgressRegistry::new();
        registry.report(Some("missing"), "hello");
        registry.report(None, "hello");
    }

    #[tokio::test]
    async fn test_unsubscribe_stops_delivery() {
        let registry = ProgressRegistry::new();
        let mut rx = registry.subscribe("job1");
        registry.unsubscribe("job1");
        registry.report(Some("job1"), "late");
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_resubscribe_replaces_channel() {
        let registry = ProgressRegistry::new();
        let mut first = registry.subscribe("job1");
        let mut second = registry.subscribe("job1");
        registry.report(Some("job1"), "msg");
        assert!(first.recv().await.is_none());
        assert_eq!(second.recv().await.unwrap(), "msg");
    }

    #[tokio::test]
    async fn test_dropped_receiver_does_not_error() {
        let registry = ProgressRegistry::new();
        let rx = registry.subscribe("job1");
        drop(rx);
        registry.report(Some("job1"), "into the void");
    }
}
