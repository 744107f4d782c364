//! Live subscription to the results feed.
//!
//! Two states: unsubscribed and subscribed. While subscribed, a
//! background task polls the feed and delivers full-replacement event
//! snapshots over a channel whenever the payload changes. The previous
//! snapshot stays valid until the next one arrives, so consumers never
//! flicker to an empty board during a fetch. Unsubscribing aborts the
//! task; dropping the adapter does the same.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::feed::FeedClient;
use crate::models::EventRecord;

/// Messages delivered to the subscriber.
#[derive(Debug, Clone)]
pub enum FeedUpdate {
    /// A full replacement for the event list
    Snapshot(Vec<EventRecord>),
    /// The feed could not be reached; the current list stays valid
    Unavailable(String),
}

pub struct LiveEvents {
    client: FeedClient,
    interval: Duration,
    handle: Option<JoinHandle<()>>,
}

impl LiveEvents {
    pub fn new(client: FeedClient, interval: Duration) -> Self {
        Self {
            client,
            interval,
            handle: None,
        }
    }

    /// Start polling, delivering updates to `tx`. An existing
    /// subscription is cancelled first, so at most one poll task runs.
    pub fn subscribe(&mut self, tx: mpsc::Sender<FeedUpdate>) {
        self.unsubscribe();
        let client = self.client.clone();
        let interval = self.interval;
        self.handle = Some(tokio::spawn(async move {
            poll_loop(client, interval, tx).await;
        }));
        debug!("Feed subscription started");
    }

    pub fn is_subscribed(&self) -> bool {
        self.handle.is_some()
    }

    /// Stop polling. Safe to call when already unsubscribed.
    pub fn unsubscribe(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!("Feed subscription cancelled");
        }
    }
}

impl Drop for LiveEvents {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

async fn poll_loop(client: FeedClient, interval: Duration, tx: mpsc::Sender<FeedUpdate>) {
    let mut last: Option<Vec<EventRecord>> = None;

    loop {
        match client.fetch_events().await {
            Ok(events) => {
                if last.as_ref() != Some(&events) {
                    last = Some(events.clone());
                    if tx.send(FeedUpdate::Snapshot(events)).await.is_err() {
                        debug!("Feed subscriber dropped, stopping poll");
                        return;
                    }
                } else {
                    debug!("Feed unchanged");
                }
            }
            Err(e) => {
                warn!(error = %e, "Feed poll failed");
                if tx.send(FeedUpdate::Unavailable(e.to_string())).await.is_err() {
                    return;
                }
            }
        }

        tokio::time::sleep(interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    const RECV_TIMEOUT: Duration = Duration::from_secs(5);

    // Nothing listens on port 9; every poll errors immediately
    fn unreachable_client() -> FeedClient {
        FeedClient::new("http://127.0.0.1:9/api/v1").unwrap()
    }

    #[tokio::test]
    async fn test_subscribe_and_unsubscribe_transitions() {
        let mut live = LiveEvents::new(unreachable_client(), Duration::from_millis(10));
        assert!(!live.is_subscribed());

        let (tx, _rx) = mpsc::channel(8);
        live.subscribe(tx);
        assert!(live.is_subscribed());

        live.unsubscribe();
        assert!(!live.is_subscribed());
        // Unsubscribing again is a no-op
        live.unsubscribe();
        assert!(!live.is_subscribed());
    }

    #[tokio::test]
    async fn test_unreachable_feed_reports_unavailable() {
        let mut live = LiveEvents::new(unreachable_client(), Duration::from_millis(10));
        let (tx, mut rx) = mpsc::channel(8);
        live.subscribe(tx);

        let update = timeout(RECV_TIMEOUT, rx.recv()).await.unwrap();
        match update {
            Some(FeedUpdate::Unavailable(_)) => {}
            other => panic!("expected Unavailable, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unsubscribe_closes_channel() {
        let mut live = LiveEvents::new(unreachable_client(), Duration::from_millis(10));
        let (tx, mut rx) = mpsc::channel(8);
        live.subscribe(tx);
        live.unsubscribe();

        // The aborted task drops its sender, so the channel drains to None
        loop {
            match timeout(RECV_TIMEOUT, rx.recv()).await.unwrap() {
                Some(_) => continue,
                None => break,
            }
        }
    }

    #[tokio::test]
    async fn test_resubscribe_replaces_poll_task() {
        let mut live = LiveEvents::new(unreachable_client(), Duration::from_millis(10));
        let (tx1, mut rx1) = mpsc::channel(8);
        live.subscribe(tx1);

        let (tx2, mut rx2) = mpsc::channel(8);
        live.subscribe(tx2);
        assert!(live.is_subscribed());

        // Old channel closes, new channel receives
        loop {
            match timeout(RECV_TIMEOUT, rx1.recv()).await.unwrap() {
                Some(_) => continue,
                None => break,
            }
        }
        assert!(timeout(RECV_TIMEOUT, rx2.recv()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_drop_cancels_subscription() {
        let (tx, mut rx) = mpsc::channel(8);
        {
            let mut live = LiveEvents::new(unreachable_client(), Duration::from_millis(10));
            live.subscribe(tx);
        }

        loop {
            match timeout(RECV_TIMEOUT, rx.recv()).await.unwrap() {
                Some(_) => continue,
                None => break,
            }
        }
    }
}
