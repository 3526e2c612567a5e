//! Process-wide currency change broadcast.

use tokio::sync::broadcast;

use crate::currency::CurrencyChange;

/// Typed publish/subscribe channel for display-currency changes.
///
/// Multiple subscribers may coexist; events are delivered in publish order.
/// A subscription lives as long as the receiver, so a consumer that drops
/// its receiver is automatically unsubscribed.
#[derive(Clone, Debug)]
pub struct CurrencyEvents {
    sender: broadcast::Sender<CurrencyChange>,
}

impl CurrencyEvents {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Broadcasts a change to all current subscribers, returning how many
    /// there are. Publishing with no subscribers is not an error.
    pub fn publish(&self, change: CurrencyChange) -> usize {
        self.sender.send(change).unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CurrencyChange> {
        self.sender.subscribe()
    }
}

impl Default for CurrencyEvents {
    fn default() -> Self {
        Self::new(16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn delivers_events_to_every_subscriber_in_order() {
        let events = CurrencyEvents::default();
        let mut first = events.subscribe();
        let mut second = events.subscribe();

        let change = CurrencyChange {
            code: "EUR".to_string(),
            symbol: "€".to_string(),
            conversion_rate: 0.9,
        };
        assert_eq!(events.publish(change.clone()), 2);

        assert_eq!(first.recv().await.unwrap(), change);
        assert_eq!(second.recv().await.unwrap(), change);
    }

    #[tokio::test]
    async fn publishing_without_subscribers_is_harmless() {
        let events = CurrencyEvents::default();
        let receivers = events.publish(CurrencyChange {
            code: "GBP".to_string(),
            symbol: "£".to_string(),
            conversion_rate: 0.8,
        });
        assert_eq!(receivers, 0);
    }
}
