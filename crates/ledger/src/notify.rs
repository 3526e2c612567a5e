//! User-facing outcome notices.
//!
//! Every mutating session operation emits exactly one notice describing its
//! outcome. Delivery is fire-and-forget: the consuming UI reads from the
//! receiver half, and a dropped receiver silently discards notices.

use tokio::sync::mpsc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Positive,
    Negative,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

#[derive(Clone, Debug)]
pub struct Notifier {
    sender: mpsc::UnboundedSender<Notice>,
}

impl Notifier {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notice>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    pub fn positive(&self, message: impl Into<String>) {
        self.send(NoticeLevel::Positive, message.into());
    }

    pub fn negative(&self, message: impl Into<String>) {
        self.send(NoticeLevel::Negative, message.into());
    }

    fn send(&self, level: NoticeLevel, message: String) {
        let _ = self.sender.send(Notice { level, message });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn notices_arrive_in_order() {
        let (notifier, mut notices) = Notifier::channel();
        notifier.positive("saved");
        notifier.negative("failed");

        let first = notices.recv().await.unwrap();
        assert_eq!(first.level, NoticeLevel::Positive);
        assert_eq!(first.message, "saved");
        let second = notices.recv().await.unwrap();
        assert_eq!(second.level, NoticeLevel::Negative);
    }

    #[test]
    fn dropped_receiver_is_ignored() {
        let (notifier, notices) = Notifier::channel();
        drop(notices);
        notifier.positive("nobody listening");
    }
}
