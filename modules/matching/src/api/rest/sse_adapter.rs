use apikit::SseBroadcaster;

use crate::domain::{events::MatchingDomainEvent, ports::EventPublisher};

use super::dto::MatchEvent;

/// Adapter: implements the domain port and forwards events into the SSE
/// broadcaster. The send is non-blocking and lossy; a failed fan-out
/// never touches the write that produced the event.
pub struct SseMatchEventPublisher {
    out: SseBroadcaster<MatchEvent>,
}

impl SseMatchEventPublisher {
    pub fn new(out: SseBroadcaster<MatchEvent>) -> Self {
        Self { out }
    }
}

impl EventPublisher<MatchingDomainEvent> for SseMatchEventPublisher {
    fn publish(&self, event: &MatchingDomainEvent) {
        self.out.send(MatchEvent::from(event));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use futures::StreamExt;
    use tokio::time::{timeout, Duration};
    use uuid::Uuid;

    use crate::contract::model::LikeTarget;

    #[tokio::test]
    async fn adapter_publishes_domain_events() {
        let broadcaster = SseBroadcaster::<MatchEvent>::new(10);
        let adapter = SseMatchEventPublisher::new(broadcaster.clone());
        let mut stream = Box::pin(broadcaster.subscribe_stream());

        let match_id = Uuid::new_v4();
        let at = Utc::now();
        adapter.publish(&MatchingDomainEvent::MatchCreated {
            match_id,
            users: [Uuid::new_v4(), Uuid::new_v4()],
            listing: LikeTarget::Listing(Uuid::new_v4()),
            at,
        });

        let received = timeout(Duration::from_millis(100), stream.next())
            .await
            .expect("timeout")
            .expect("event received");
        assert_eq!(received.kind, "match_created");
        assert_eq!(received.match_id, match_id);
        assert_eq!(received.at, at);
    }

    #[tokio::test]
    async fn adapter_handles_message_events() {
        let broadcaster = SseBroadcaster::<MatchEvent>::new(10);
        let adapter = SseMatchEventPublisher::new(broadcaster.clone());
        let mut stream = Box::pin(broadcaster.subscribe_stream());

        let message_id = Uuid::new_v4();
        adapter.publish(&MatchingDomainEvent::MessageCreated {
            match_id: Uuid::new_v4(),
            message_id,
            sender_id: Uuid::new_v4(),
            at: Utc::now(),
        });

        let received = timeout(Duration::from_millis(100), stream.next())
            .await
            .expect("timeout")
            .expect("event received");
        assert_eq!(received.kind, "message_created");
        assert_eq!(received.message_id, Some(message_id));
    }
}
