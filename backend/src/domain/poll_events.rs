//! Change events emitted by the poll store.
//!
//! Every subscriber receives every event; there is no per-poll routing. The
//! wire form is a JSON object tagged by `type`:
//!
//! ```text
//! {"type":"NEW_POLL","poll":{...public view...}}
//! {"type":"VOTE","pollId":"...","results":[0,1]}
//! {"type":"CLOSED","pollId":"..."}
//! ```

use serde::Serialize;

use crate::domain::{PollId, PollSummary};

/// Poll lifecycle events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PollEvent {
    /// A poll was created. Carries the public view only.
    NewPoll { poll: PollSummary },
    /// A ballot was accepted. Carries the full results vector.
    #[serde(rename_all = "camelCase")]
    Vote {
        poll_id: PollId,
        #[serde(rename = "results")]
        votes: Vec<u64>,
    },
    /// A poll moved from open to closed.
    #[serde(rename_all = "camelCase")]
    Closed { poll_id: PollId },
}

impl PollEvent {
    /// Wire name of the event, as found in the `type` field.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NewPoll { .. } => "NEW_POLL",
            Self::Vote { .. } => "VOTE",
            Self::Closed { .. } => "CLOSED",
        }
    }

    /// Poll the event refers to.
    #[must_use]
    pub const fn poll_id(&self) -> PollId {
        match self {
            Self::NewPoll { poll } => poll.id,
            Self::Vote { poll_id, .. } | Self::Closed { poll_id } => *poll_id,
        }
    }

    /// Serialise the event to its JSON text frame.
    pub fn to_message(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rstest::rstest;
    use serde_json::{Value, json};
    use uuid::Uuid;

    fn nil_id() -> PollId {
        PollId::from_uuid(Uuid::nil())
    }

    fn parse(event: &PollEvent) -> Value {
        let text = event.to_message().expect("event serialises");
        serde_json::from_str(&text).expect("event is valid JSON")
    }

    #[rstest]
    fn new_poll_carries_public_view() {
        let created_at = Utc
            .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp");
        let event = PollEvent::NewPoll {
            poll: PollSummary {
                id: nil_id(),
                question: "Best color?".to_owned(),
                options: vec!["Red".to_owned(), "Blue".to_owned()],
                created_at,
                closed: false,
            },
        };

        assert_eq!(
            parse(&event),
            json!({
                "type": "NEW_POLL",
                "poll": {
                    "id": "00000000-0000-0000-0000-000000000000",
                    "question": "Best color?",
                    "options": ["Red", "Blue"],
                    "createdAt": "2024-05-01T12:00:00Z",
                    "closed": false
                }
            })
        );
    }

    #[rstest]
    fn vote_carries_full_results() {
        let event = PollEvent::Vote {
            poll_id: nil_id(),
            votes: vec![0, 1],
        };
        assert_eq!(
            parse(&event),
            json!({
                "type": "VOTE",
                "pollId": "00000000-0000-0000-0000-000000000000",
                "results": [0, 1]
            })
        );
    }

    #[rstest]
    fn closed_carries_only_the_id() {
        let event = PollEvent::Closed { poll_id: nil_id() };
        assert_eq!(
            parse(&event),
            json!({
                "type": "CLOSED",
                "pollId": "00000000-0000-0000-0000-000000000000"
            })
        );
        assert_eq!(event.kind(), "CLOSED");
        assert_eq!(event.poll_id(), nil_id());
    }
}
