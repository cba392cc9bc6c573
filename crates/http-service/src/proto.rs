use serde::{Deserialize, Serialize};
use unibot_service::{Query, Reply};

// ------------------------
// Types sent to the server
// ------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ChatRequest<'a> {
    pub text: &'a str,
}

// ------------------------------
// Types received from the server
// ------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct ChatReply {
    pub response: Option<String>,
    pub intent: Option<String>,
    pub language: Option<String>,
}

// -----------
// Conversions
// -----------

#[inline]
pub fn create_request(query: &Query) -> ChatRequest<'_> {
    ChatRequest { text: &query.text }
}

#[inline]
pub fn into_reply(raw: ChatReply) -> Reply {
    Reply {
        response: raw.response,
        intent: raw.intent,
        language: raw.language,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_create_request() {
        let query = Query::new("  How much is the hostel fee?  ");
        let payload = serde_json::to_value(create_request(&query)).unwrap();
        // The text goes out untrimmed; the server decides what to do
        // with surrounding whitespace.
        assert_eq!(payload, json!({ "text": "  How much is the hostel fee?  " }));
    }

    #[test]
    fn test_decode_reply() {
        let raw: ChatReply = serde_json::from_value(json!({
            "response": "₹1,95,000 per year",
            "intent": "btech_fee",
            "language": "en"
        }))
        .unwrap();
        let reply = into_reply(raw);
        assert_eq!(reply.answer(), Some("₹1,95,000 per year"));
        assert_eq!(reply.intent.as_deref(), Some("btech_fee"));
    }

    #[test]
    fn test_decode_bare_reply() {
        // A server that omits every field is still a successful reply.
        let raw: ChatReply = serde_json::from_value(json!({})).unwrap();
        let reply = into_reply(raw);
        assert_eq!(reply.answer(), None);
    }
}
