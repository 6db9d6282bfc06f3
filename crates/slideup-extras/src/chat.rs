#![forbid(unsafe_code)]

//! Chat session shown inside the sheet.
//!
//! A [`ChatSession`] keeps the exchange history and asks a [`ChatResponder`]
//! for each reply. Responder failures never reach the caller: the session
//! records [`APOLOGY`] as the reply instead.

use std::fmt;

use web_time::SystemTime;

/// Reply recorded when the responder fails.
pub const APOLOGY: &str = "Sorry, I encountered an error. Please try again.";

/// One user message and its reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: u64,
    pub message: String,
    pub response: String,
    pub timestamp: SystemTime,
}

/// Errors from a responder.
#[derive(Debug)]
pub enum ChatError {
    /// The responder is not configured or reachable.
    Unavailable(String),
    /// The underlying transport failed.
    Transport(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for ChatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(why) => write!(f, "chat responder unavailable: {why}"),
            Self::Transport(e) => write!(f, "chat transport error: {e}"),
        }
    }
}

impl std::error::Error for ChatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Unavailable(_) => None,
            Self::Transport(e) => Some(e.as_ref()),
        }
    }
}

/// Produces a reply for a user message.
pub trait ChatResponder {
    fn respond(&mut self, message: &str) -> Result<String, ChatError>;
}

// ---------------------------------------------------------------------------
// Responders
// ---------------------------------------------------------------------------

const GREETING: &str = "Hello! Welcome to Seya BBM TV! How can I help you today?";
const CHANNELS: &str = "I can help you with channels and streaming! You can add new channels using web links, manage your uploads and downloads, and discover live content.";
const TRANSFERS: &str = "For uploads and downloads, you can monitor the speed and progress in real-time. Make sure you have a stable internet connection for the best experience.";
const HELP: &str = "I'm here to help! You can ask me about:\n• Adding channels\n• Upload/Download features\n• Streaming content\n• Account settings\n• Technical support";
const UNKNOWN: &str = "Thanks for your message! I'm still learning about Seya BBM TV. Is there something specific about streaming, channels, or uploads/downloads I can help you with?";

/// Offline responder matching case-insensitive keywords, first rule wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordResponder;

impl KeywordResponder {
    const RULES: &'static [(&'static [&'static str], &'static str)] = &[
        (&["hello", "hi"], GREETING),
        (&["channel", "stream"], CHANNELS),
        (&["upload", "download"], TRANSFERS),
        (&["help"], HELP),
    ];

    /// The reply for `message`. Never fails.
    #[must_use]
    pub fn reply(message: &str) -> &'static str {
        let lower = message.to_lowercase();
        Self::RULES
            .iter()
            .find(|(keys, _)| keys.iter().any(|k| lower.contains(k)))
            .map_or(UNKNOWN, |&(_, reply)| reply)
    }
}

impl ChatResponder for KeywordResponder {
    fn respond(&mut self, message: &str) -> Result<String, ChatError> {
        Ok(Self::reply(message).to_owned())
    }
}

/// Tries `primary` first and answers from `fallback` when it fails.
#[derive(Debug, Clone)]
pub struct FallbackResponder<P, F> {
    primary: P,
    fallback: F,
}

impl<P: ChatResponder, F: ChatResponder> FallbackResponder<P, F> {
    #[must_use]
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: ChatResponder, F: ChatResponder> ChatResponder for FallbackResponder<P, F> {
    fn respond(&mut self, message: &str) -> Result<String, ChatError> {
        match self.primary.respond(message) {
            Ok(reply) => Ok(reply),
            Err(e) => {
                tracing::info!(message = "chat.fallback", error = %e);
                self.fallback.respond(message)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Ordered chat history backed by a responder.
#[derive(Debug)]
pub struct ChatSession<R> {
    responder: R,
    messages: Vec<ChatMessage>,
    next_id: u64,
}

impl<R: ChatResponder> ChatSession<R> {
    #[must_use]
    pub fn new(responder: R) -> Self {
        Self {
            responder,
            messages: Vec::new(),
            next_id: 1,
        }
    }

    /// Send `message`, record the exchange, and return it.
    ///
    /// Surrounding whitespace is trimmed. A blank message is not sent and
    /// returns `None`.
    pub fn send(&mut self, message: impl AsRef<str>) -> Option<&ChatMessage> {
        let message = message.as_ref().trim();
        if message.is_empty() {
            return None;
        }
        let message = message.to_owned();
        let response = match self.responder.respond(&message) {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(message = "chat.error", error = %e);
                APOLOGY.to_owned()
            }
        };
        let id = self.next_id;
        self.next_id += 1;
        let index = self.messages.len();
        self.messages.push(ChatMessage {
            id,
            message,
            response,
            timestamp: SystemTime::now(),
        });
        self.messages.get(index)
    }

    /// Drop all history. Ids keep increasing.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    #[inline]
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    #[inline]
    #[must_use]
    pub fn responder(&self) -> &R {
        &self.responder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Down;

    impl ChatResponder for Down {
        fn respond(&mut self, _message: &str) -> Result<String, ChatError> {
            Err(ChatError::Unavailable("no api key".into()))
        }
    }

    struct Echo;

    impl ChatResponder for Echo {
        fn respond(&mut self, message: &str) -> Result<String, ChatError> {
            Ok(format!("echo: {message}"))
        }
    }

    #[test]
    fn keyword_table() {
        assert_eq!(KeywordResponder::reply("Hello there"), GREETING);
        assert_eq!(KeywordResponder::reply("add a CHANNEL"), CHANNELS);
        assert_eq!(KeywordResponder::reply("live stream?"), CHANNELS);
        assert_eq!(KeywordResponder::reply("slow download"), TRANSFERS);
        assert_eq!(KeywordResponder::reply("help"), HELP);
        assert_eq!(KeywordResponder::reply("weather"), UNKNOWN);
    }

    #[test]
    fn earlier_rules_win() {
        // "hi" is a substring of "this", so greeting beats help.
        assert_eq!(KeywordResponder::reply("this needs help"), GREETING);
        assert_eq!(KeywordResponder::reply("stream upload"), CHANNELS);
    }

    #[test]
    fn session_records_exchange() {
        let mut session = ChatSession::new(KeywordResponder);
        let reply = session.send("help me").expect("sent").response.clone();
        assert_eq!(reply, HELP);
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].message, "help me");
        assert_eq!(session.messages()[0].id, 1);
    }

    #[test]
    fn blank_messages_are_not_sent() {
        let mut session = ChatSession::new(KeywordResponder);
        assert!(session.send("").is_none());
        assert!(session.send("   \n\t").is_none());
        assert!(session.messages().is_empty());

        let sent = session.send("  help  ").expect("sent");
        assert_eq!(sent.message, "help");
        assert_eq!(sent.id, 1);
    }

    #[test]
    fn responder_error_becomes_apology() {
        let mut session = ChatSession::new(Down);
        assert_eq!(session.send("hello").expect("sent").response, APOLOGY);
        assert_eq!(session.messages()[0].response, APOLOGY);
    }

    #[test]
    fn clear_keeps_ids_unique() {
        let mut session = ChatSession::new(KeywordResponder);
        session.send("a");
        session.send("b");
        session.clear();
        assert!(session.messages().is_empty());
        assert_eq!(session.send("c").expect("sent").id, 3);
    }

    #[test]
    fn fallback_used_only_on_error() {
        let mut ok = FallbackResponder::new(Echo, KeywordResponder);
        assert_eq!(ok.respond("hi").expect("reply"), "echo: hi");

        let mut down = FallbackResponder::new(Down, Echo);
        assert_eq!(down.respond("hi").expect("reply"), "echo: hi");

        let mut both = FallbackResponder::new(Down, Down);
        assert!(both.respond("hi").is_err());
    }

    #[test]
    fn session_over_fallback_never_apologises_for_primary() {
        let mut session = ChatSession::new(FallbackResponder::new(Down, KeywordResponder));
        assert_eq!(session.send("hello").expect("sent").response, GREETING);
    }

    #[test]
    fn error_display_and_source() {
        use std::error::Error;
        let e = ChatError::Unavailable("no key".into());
        assert_eq!(e.to_string(), "chat responder unavailable: no key");
        assert!(e.source().is_none());

        let t = ChatError::Transport(Box::new(std::io::Error::other("timeout")));
        assert!(t.to_string().contains("timeout"));
        assert!(t.source().is_some());
    }
}
