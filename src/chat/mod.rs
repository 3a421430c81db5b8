// ABOUTME: Community chat widget - message log, input line and a delayed automated reply

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};

pub const BOT_NAME: &str = "Community Bot";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Bot,
}

impl ChatRole {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::User => "You",
            Self::Bot => BOT_NAME,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Bot,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Produces the automated answer to a user message
#[cfg_attr(test, mockall::automock)]
pub trait Responder: Send + Sync {
    fn respond(&self, message: &str) -> String;
}

/// Canned answers picked by keyword, first match wins
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordResponder;

/// How a keyword is compared against each word of the message
#[derive(Debug, Clone, Copy)]
enum Keyword {
    /// The whole word must match
    Word(&'static str),
    /// Any word starting with the stem matches, so "joining" counts as "join"
    Stem(&'static str),
}

impl Keyword {
    fn matches(self, word: &str) -> bool {
        match self {
            Self::Word(k) => word == k,
            Self::Stem(k) => word.starts_with(k),
        }
    }
}

const KEYWORD_REPLIES: &[(&[Keyword], &str)] = &[
    (
        &[Keyword::Word("hello"), Keyword::Word("hi"), Keyword::Word("hey")],
        "Hello! Welcome to Vision Hub Tanzania. How can we help you today?",
    ),
    (
        &[Keyword::Stem("event")],
        "We have several upcoming events! Check out our events section for more details and booking information.",
    ),
    (
        &[Keyword::Stem("join"), Keyword::Stem("member")],
        "Great to hear you're interested in joining us! Please fill out our membership application form to get started.",
    ),
    (
        &[Keyword::Stem("help"), Keyword::Stem("support")],
        "Our community moderators are here to help! You can also reach out to us directly via email.",
    ),
];

pub const FALLBACK_REPLY: &str =
    "Thanks for your message! A community moderator will respond to you soon.";

impl Responder for KeywordResponder {
    fn respond(&self, message: &str) -> String {
        let lower = message.to_lowercase();
        // Greetings match whole words only, so "this" does not count as "hi"
        let words: Vec<&str> = lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();

        KEYWORD_REPLIES
            .iter()
            .find(|(keywords, _)| {
                keywords
                    .iter()
                    .any(|k| words.iter().any(|word| k.matches(word)))
            })
            .map(|(_, reply)| reply.to_string())
            .unwrap_or_else(|| FALLBACK_REPLY.to_string())
    }
}

/// Chat state owned by the app. Replies are produced by a detached task
/// after `reply_delay` and collected on the next tick via `drain_replies`.
pub struct ChatState {
    pub messages: Vec<ChatMessage>,
    pub input: String,
    responder: Arc<dyn Responder>,
    reply_delay: Duration,
    reply_tx: mpsc::UnboundedSender<ChatMessage>,
    reply_rx: mpsc::UnboundedReceiver<ChatMessage>,
    pending_replies: usize,
}

impl ChatState {
    pub fn new(responder: Arc<dyn Responder>, reply_delay: Duration) -> Self {
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();
        Self {
            messages: Vec::new(),
            input: String::new(),
            responder,
            reply_delay,
            reply_tx,
            reply_rx,
            pending_replies: 0,
        }
    }

    pub fn with_keyword_responder(reply_delay: Duration) -> Self {
        Self::new(Arc::new(KeywordResponder), reply_delay)
    }

    /// Send the input line. Blank input is ignored and left as is.
    pub fn send(&mut self) -> bool {
        let text = self.input.trim().to_string();
        if text.is_empty() {
            return false;
        }
        self.input.clear();
        self.messages.push(ChatMessage::user(text.clone()));
        self.schedule_reply(&text);
        true
    }

    fn schedule_reply(&mut self, text: &str) {
        let reply = ChatMessage::bot(self.responder.respond(text));
        let tx = self.reply_tx.clone();
        let delay = self.reply_delay;
        self.pending_replies += 1;

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    tokio::time::sleep(delay).await;
                    // Receiver gone means the app is shutting down
                    if tx.send(reply).is_err() {
                        debug!("Chat closed before reply was delivered");
                    }
                });
            }
            Err(_) => {
                warn!("No async runtime, delivering chat reply without delay");
                let _ = tx.send(reply);
            }
        }
    }

    /// Move arrived replies into the log; returns how many arrived
    pub fn drain_replies(&mut self) -> usize {
        let mut count = 0;
        while let Ok(reply) = self.reply_rx.try_recv() {
            self.messages.push(reply);
            count += 1;
        }
        self.pending_replies = self.pending_replies.saturating_sub(count);
        count
    }

    /// Replies scheduled but not yet arrived
    pub fn is_awaiting_reply(&self) -> bool {
        self.pending_replies > 0
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn push_str(&mut self, text: &str) {
        self.input.extend(text.chars().filter(|c| *c != '\n' && *c != '\r'));
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    /// The last `n` messages, newest last. The view always follows the newest.
    pub fn tail(&self, n: usize) -> &[ChatMessage] {
        let start = self.messages.len().saturating_sub(n);
        &self.messages[start..]
    }
}

impl fmt::Debug for ChatState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatState")
            .field("messages", &self.messages.len())
            .field("input", &self.input)
            .field("reply_delay", &self.reply_delay)
            .field("pending_replies", &self.pending_replies)
            .finish()
    }
}

impl Default for ChatState {
    fn default() -> Self {
        Self::with_keyword_responder(Duration::from_secs(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    #[test]
    fn test_keyword_replies() {
        let bot = KeywordResponder;
        assert!(bot.respond("Hi there").starts_with("Hello! Welcome"));
        assert!(bot.respond("Any EVENTS this month?").contains("upcoming events"));
        assert!(bot.respond("how do I join?").contains("membership application"));
        assert!(bot.respond("need support").contains("moderators"));
        assert_eq!(bot.respond("this is nice"), FALLBACK_REPLY);
    }

    #[test]
    fn test_inflected_keywords_still_match() {
        let bot = KeywordResponder;
        assert!(bot
            .respond("I'm interested in joining")
            .contains("membership application"));
        assert!(bot.respond("Who are the members?").contains("membership application"));
        assert!(bot.respond("any upcoming eventful days").contains("upcoming events"));
        assert!(bot.respond("helpful tips please").contains("moderators"));
        // Greetings stay whole-word
        assert_eq!(bot.respond("history lessons"), FALLBACK_REPLY);
    }

    #[test]
    fn test_blank_input_is_ignored() {
        let mut chat = ChatState::default();
        chat.input = "   ".to_string();
        assert!(!chat.send());
        assert!(chat.messages.is_empty());
        assert_eq!(chat.input, "   ");
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_arrives_after_delay() {
        let mut responder = MockResponder::new();
        responder
            .expect_respond()
            .with(eq("hello"))
            .times(1)
            .returning(|_| "pong".to_string());

        let mut chat = ChatState::new(Arc::new(responder), Duration::from_millis(1000));
        chat.input = "  hello ".to_string();
        assert!(chat.send());
        assert!(chat.input.is_empty());
        assert_eq!(chat.messages.len(), 1);
        assert_eq!(chat.messages[0].content, "hello");
        assert!(chat.is_awaiting_reply());

        tokio::time::sleep(Duration::from_millis(999)).await;
        assert_eq!(chat.drain_replies(), 0);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(chat.drain_replies(), 1);
        assert_eq!(chat.messages[1].role, ChatRole::Bot);
        assert_eq!(chat.messages[1].content, "pong");
        assert!(!chat.is_awaiting_reply());
    }

    #[test]
    fn test_without_runtime_reply_is_immediate() {
        let mut chat = ChatState::default();
        chat.input = "hey".to_string();
        chat.send();
        assert_eq!(chat.drain_replies(), 1);
        assert_eq!(chat.tail(1)[0].role, ChatRole::Bot);
    }
}
