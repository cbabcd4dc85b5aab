
use itertools::Itertools;
use uuid::Uuid;

/// One question/answer turn in a conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub question: String,
    pub answer: String,
}

/// Conversation state for a single chat session.
///
/// Owned by the caller and passed by reference into the query engine; all
/// exchanges are kept for the lifetime of the session, but only the most
/// recent `window` are included in prompts. Older exchanges are dropped from
/// the prompt, not summarized.
#[derive(Debug, Clone)]
pub struct ChatSession {
    id: Uuid,
    exchanges: Vec<Exchange>,
    window: usize,
}

impl ChatSession {
    #[inline]
    pub fn new(window: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            exchanges: Vec::new(),
            window,
        }
    }

    #[inline]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    /// Record a completed exchange
    #[inline]
    pub fn record(&mut self, question: &str, answer: &str) {
        self.exchanges.push(Exchange {
            question: question.to_string(),
            answer: answer.to_string(),
        });
    }

    /// The most recent exchanges that fit the window, oldest first
    #[inline]
    pub fn window_exchanges(&self) -> &[Exchange] {
        let start = self.exchanges.len().saturating_sub(self.window);
        &self.exchanges[start..]
    }

    /// Format the windowed history for inclusion in a prompt.
    ///
    /// Empty when the session has no exchanges yet.
    #[inline]
    pub fn history_block(&self) -> String {
        self.window_exchanges()
            .iter()
            .map(|exchange| {
                format!(
                    "Human: {}\nAssistant: {}",
                    exchange.question, exchange.answer
                )
            })
            .join("\n")
    }
}
