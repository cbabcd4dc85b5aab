#[cfg(test)]
mod tests;

use crate::{PdfChatError, Result};

/// Typed fields for the question-answering prompt.
///
/// All three fields are required; rendering fails explicitly when one is
/// missing rather than substituting silently. `context` and `chat_history`
/// may be present but empty (no matching chunks, fresh session).
#[derive(Debug, Clone, Default)]
pub struct PromptFields {
    context: Option<String>,
    chat_history: Option<String>,
    question: Option<String>,
}

impl PromptFields {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    #[inline]
    pub fn chat_history(mut self, chat_history: impl Into<String>) -> Self {
        self.chat_history = Some(chat_history.into());
        self
    }

    #[inline]
    pub fn question(mut self, question: impl Into<String>) -> Self {
        self.question = Some(question.into());
        self
    }

    /// Render the fixed prompt: instruction preamble, delimited context
    /// block, delimited history block, the question, and an answer cue.
    #[inline]
    pub fn render(&self) -> Result<String> {
        let context = self
            .context
            .as_deref()
            .ok_or(PdfChatError::MissingPromptField("context"))?;
        let chat_history = self
            .chat_history
            .as_deref()
            .ok_or(PdfChatError::MissingPromptField("chat_history"))?;
        let question = self
            .question
            .as_deref()
            .ok_or(PdfChatError::MissingPromptField("question"))?;

        Ok(format!(
            "You are an assistant for question-answering tasks. Use the following pieces \
             of retrieved context to answer the question. If you don't know the answer, \
             just say that you don't know.\n\
             Use the following context (delimited by <ctx></ctx>) and the chat history \
             (delimited by <hs></hs>) to answer the question:\n\
             ------\n\
             <ctx>\n\
             {context}\n\
             </ctx>\n\
             ------\n\
             <hs>\n\
             {chat_history}\n\
             </hs>\n\
             ------\n\
             {question}\n\
             Answer:"
        ))
    }
}
