//! Sources of dictated sentences.
//!
//! A dictation source is polled on a timer. Each poll yields at most one
//! sentence, which the session treats exactly like typed input.

use std::collections::VecDeque;

use async_trait::async_trait;
use url::Url;

use crate::error::ChatError;

#[async_trait]
pub trait Dictation: Send {
    /// The next pending sentence, if there is one.
    async fn poll(&mut self) -> Result<Option<String>, ChatError>;
}

/// Polls an HTTP endpoint that answers each GET with the next sentence, or
/// an empty body when nothing was dictated.
#[derive(Debug, Clone)]
pub struct HttpDictation {
    client: reqwest::Client,
    url: Url,
}

impl HttpDictation {
    pub fn new(url: Url) -> Self {
        HttpDictation {
            client: reqwest::Client::new(),
            url,
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl Dictation for HttpDictation {
    async fn poll(&mut self) -> Result<Option<String>, ChatError> {
        let body = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|error| ChatError::Dictation(error.to_string()))?
            .text()
            .await
            .map_err(|error| ChatError::Dictation(error.to_string()))?;
        Ok(sentence(&body))
    }
}

/// Sentences queued up front, handed out one per poll.
#[derive(Debug, Clone, Default)]
pub struct QueuedDictation {
    pending: VecDeque<String>,
}

impl QueuedDictation {
    pub fn new<I, S>(sentences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        QueuedDictation {
            pending: sentences.into_iter().map(Into::into).collect(),
        }
    }

    pub fn push(&mut self, sentence: impl Into<String>) {
        self.pending.push_back(sentence.into());
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[async_trait]
impl Dictation for QueuedDictation {
    async fn poll(&mut self) -> Result<Option<String>, ChatError> {
        while let Some(next) = self.pending.pop_front() {
            if let Some(sentence) = sentence(&next) {
                return Ok(Some(sentence));
            }
        }
        Ok(None)
    }
}

fn sentence(body: &str) -> Option<String> {
    let trimmed = body.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn queue_hands_out_one_sentence_per_poll() {
        let mut dictation = QueuedDictation::new(["  draw me a cube ", "", "bye"]);
        assert_eq!(dictation.poll().await.unwrap().as_deref(), Some("draw me a cube"));
        assert_eq!(dictation.poll().await.unwrap().as_deref(), Some("bye"));
        assert_eq!(dictation.poll().await.unwrap(), None);

        dictation.push("hello");
        assert_eq!(dictation.len(), 1);
        assert_eq!(dictation.poll().await.unwrap().as_deref(), Some("hello"));
        assert!(dictation.is_empty());
    }

    #[test]
    fn blank_bodies_are_not_sentences() {
        assert_eq!(sentence(" \n"), None);
        assert_eq!(sentence("hi\n").as_deref(), Some("hi"));
    }
}
