#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rolecheck_core::{ChatModel, LlmRequest, LlmResponse, RolecheckError, TokenUsage};

pub fn reply(content: &str, total: u32) -> LlmResponse {
    LlmResponse {
        content: content.to_string(),
        usage: Some(TokenUsage::new(total - total / 4, total / 4, total)),
    }
}

/// Returns queued replies in order, failing once the queue is empty.
pub struct ScriptedModel {
    replies: Mutex<VecDeque<Result<LlmResponse, RolecheckError>>>,
    pub calls: AtomicUsize,
    pub requests: Mutex<Vec<LlmRequest>>,
}

impl ScriptedModel {
    pub fn new(replies: Vec<Result<LlmResponse, RolecheckError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ChatModel for ScriptedModel {
    async fn invoke(&self, request: LlmRequest) -> Result<LlmResponse, RolecheckError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(RolecheckError::LlmProvider("script exhausted".to_string())))
    }
}

/// Answers based on the document text in the user message.
pub struct DocumentModel {
    replies: HashMap<String, LlmResponse>,
    failing: Vec<String>,
    pub calls: AtomicUsize,
}

impl DocumentModel {
    pub fn new() -> Self {
        Self {
            replies: HashMap::new(),
            failing: Vec::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn answer(mut self, document_text: &str, response: LlmResponse) -> Self {
        self.replies.insert(document_text.to_string(), response);
        self
    }

    pub fn fail_on(mut self, document_text: &str) -> Self {
        self.failing.push(document_text.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ChatModel for DocumentModel {
    async fn invoke(&self, request: LlmRequest) -> Result<LlmResponse, RolecheckError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let text = request
            .messages
            .last()
            .and_then(|message| message.content.strip_prefix("DOCUMENT:\n"))
            .unwrap_or_default()
            .to_string();
        if self.failing.contains(&text) {
            return Err(RolecheckError::LlmProvider("connection reset".to_string()));
        }
        self.replies
            .get(&text)
            .cloned()
            .ok_or_else(|| RolecheckError::LlmProvider(format!("no reply for '{text}'")))
    }
}
