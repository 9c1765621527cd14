//! Shared helper utilities for client integration tests.
//!
//! Integration tests compile as separate crates under `client/tests/`, which
//! makes it awkward to share small helpers without copy/paste. This module
//! provides the scripted transport double both suites drive the public API
//! with.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use client::ApiResult;
use client::domain::ports::{ApiTransport, HttpMethod};
use serde_json::Value;

/// One request observed by the scripted transport.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub method: HttpMethod,
    pub path: String,
    pub body: Option<Value>,
}

/// Transport double that replays scripted responses and records every call.
#[derive(Clone)]
pub struct ScriptedTransport {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    responses: Arc<Mutex<VecDeque<ApiResult<Value>>>>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<ApiResult<Value>>) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            responses: Arc::new(Mutex::new(VecDeque::from(responses))),
        }
    }

    pub fn push_response(&self, response: ApiResult<Value>) {
        self.responses
            .lock()
            .expect("responses lock")
            .push_back(response);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl ApiTransport for ScriptedTransport {
    async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> ApiResult<Value> {
        self.calls.lock().expect("calls lock").push(RecordedCall {
            method,
            path: path.to_owned(),
            body,
        });
        self.responses
            .lock()
            .expect("responses lock")
            .pop_front()
            .expect("transport script should contain a response")
    }
}
