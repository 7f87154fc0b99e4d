//! Scripted provider for tests

use super::Upstream;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

/// Answers each endpoint with a canned payload or transport failure
///
/// Endpoints are matched exactly first, then by longest prefix, so a script entry for
/// `nba-scoreboard-by-date` answers whatever date is appended. Unscripted
/// endpoints fail like a 404.
#[derive(Default)]
pub struct ScriptedUpstream {
    responses: Mutex<HashMap<String, std::result::Result<Value, String>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, endpoint: &str, payload: Value) -> &Self {
        self.responses
            .lock()
            .unwrap()
            .insert(endpoint.to_string(), Ok(payload));
        self
    }

    pub fn fail(&self, endpoint: &str, message: &str) -> &Self {
        self.responses
            .lock()
            .unwrap()
            .insert(endpoint.to_string(), Err(message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Upstream for ScriptedUpstream {
    async fn fetch(&self, endpoint: &str) -> Result<Value> {
        self.calls.lock().unwrap().push(endpoint.to_string());

        let responses = self.responses.lock().unwrap();
        let scripted = responses.get(endpoint).or_else(|| {
            responses
                .iter()
                .filter(|(key, _)| endpoint.starts_with(key.as_str()))
                .max_by_key(|(key, _)| key.len())
                .map(|(_, response)| response)
        });

        match scripted {
            Some(Ok(payload)) => Ok(payload.clone()),
            Some(Err(message)) => Err(AppError::UpstreamTransport(message.clone())),
            None => Err(AppError::UpstreamTransport(format!(
                "{} returned 404 Not Found",
                endpoint
            ))),
        }
    }
}
