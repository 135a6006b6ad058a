#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use memo_fiche::{ContentLibrary, DefinitionService, StudyService, TextGenerator};

/// Generator returning a fixed response after an optional delay, counting
/// how many requests reached it.
pub struct ScriptedGenerator {
    response: String,
    delay: Duration,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn new(response: &str) -> Self {
        Self::with_delay(response, Duration::ZERO)
    }

    pub fn with_delay(response: &str, delay: Duration) -> Self {
        Self {
            response: response.to_string(),
            delay,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, _prompt: &str, _json_output: bool) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.response.clone())
    }

    fn provider_name(&self) -> &'static str {
        "Scripted"
    }
}

/// Generator whose every request fails at the transport level.
pub struct FailingGenerator;

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(&self, _prompt: &str, _json_output: bool) -> Result<String> {
        Err(anyhow::anyhow!("connection refused"))
    }

    fn provider_name(&self) -> &'static str {
        "Failing"
    }
}

/// Study service wired to the given generator, with no transition delay.
pub fn service_with_generator(generator: Arc<dyn TextGenerator>) -> StudyService {
    StudyService::new(
        ContentLibrary::bundled(),
        DefinitionService::with_generator(generator),
        Duration::ZERO,
    )
}

/// Study service with no remote backend at all.
pub fn offline_service() -> StudyService {
    StudyService::new(
        ContentLibrary::bundled(),
        DefinitionService::disabled(),
        Duration::ZERO,
    )
}
