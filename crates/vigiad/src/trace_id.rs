//! Trace id generation for fallback decisions.

use std::sync::atomic::{AtomicU64, Ordering};

pub trait TraceIdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Random v4 UUIDs
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidTraceIds;

impl TraceIdGenerator for UuidTraceIds {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Deterministic ids (`<prefix>-1`, `<prefix>-2`, ...) for tests
#[derive(Debug)]
pub struct SequentialTraceIds {
    prefix: String,
    counter: AtomicU64,
}

impl SequentialTraceIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: AtomicU64::new(0),
        }
    }
}

impl TraceIdGenerator for SequentialTraceIds {
    fn next_id(&self) -> String {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{}-{}", self.prefix, n)
    }
}
