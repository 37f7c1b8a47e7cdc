use anyhow::Result;
use async_trait::async_trait;

use crate::models::QueryDescriptor;

#[derive(Debug, PartialEq, Clone, Default)]
pub struct LogEvent {
    pub event_id: String,
    pub timestamp: i64,
    pub stream: String,
    pub message: String,
}

#[derive(Debug, PartialEq, Clone)]
pub struct FilterLogsInput {
    pub group: String,
    pub filter: Option<String>,
    pub start: i64,
    pub end: Option<i64>,
    pub limit: i32,
    pub interleaved: bool,
}

impl From<&QueryDescriptor> for FilterLogsInput {
    fn from(q: &QueryDescriptor) -> Self {
        Self {
            group: q.group.clone(),
            filter: q.filter.clone(),
            start: q.start.timestamp_millis(),
            end: Some(q.end.timestamp_millis()),
            limit: q.limit,
            interleaved: q.interleaved,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Default)]
pub struct FilterOutput {
    pub items: Vec<LogEvent>,
}

#[async_trait]
pub trait FilterLogClient {
    async fn filter_logs(&self, input: &FilterLogsInput) -> Result<FilterOutput>;
}
