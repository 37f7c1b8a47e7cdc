use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use cloudwatchlogs::error::ProvideErrorMetadata;

use super::*;

const THROTTLE_PAUSE: Duration = Duration::from_millis(20);

#[async_trait]
impl FilterLogClient for Client {
    async fn filter_logs(&self, input: &FilterLogsInput) -> Result<FilterOutput> {
        log::debug!("filter logs {:?}", input);
        let mut items: Vec<LogEvent> = vec![];
        let mut next_token: Option<String> = None;
        loop {
            let res = self
                .client
                .filter_log_events()
                .log_group_name(&input.group)
                .start_time(input.start)
                .set_end_time(input.end)
                .set_filter_pattern(input.filter.clone())
                .limit(input.limit)
                .set_next_token(next_token.clone())
                .send()
                .await;

            let throttled = matches!(&res, Err(err) if err.code() == Some("ThrottlingException"));
            if throttled {
                log::debug!("throttled, retrying");
                tokio::time::sleep(THROTTLE_PAUSE).await;
                continue;
            }

            let res = res
                .with_context(|| format!("failed to filter log events in {}", input.group))?;

            items.extend(res.events.unwrap_or_default().into_iter().map(|e| LogEvent {
                event_id: e.event_id.unwrap_or_default(),
                timestamp: e.timestamp.unwrap_or_default(),
                stream: e.log_stream_name.unwrap_or_default(),
                message: e.message.unwrap_or_default(),
            }));

            if res.next_token.is_none() {
                log::trace!("items {}", items.len());
                return Ok(FilterOutput { items });
            }

            next_token = res.next_token;

            log::debug!("nextToken is {:?}", &next_token);
        }
    }
}
