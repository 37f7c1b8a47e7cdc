use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use lru::LruCache;

use crate::client::{FilterLogClient, FilterLogsInput};
use crate::models::QueryDescriptor;
use crate::printer::Printer;

const SEEN_EVENTS_CAPACITY: usize = 10_000;

/// Runs a query once, or keeps polling it when tailing.
pub struct Tailer<C, W: Write> {
    client: C,
    printer: Printer<W>,
    // Polls overlap on the boundary timestamp, so remember what was already printed.
    seen: LruCache<String, ()>,
}

impl<C: FilterLogClient, W: Write> Tailer<C, W> {
    pub fn new(client: C, printer: Printer<W>) -> Self {
        Self {
            client,
            printer,
            seen: LruCache::new(SEEN_EVENTS_CAPACITY),
        }
    }

    pub async fn run(&mut self, query: &QueryDescriptor) -> Result<()> {
        let mut input = FilterLogsInput::from(query);
        if !query.tail {
            self.poll(&input).await?;
            return Ok(());
        }

        input.end = None;
        tokio::select! {
            res = self.follow(input, query.refresh) => res,
            _ = tokio::signal::ctrl_c() => {
                log::debug!("interrupted, stop tailing");
                Ok(())
            }
        }
    }

    async fn follow(&mut self, mut input: FilterLogsInput, refresh: Duration) -> Result<()> {
        loop {
            self.tick(&mut input).await?;
            tokio::time::sleep(refresh).await;
        }
    }

    /// Polls once and moves the window start up to the latest event seen.
    async fn tick(&mut self, input: &mut FilterLogsInput) -> Result<()> {
        if let Some(latest) = self.poll(input).await? {
            input.start = input.start.max(latest);
        }
        log::trace!("next poll starts at {}", input.start);
        Ok(())
    }

    /// Prints the events not printed before and returns the latest timestamp returned.
    async fn poll(&mut self, input: &FilterLogsInput) -> Result<Option<i64>> {
        let mut output = self.client.filter_logs(input).await?;
        log::debug!("poll returned {} events", output.items.len());

        // The service always interleaves; group by stream instead when asked not to.
        if !input.interleaved {
            output.items.sort_by(|a, b| a.stream.cmp(&b.stream));
        }

        let mut latest = None;
        for event in output.items {
            latest = latest.max(Some(event.timestamp));
            if !event.event_id.is_empty() {
                if self.seen.contains(&event.event_id) {
                    continue;
                }
                self.seen.put(event.event_id.clone(), ());
            }
            self.printer.print(&event)?;
        }
        self.printer.flush()?;
        Ok(latest)
    }
}
