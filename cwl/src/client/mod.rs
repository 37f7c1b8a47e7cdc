mod filter;
mod types;

pub use types::*;

use aws_config::BehaviorVersion;
use cloudwatchlogs::config::Region;

use crate::models::QueryDescriptor;

#[derive(Debug, Clone)]
pub struct Client {
    client: cloudwatchlogs::Client,
}

impl Client {
    pub fn new(client: cloudwatchlogs::Client) -> Self {
        Self { client }
    }

    /// Loads credentials from the environment, using the query's profile when one was given.
    pub async fn from_query(query: &QueryDescriptor) -> Self {
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(query.region.clone()));
        if let Some(profile) = &query.profile {
            log::debug!("using credential profile {}", profile);
            loader = loader.profile_name(profile);
        }
        let shared_config = loader.load().await;
        Self::new(cloudwatchlogs::Client::new(&shared_config))
    }
}
