use aws_config::{BehaviorVersion, Region};
use aws_sdk_bedrockruntime::Client;

/// Build a Bedrock runtime client, optionally pinned to a region.
pub async fn build_client(region: Option<String>) -> Client {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = region {
        loader = loader.region(Region::new(region));
    }
    let config = loader.load().await;
    Client::new(&config)
}
