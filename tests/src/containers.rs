//! Testcontainer setup for a Mailpit SMTP sink.

use std::time::Duration;
use testcontainers::{
    core::{IntoContainerPort, WaitFor},
    runners::AsyncRunner,
    ContainerAsync, GenericImage,
};

/// Handle for a running Mailpit instance.
pub struct MailpitContainer {
    #[allow(dead_code)]
    container: Option<ContainerAsync<GenericImage>>,
    pub smtp_host: String,
    pub smtp_port: u16,
    /// Base URL of the Mailpit HTTP API
    pub api_url: String,
}

impl MailpitContainer {
    /// Start Mailpit, or reuse one named by `MODATEPE_TEST_MAILPIT_*`.
    pub async fn start() -> Self {
        if let Some(api_url) = std::env::var("MODATEPE_TEST_MAILPIT_API")
            .ok()
            .filter(|v| !v.trim().is_empty())
        {
            return Self {
                container: None,
                smtp_host: std::env::var("MODATEPE_TEST_MAILPIT_HOST")
                    .unwrap_or_else(|_| "127.0.0.1".to_string()),
                smtp_port: std::env::var("MODATEPE_TEST_MAILPIT_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(1025),
                api_url,
            };
        }

        let image = GenericImage::new("axllent/mailpit", "v1.20")
            .with_wait_for(WaitFor::seconds(2))
            .with_exposed_port(1025.tcp())
            .with_exposed_port(8025.tcp());

        let container = image.start().await.expect("Failed to start Mailpit");

        let smtp_port = container.get_host_port_ipv4(1025).await.unwrap();
        let api_port = container.get_host_port_ipv4(8025).await.unwrap();
        let api_url = format!("http://127.0.0.1:{}", api_port);

        wait_for_http(&format!("{}/api/v1/messages", api_url), Duration::from_secs(30)).await;

        Self {
            container: Some(container),
            smtp_host: "127.0.0.1".to_string(),
            smtp_port,
            api_url,
        }
    }

    /// Fetch the Mailpit message list.
    pub async fn messages(&self) -> serde_json::Value {
        reqwest::Client::new()
            .get(format!("{}/api/v1/messages", self.api_url))
            .send()
            .await
            .expect("Mailpit API request failed")
            .json()
            .await
            .expect("Mailpit API returned invalid JSON")
    }
}

/// Wait for HTTP endpoint to respond.
async fn wait_for_http(url: &str, timeout: Duration) {
    let client = reqwest::Client::new();
    let start = std::time::Instant::now();

    while start.elapsed() < timeout {
        if let Ok(resp) = client.get(url).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        tokio::time::sleep(Duration::from_millis(500)).await;
    }
    panic!("HTTP endpoint {} not ready after {:?}", url, timeout);
}
