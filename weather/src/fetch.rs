// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use async_trait::async_trait;
use config::Config;
use error::Error;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, error, instrument};
use url::Url;

/// Source of raw page bodies.
#[async_trait]
pub trait PageFetcher: Send + Sync {
  async fn fetch_page(&self, url: &Url) -> Result<String, Error>;
}

/// Plain HTTP GET with a browser user agent and a cookie jar shared by both pages.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
  client: reqwest::Client,
  timeout: Duration,
}

impl HttpFetcher {
  pub fn new(config: &Config) -> Result<Self, Error> {
    let client = reqwest::Client::builder()
      .user_agent(config.user_agent())
      .timeout(config.timeout())
      .cookie_store(true)
      .build()?;

    Ok(Self {
      client,
      timeout: config.timeout(),
    })
  }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
  #[instrument(skip(self), fields(url = %url))]
  async fn fetch_page(&self, url: &Url) -> Result<String, Error> {
    let response = timeout(self.timeout, self.client.get(url.clone()).send())
      .await
      .map_err(|_| Error::TimeoutError)??;

    let status = response.status();
    if !status.is_success() {
      error!("Request failed with status: {}", status);
      return Err(Error::StatusError {
        url: url.to_string(),
        status: status.as_u16(),
      });
    }

    let body = timeout(self.timeout, response.text())
      .await
      .map_err(|_| Error::TimeoutError)??;
    debug!("Fetched {} bytes", body.len());
    Ok(body)
  }
}
