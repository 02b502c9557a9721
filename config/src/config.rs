// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::selectors::Selectors;
use error::Error;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

pub const DEFAULT_FORECAST_URL: &str = "https://yandex.ru/pogoda/";
pub const DEFAULT_HOURLY_URL: &str = "https://p.ya.ru/";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_10_1) \
  AppleWebKit/600.1.25 (KHTML, like Gecko) Version/8.0 Safari/600.1.25";
pub const DEFAULT_DAY_LIMIT: usize = 10;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
  #[default]
  Human,
  Json,
}

/// Base locations of the two pages; the city is appended as a path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sources {
  pub forecast: Url,
  pub hourly: Url,
}

/// Settings for one run. Built once through [`ConfigBuilder`] and only read afterwards.
#[derive(Debug, Clone)]
pub struct Config {
  city: String,
  format: OutputFormat,
  color: bool,
  include_today: bool,
  day_limit: usize,
  sources: Sources,
  user_agent: String,
  timeout: Duration,
  selectors: Selectors,
}

impl Config {
  pub fn builder() -> ConfigBuilder {
    ConfigBuilder::default()
  }

  pub fn city(&self) -> &str {
    &self.city
  }

  pub fn format(&self) -> OutputFormat {
    self.format
  }

  pub fn color(&self) -> bool {
    self.color
  }

  pub fn include_today(&self) -> bool {
    self.include_today
  }

  pub fn day_limit(&self) -> usize {
    self.day_limit
  }

  pub fn sources(&self) -> &Sources {
    &self.sources
  }

  pub fn user_agent(&self) -> &str {
    &self.user_agent
  }

  pub fn timeout(&self) -> Duration {
    self.timeout
  }

  pub fn selectors(&self) -> &Selectors {
    &self.selectors
  }

  pub fn forecast_url(&self) -> Result<Url, Error> {
    join_city(&self.sources.forecast, &self.city)
  }

  pub fn hourly_url(&self) -> Result<Url, Error> {
    join_city(&self.sources.hourly, &self.city)
  }
}

fn join_city(base: &Url, city: &str) -> Result<Url, Error> {
  let mut url = base.clone();
  if city.is_empty() {
    return Ok(url);
  }

  url
    .path_segments_mut()
    .map_err(|_| Error::ConfigError(format!("{} cannot be a base URL", base)))?
    .pop_if_empty()
    .push(city);
  Ok(url)
}

fn parse_base(name: &str, raw: &str) -> Result<Url, Error> {
  let url = Url::parse(raw)
    .map_err(|e| Error::ConfigError(format!("Invalid {} URL {:?}: {}", name, raw, e)))?;
  if url.cannot_be_a_base() {
    return Err(Error::ConfigError(format!(
      "{} URL {:?} cannot be a base URL",
      name, raw
    )));
  }
  Ok(url)
}

#[derive(Debug, Default)]
pub struct ConfigBuilder {
  city: String,
  format: OutputFormat,
  color: bool,
  include_today: Option<bool>,
  day_limit: Option<usize>,
  forecast_url: Option<String>,
  hourly_url: Option<String>,
  user_agent: Option<String>,
  timeout: Option<Duration>,
  selectors: Option<Selectors>,
}

impl ConfigBuilder {
  pub fn city(mut self, city: impl Into<String>) -> Self {
    self.city = city.into();
    self
  }

  pub fn format(mut self, format: OutputFormat) -> Self {
    self.format = format;
    self
  }

  pub fn color(mut self, enabled: bool) -> Self {
    self.color = enabled;
    self
  }

  pub fn include_today(mut self, include: bool) -> Self {
    self.include_today = Some(include);
    self
  }

  pub fn day_limit(mut self, limit: usize) -> Self {
    self.day_limit = Some(limit);
    self
  }

  pub fn forecast_url(mut self, url: impl Into<String>) -> Self {
    self.forecast_url = Some(url.into());
    self
  }

  pub fn hourly_url(mut self, url: impl Into<String>) -> Self {
    self.hourly_url = Some(url.into());
    self
  }

  pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
    self.user_agent = Some(user_agent.into());
    self
  }

  pub fn timeout(mut self, timeout: Duration) -> Self {
    self.timeout = Some(timeout);
    self
  }

  pub fn selectors(mut self, selectors: Selectors) -> Self {
    self.selectors = Some(selectors);
    self
  }

  pub fn build(self) -> Result<Config, Error> {
    let day_limit = self.day_limit.unwrap_or(DEFAULT_DAY_LIMIT);
    if day_limit == 0 {
      return Err(Error::ConfigError("Day limit must be at least 1".into()));
    }

    let sources = Sources {
      forecast: parse_base(
        "forecast",
        self.forecast_url.as_deref().unwrap_or(DEFAULT_FORECAST_URL),
      )?,
      hourly: parse_base(
        "hourly",
        self.hourly_url.as_deref().unwrap_or(DEFAULT_HOURLY_URL),
      )?,
    };

    Ok(Config {
      city: self.city.trim().to_string(),
      format: self.format,
      color: self.color,
      include_today: self.include_today.unwrap_or(true),
      day_limit,
      sources,
      user_agent: self
        .user_agent
        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
      timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
      selectors: self.selectors.unwrap_or_default(),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn builder_defaults() {
    let config = Config::builder().city("moscow").build().unwrap();

    assert_eq!(config.city(), "moscow");
    assert_eq!(config.format(), OutputFormat::Human);
    assert!(!config.color());
    assert!(config.include_today());
    assert_eq!(config.day_limit(), DEFAULT_DAY_LIMIT);
    assert_eq!(config.user_agent(), DEFAULT_USER_AGENT);
    assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
    assert_eq!(config.sources().forecast.as_str(), DEFAULT_FORECAST_URL);
    assert_eq!(config.sources().hourly.as_str(), DEFAULT_HOURLY_URL);
  }

  #[test]
  fn zero_day_limit_is_rejected() {
    let err = Config::builder().day_limit(0).build().unwrap_err();
    assert!(matches!(err, Error::ConfigError(_)));
  }

  #[test]
  fn invalid_base_url_is_rejected() {
    let err = Config::builder()
      .forecast_url("not a url")
      .build()
      .unwrap_err();
    assert!(matches!(err, Error::ConfigError(_)));

    let err = Config::builder()
      .hourly_url("mailto:someone@example.com")
      .build()
      .unwrap_err();
    assert!(matches!(err, Error::ConfigError(_)));
  }

  #[test]
  fn city_is_joined_as_path_segment() {
    let config = Config::builder()
      .city("kiev")
      .forecast_url("http://localhost:8080/pogoda")
      .hourly_url("http://localhost:8080/")
      .build()
      .unwrap();

    assert_eq!(
      config.forecast_url().unwrap().as_str(),
      "http://localhost:8080/pogoda/kiev"
    );
    assert_eq!(
      config.hourly_url().unwrap().as_str(),
      "http://localhost:8080/kiev"
    );
  }

  #[test]
  fn city_is_percent_encoded() {
    let config = Config::builder().city("new york/ny").build().unwrap();
    assert_eq!(
      config.forecast_url().unwrap().as_str(),
      "https://yandex.ru/pogoda/new%20york%2Fny"
    );
  }

  #[test]
  fn empty_city_keeps_base_url() {
    let config = Config::builder().city("  ").build().unwrap();
    assert_eq!(config.city(), "");
    assert_eq!(config.forecast_url().unwrap().as_str(), DEFAULT_FORECAST_URL);
  }
}
