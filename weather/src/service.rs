// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::{
  document::HtmlDocument,
  extract::Extractor,
  fetch::{HttpFetcher, PageFetcher},
  locale::Locale,
  models::forecast::{CurrentConditions, DayForecast, Forecast, HourlyPoint},
};
use chrono::{Local, NaiveDate};
use config::Config;
use error::Error;
use tracing::{debug, info, instrument, warn};

/// Fetches both pages for the configured city and assembles one [`Forecast`].
pub struct ForecastService<F = HttpFetcher> {
  config: Config,
  fetcher: F,
  locale: Locale,
  today: NaiveDate,
}

impl ForecastService<HttpFetcher> {
  pub fn new(config: Config) -> Result<Self, Error> {
    let fetcher = HttpFetcher::new(&config)?;
    Ok(Self::with_fetcher(config, fetcher))
  }
}

impl<F: PageFetcher> ForecastService<F> {
  pub fn with_fetcher(config: Config, fetcher: F) -> Self {
    Self {
      config,
      fetcher,
      locale: Locale::ru(),
      today: Local::now().date_naive(),
    }
  }

  /// Reference date for day-of-month resolution. Defaults to the local date.
  pub fn today(mut self, today: NaiveDate) -> Self {
    self.today = today;
    self
  }

  pub fn locale(mut self, locale: Locale) -> Self {
    self.locale = locale;
    self
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  #[instrument(skip(self), fields(city = %self.config.city()))]
  pub async fn fetch(&self) -> Result<Forecast, Error> {
    let extractor = Extractor::new(
      self.config.selectors().clone(),
      self.locale.clone(),
      self.today,
      self.config.day_limit(),
    )?;

    let (primary, by_hours) = tokio::join!(
      self.fetch_primary(&extractor),
      self.fetch_hourly(&extractor)
    );
    let (now, next_days) = primary?;

    info!(
      "Forecast for {}: {} hours, {} days",
      now.city,
      by_hours.len(),
      next_days.len()
    );
    Ok(Forecast {
      now,
      by_hours,
      next_days,
    })
  }

  async fn fetch_primary(
    &self,
    extractor: &Extractor,
  ) -> Result<(CurrentConditions, Vec<DayForecast>), Error> {
    let url = self.config.forecast_url()?;
    let body = self.fetcher.fetch_page(&url).await?;

    let doc = HtmlDocument::parse(&body);
    let now = extractor
      .current(&doc)?
      .ok_or_else(|| Error::CityNotFound(self.config.city().to_string()))?;
    let days = extractor.days(&doc)?;
    Ok((now, days))
  }

  async fn fetch_hourly(&self, extractor: &Extractor) -> Vec<HourlyPoint> {
    if !self.config.include_today() {
      debug!("Hourly forecast skipped");
      return Vec::new();
    }

    match self.try_fetch_hourly(extractor).await {
      Ok(points) => points,
      Err(e) => {
        warn!("Hourly forecast unavailable: {}", e);
        Vec::new()
      }
    }
  }

  async fn try_fetch_hourly(&self, extractor: &Extractor) -> Result<Vec<HourlyPoint>, Error> {
    let url = self.config.hourly_url()?;
    let body = self.fetcher.fetch_page(&url).await?;
    extractor.hourly(&HtmlDocument::parse(&body))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use async_trait::async_trait;
  use std::sync::Mutex;
  use url::Url;

  const FORECAST: &str = include_str!("../tests/fixtures/forecast.html");
  const HOURLY: &str = include_str!("../tests/fixtures/hourly.html");

  struct StaticFetcher {
    hourly: Option<&'static str>,
    requested: Mutex<Vec<String>>,
  }

  impl StaticFetcher {
    fn new(hourly: Option<&'static str>) -> Self {
      Self {
        hourly,
        requested: Mutex::new(Vec::new()),
      }
    }
  }

  #[async_trait]
  impl PageFetcher for StaticFetcher {
    async fn fetch_page(&self, url: &Url) -> Result<String, Error> {
      self.requested.lock().unwrap().push(url.to_string());
      if url.host_str() == Some("p.ya.ru") {
        return self
          .hourly
          .map(str::to_string)
          .ok_or(Error::TimeoutError);
      }
      Ok(FORECAST.to_string())
    }
  }

  fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2016, 3, 17).unwrap()
  }

  fn service(include_today: bool, hourly: Option<&'static str>) -> ForecastService<StaticFetcher> {
    let config = Config::builder()
      .city("moscow")
      .include_today(include_today)
      .build()
      .unwrap();
    ForecastService::with_fetcher(config, StaticFetcher::new(hourly)).today(today())
  }

  #[tokio::test]
  async fn composes_both_pages() {
    let service = service(true, Some(HOURLY));
    let forecast = service.fetch().await.unwrap();

    assert_eq!(forecast.now.city, "Москва");
    assert_eq!(forecast.by_hours.len(), 14);
    assert_eq!(forecast.next_days.len(), 4);

    let mut requested = service.fetcher.requested.lock().unwrap().clone();
    requested.sort();
    assert_eq!(
      requested,
      vec!["https://p.ya.ru/moscow", "https://yandex.ru/pogoda/moscow"]
    );
  }

  #[tokio::test]
  async fn hourly_failure_keeps_the_rest() {
    let forecast = service(true, None).fetch().await.unwrap();
    assert!(forecast.by_hours.is_empty());
    assert_eq!(forecast.next_days.len(), 4);
  }

  #[tokio::test]
  async fn without_today_only_primary_page_is_requested() {
    let service = service(false, Some(HOURLY));
    let forecast = service.fetch().await.unwrap();

    assert!(forecast.by_hours.is_empty());
    assert_eq!(
      *service.fetcher.requested.lock().unwrap(),
      vec!["https://yandex.ru/pogoda/moscow"]
    );
  }
}
