// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use error::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::instrument;

/// CSS selectors describing where the forecast lives on the weather pages.
///
/// Every table and every field is optional in the TOML form; anything left out
/// keeps the built-in value for the current page layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Selectors {
  pub current: CurrentSelectors,
  pub days: DaySelectors,
  pub hourly: HourlySelectors,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CurrentSelectors {
  pub city: String,
  pub term_now: String,
  pub desc_now: String,
  pub wind: String,
  pub humidity: String,
  pub pressure: String,
}

/// Columns of the multi-day table, matched up by row index.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DaySelectors {
  pub date: String,
  pub desc: String,
  pub temp: String,
  pub temp_night: String,
}

/// `item` selects one element per hour; the other selectors are relative to it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HourlySelectors {
  pub item: String,
  pub hour: String,
  pub temp: String,
  pub icon: String,
  pub icon_attr: String,
}

impl Default for CurrentSelectors {
  fn default() -> Self {
    Self {
      city: "div.navigation-city h1".into(),
      term_now: "div.current-weather div.current-weather__thermometer_type_now".into(),
      desc_now: "div.current-weather span.current-weather__comment".into(),
      wind: "div.current-weather div.current-weather__info-row:nth-child(2) span.wind-speed"
        .into(),
      humidity: "div.current-weather div.current-weather__info-row:nth-child(3)".into(),
      pressure: "div.current-weather div.current-weather__info-row:nth-child(4)".into(),
    }
  }
}

impl Default for DaySelectors {
  fn default() -> Self {
    Self {
      date: "div.tabs-panes span.forecast-brief__item-day".into(),
      desc: "div.tabs-panes div.forecast-brief__item-comment".into(),
      temp: "div.tabs-panes div.forecast-brief__item-temp-day".into(),
      temp_night: "div.tabs-panes div.forecast-brief__item-temp-night".into(),
    }
  }
}

impl Default for HourlySelectors {
  fn default() -> Self {
    Self {
      item: "div.temp-chart__item".into(),
      hour: "p.temp-chart__hour".into(),
      temp: "div.temp-chart__temp".into(),
      icon: "i.icon".into(),
      icon_attr: "class".into(),
    }
  }
}

impl Selectors {
  #[instrument(skip(path))]
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
    let content = fs::read_to_string(path)?;
    let selectors = Self::from_toml(&content)?;
    tracing::debug!("Loaded selectors successfully");
    Ok(selectors)
  }

  pub fn from_toml(content: &str) -> Result<Self, Error> {
    Ok(toml::from_str(content)?)
  }
}
