// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentConditions {
  pub city: String,
  pub term_now: i32,
  pub desc_now: String,
  pub wind: String,
  pub humidity: String,
  pub pressure: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyPoint {
  pub hour: u32,
  pub temp: i32,
  /// Icon class such as `icon_snow`, empty when the hour has none.
  pub icon: String,
}

/// One row of the multi-day table.
///
/// Serialized with the ISO date under `date`; the human form is for the terminal only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayForecast {
  #[serde(skip)]
  pub human_date: String,
  #[serde(rename = "date")]
  pub iso_date: String,
  pub desc: String,
  pub temp: i32,
  pub temp_night: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forecast {
  #[serde(flatten)]
  pub now: CurrentConditions,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub by_hours: Vec<HourlyPoint>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub next_days: Vec<DayForecast>,
}
