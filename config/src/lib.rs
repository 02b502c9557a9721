// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
mod config;
mod selectors;

pub use crate::{
  config::{
    Config, ConfigBuilder, OutputFormat, Sources, DEFAULT_DAY_LIMIT, DEFAULT_FORECAST_URL,
    DEFAULT_HOURLY_URL, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT,
  },
  selectors::{CurrentSelectors, DaySelectors, HourlySelectors, Selectors},
};
