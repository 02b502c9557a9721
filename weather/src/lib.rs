// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
pub mod date;
pub mod document;
pub mod extract;
pub mod fetch;
pub mod locale;
pub mod models;
pub mod render;
pub mod service;
pub mod utils;

pub use date::{DateResolver, ResolvedDate};
pub use document::{Document, Extract, HtmlDocument, Query};
pub use extract::Extractor;
pub use fetch::{HttpFetcher, PageFetcher};
pub use locale::Locale;
pub use models::forecast::{CurrentConditions, DayForecast, Forecast, HourlyPoint};
pub use render::{Histogram, Report, TagRenderer};
pub use service::ForecastService;

pub mod constants {
  pub(crate) const INTERPOLATION_FACTOR: usize = 4;
  pub(crate) const HISTOGRAM_GLYPHS: &str = "▁▂▃▄▅▆▇█";
  pub(crate) const DATE_CORRECTION_ATTEMPTS: usize = 3;
  pub(crate) const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
  pub(crate) const HUMAN_DATE_FORMAT: &str = "%d.%m";
  pub(crate) const MIN_DESC_WIDTH: usize = 21;
  pub(crate) const DAY_TABLE_FIXED_WIDTH: usize = 27;
}
