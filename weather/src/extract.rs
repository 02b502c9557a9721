// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::{
  date::DateResolver,
  document::{Document, Query},
  locale::Locale,
  models::forecast::{CurrentConditions, DayForecast, HourlyPoint},
  utils::text::{clean_integer, extract_integer, parse_icon, strip_non_printable},
};
use chrono::NaiveDate;
use config::Selectors;
use error::Error;
use regex::Regex;
use std::collections::HashMap;
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
  Text,
  Numeric,
  /// Text that starts with a label such as `Влажность: `.
  Prefixed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
  pub name: &'static str,
  pub query: Query,
  pub kind: FieldKind,
}

impl FieldSpec {
  fn new(name: &'static str, selector: &str, kind: FieldKind) -> Self {
    Self {
      name,
      query: Query::text(selector),
      kind,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
  Text(String),
  Number(i32),
}

impl FieldValue {
  pub fn as_text(&self) -> String {
    match self {
      FieldValue::Text(text) => text.clone(),
      FieldValue::Number(number) => number.to_string(),
    }
  }

  pub fn as_number(&self) -> i32 {
    match self {
      FieldValue::Text(text) => extract_integer(text),
      FieldValue::Number(number) => *number,
    }
  }
}

/// Maps a fetched page onto the forecast model.
#[derive(Debug, Clone)]
pub struct Extractor {
  selectors: Selectors,
  locale: Locale,
  resolver: DateResolver,
  day_limit: usize,
  label: Regex,
}

impl Extractor {
  pub fn new(
    selectors: Selectors,
    locale: Locale,
    today: NaiveDate,
    day_limit: usize,
  ) -> Result<Self, Error> {
    Ok(Self {
      selectors,
      resolver: DateResolver::new(today, locale.clone()),
      locale,
      day_limit,
      label: Regex::new(r"^[^:：]*[:：]\s*")?,
    })
  }

  pub fn current_fields(&self) -> Vec<FieldSpec> {
    let s = &self.selectors.current;
    vec![
      FieldSpec::new("city", &s.city, FieldKind::Text),
      FieldSpec::new("term_now", &s.term_now, FieldKind::Numeric),
      FieldSpec::new("desc_now", &s.desc_now, FieldKind::Text),
      FieldSpec::new("wind", &s.wind, FieldKind::Prefixed),
      FieldSpec::new("humidity", &s.humidity, FieldKind::Prefixed),
      FieldSpec::new("pressure", &s.pressure, FieldKind::Prefixed),
    ]
  }

  pub fn day_fields(&self) -> Vec<FieldSpec> {
    let s = &self.selectors.days;
    vec![
      FieldSpec::new("date", &s.date, FieldKind::Text),
      FieldSpec::new("desc", &s.desc, FieldKind::Text),
      FieldSpec::new("temp", &s.temp, FieldKind::Numeric),
      FieldSpec::new("temp_night", &s.temp_night, FieldKind::Numeric),
    ]
  }

  fn normalize(&self, raw: &str, kind: FieldKind) -> FieldValue {
    let text = strip_non_printable(raw);
    let text = text.trim();
    match kind {
      FieldKind::Text => FieldValue::Text(text.to_string()),
      FieldKind::Numeric => FieldValue::Number(extract_integer(text)),
      FieldKind::Prefixed => FieldValue::Text(self.label.replace(text, "").trim().to_string()),
    }
  }

  /// First match of every field. Fields without a match are absent from the result.
  pub fn extract_fields(
    &self,
    doc: &dyn Document,
    fields: &[FieldSpec],
  ) -> Result<HashMap<&'static str, FieldValue>, Error> {
    let mut values = HashMap::with_capacity(fields.len());
    for field in fields {
      if let Some(raw) = doc.query(&field.query)?.first() {
        values.insert(field.name, self.normalize(raw, field.kind));
      }
    }
    Ok(values)
  }

  /// Every match of every field, one column per field.
  pub fn extract_columns(
    &self,
    doc: &dyn Document,
    fields: &[FieldSpec],
  ) -> Result<HashMap<&'static str, Vec<FieldValue>>, Error> {
    let mut columns = HashMap::with_capacity(fields.len());
    for field in fields {
      let column = doc
        .query(&field.query)?
        .iter()
        .map(|raw| self.normalize(raw, field.kind))
        .collect();
      columns.insert(field.name, column);
    }
    Ok(columns)
  }

  /// `None` when the page has no city name, meaning the city is unknown to the site.
  #[instrument(skip_all)]
  pub fn current(&self, doc: &dyn Document) -> Result<Option<CurrentConditions>, Error> {
    let values = self.extract_fields(doc, &self.current_fields())?;
    let text = |name: &str| {
      values
        .get(name)
        .map(FieldValue::as_text)
        .unwrap_or_default()
    };

    let city = text("city");
    if city.is_empty() {
      debug!("No city name on the page");
      return Ok(None);
    }

    let wind = match text("wind") {
      wind if wind.is_empty() => self.locale.calm_wind.to_string(),
      wind => wind,
    };

    Ok(Some(CurrentConditions {
      city,
      term_now: values.get("term_now").map_or(0, FieldValue::as_number),
      desc_now: text("desc_now"),
      wind,
      humidity: text("humidity"),
      pressure: text("pressure"),
    }))
  }

  /// Upcoming days, nearest first, at most `day_limit` of them.
  ///
  /// Rows whose date cannot be resolved, or that are not after today, are dropped
  /// without counting towards the limit.
  #[instrument(skip_all)]
  pub fn days(&self, doc: &dyn Document) -> Result<Vec<DayForecast>, Error> {
    let columns = self.extract_columns(doc, &self.day_fields())?;
    let rows = columns.values().map(Vec::len).max().unwrap_or(0);
    let cell = |name: &str, index: usize| columns.get(name).and_then(|column| column.get(index));

    let mut days: Vec<DayForecast> = Vec::with_capacity(rows.min(self.day_limit));
    let mut last_date: Option<NaiveDate> = None;

    for index in 0..rows {
      if days.len() >= self.day_limit {
        break;
      }

      let token = cell("date", index)
        .map(FieldValue::as_text)
        .unwrap_or_default();
      let resolved = self.resolver.resolve(&token, index as u64);

      let date = match resolved.date() {
        Some(date) if self.is_upcoming(date, last_date) => date,
        _ => {
          debug!("Skipping forecast row {} with date {:?}", index, resolved.iso);
          continue;
        }
      };
      last_date = Some(date);

      days.push(DayForecast {
        human_date: resolved.human,
        iso_date: resolved.iso,
        desc: cell("desc", index)
          .map(FieldValue::as_text)
          .unwrap_or_default()
          .to_lowercase(),
        temp: cell("temp", index).map_or(0, FieldValue::as_number),
        temp_night: cell("temp_night", index).map_or(0, FieldValue::as_number),
      });
    }

    debug!("Extracted {} forecast days out of {} rows", days.len(), rows);
    Ok(days)
  }

  fn is_upcoming(&self, date: NaiveDate, last: Option<NaiveDate>) -> bool {
    date > self.resolver.today() && last.map_or(true, |last| date > last)
  }

  /// Hour-by-hour temperatures from the chart page. Items without a usable hour or
  /// temperature are left out.
  #[instrument(skip_all)]
  pub fn hourly(&self, doc: &dyn Document) -> Result<Vec<HourlyPoint>, Error> {
    let s = &self.selectors.hourly;
    let items = doc.query_items(
      &s.item,
      &[
        Query::text(s.hour.as_str()),
        Query::text(s.temp.as_str()),
        Query::attr(s.icon.as_str(), s.icon_attr.as_str()),
      ],
    )?;

    let points: Vec<HourlyPoint> = items
      .into_iter()
      .filter_map(|fields| {
        let mut fields = fields.into_iter();
        let hour = fields.next().flatten()?;
        let temp = fields.next().flatten()?;
        let icon = fields.next().flatten().unwrap_or_default();

        let hour = match parse_hour(&hour) {
          Some(hour) => hour,
          None => {
            debug!("Skipping hourly item with hour {:?}", hour);
            return None;
          }
        };

        Some(HourlyPoint {
          hour,
          temp: self.normalize(&temp, FieldKind::Numeric).as_number(),
          icon: parse_icon(&icon),
        })
      })
      .collect();

    debug!("Extracted {} hourly points", points.len());
    Ok(points)
  }
}

/// Hour label as printed on the chart. Unlike temperatures there is no fallback:
/// anything but a number in 0..=23 rejects the item.
fn parse_hour(label: &str) -> Option<u32> {
  clean_integer(&strip_non_printable(label))
    .parse::<u32>()
    .ok()
    .filter(|hour| *hour <= 23)
}
