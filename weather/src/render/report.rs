// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::{
  constants::{DAY_TABLE_FIXED_WIDTH, MIN_DESC_WIDTH},
  locale::Locale,
  models::forecast::{CurrentConditions, DayForecast, Forecast, HourlyPoint},
  render::{color::TagRenderer, histogram::Histogram},
};
use config::{Config, OutputFormat};
use error::Error;
use regex::{Captures, Regex};
use tracing::instrument;

const RULE: &str = "─";

/// Final text of a run: the terminal report or a single JSON line.
#[derive(Debug, Clone)]
pub struct Report {
  format: OutputFormat,
  include_today: bool,
  url: String,
  locale: Locale,
  tags: TagRenderer,
  histogram: Histogram,
  weekend: Regex,
}

impl Report {
  pub fn new(config: &Config, locale: Locale) -> Result<Self, Error> {
    Ok(Self {
      format: config.format(),
      include_today: config.include_today(),
      url: config.forecast_url()?.to_string(),
      tags: TagRenderer::new(config.color())?,
      histogram: Histogram::default(),
      weekend: locale.weekend_pattern()?,
      locale,
    })
  }

  #[instrument(skip_all)]
  pub fn render(&self, forecast: &Forecast) -> Result<String, Error> {
    match self.format {
      OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string(forecast)?)),
      OutputFormat::Human => Ok(self.render_human(forecast)),
    }
  }

  fn render_human(&self, forecast: &Forecast) -> String {
    let mut out = String::new();
    self.render_current(&forecast.now, &mut out);
    if self.include_today && !forecast.by_hours.is_empty() {
      self.render_hourly(&forecast.by_hours, &mut out);
    }
    if !forecast.next_days.is_empty() {
      self.render_days(&forecast.next_days, &mut out);
    }
    out
  }

  /// Scraped values go through `paint` so markup-like text on the page stays literal.
  fn render_current(&self, now: &CurrentConditions, out: &mut String) {
    let t = &self.tags;
    let l = &self.locale;

    out.push_str(&now.city);
    out.push_str(&t.render(&format!(" (<yellow>{}</>)\n", self.url)));
    out.push_str(&t.render(&format!(
      "{}: <green>{} °C</>, ",
      l.now_label, now.term_now
    )));
    out.push_str(&t.paint("green", &now.desc_now));
    out.push('\n');
    for (label, value) in [
      (l.pressure_label, &now.pressure),
      (l.humidity_label, &now.humidity),
      (l.wind_label, &now.wind),
    ] {
      out.push_str(&format!("{}: {}\n", label, t.paint("green", value)));
    }
  }

  /// Every hour is one column as wide as its stretch of the sparkline.
  fn render_hourly(&self, points: &[HourlyPoint], out: &mut String) {
    let width = self.histogram.factor();
    let row = |cells: Vec<String>| {
      cells
        .iter()
        .map(|cell| format!("{:<width$}", cell, width = width))
        .collect::<String>()
        .trim_end()
        .to_string()
    };

    let temps: Vec<i32> = points.iter().map(|p| p.temp).collect();
    let hours = row(points.iter().map(|p| format!("{:02}", p.hour)).collect());
    let degrees = row(points.iter().map(|p| signed(p.temp)).collect());
    let icons = row(
      points
        .iter()
        .map(|p| self.locale.icon_glyph(&p.icon).to_string())
        .collect(),
    );

    out.push_str(&self.tags.render(&format!(
      "{}\n<grey>{}</>\n<yellow>{}</>\n<green>{}</>\n",
      RULE.repeat(points.len() * width),
      hours,
      self.histogram.render(&temps),
      degrees
    )));
    if !icons.is_empty() {
      out.push_str(&self.tags.render(&format!("<cyan>{}</>\n", icons)));
    }
  }

  fn render_days(&self, days: &[DayForecast], out: &mut String) {
    let width = days
      .iter()
      .map(|day| day.desc.chars().count())
      .max()
      .unwrap_or(0)
      .max(MIN_DESC_WIDTH);
    let rule = RULE.repeat(DAY_TABLE_FIXED_WIDTH + width);
    let l = &self.locale;

    let header = format!(
      " {:<10} {:>4} {:<width$} {:>8}",
      l.date_header,
      l.temp_header,
      l.desc_header,
      l.night_header,
      width = width
    );
    out.push_str(&self.tags.render(&format!(
      "{}\n<blue+h>{}</>\n{}\n",
      rule, header, rule
    )));

    for day in days {
      let date = format!("{:>10}", day.human_date);
      let date = self.weekend.replace_all(&date, |caps: &Captures| {
        self.tags.render(&format!("<red+h>{}</>", &caps[1]))
      });
      out.push_str(&format!(
        " {} {:>3}° {:<width$} {:>7}°\n",
        date,
        day.temp,
        day.desc,
        day.temp_night,
        width = width
      ));
    }
    out.push_str(&rule);
    out.push('\n');
  }
}

fn signed(temp: i32) -> String {
  if temp > 0 {
    format!("+{}", temp)
  } else {
    temp.to_string()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::render::color::RESET;

  fn config(format: OutputFormat, color: bool) -> Config {
    Config::builder()
      .city("moscow")
      .format(format)
      .color(color)
      .build()
      .unwrap()
  }

  fn report(format: OutputFormat, color: bool) -> Report {
    Report::new(&config(format, color), Locale::ru()).unwrap()
  }

  fn forecast() -> Forecast {
    Forecast {
      now: CurrentConditions {
        city: "Москва".into(),
        term_now: -3,
        desc_now: "облачно".into(),
        wind: "3 м/с, СЗ".into(),
        humidity: "86%".into(),
        pressure: "745 мм рт. ст.".into(),
      },
      by_hours: vec![
        HourlyPoint {
          hour: 23,
          temp: -1,
          icon: String::new(),
        },
        HourlyPoint {
          hour: 0,
          temp: -2,
          icon: "icon_snow".into(),
        },
        HourlyPoint {
          hour: 1,
          temp: -2,
          icon: "icon_snow".into(),
        },
      ],
      next_days: vec![
        DayForecast {
          human_date: "18.03 (пт)".into(),
          iso_date: "2016-03-18".into(),
          desc: "небольшой снег".into(),
          temp: 1,
          temp_night: -4,
        },
        DayForecast {
          human_date: "19.03 (сб)".into(),
          iso_date: "2016-03-19".into(),
          desc: "ясно".into(),
          temp: 4,
          temp_night: -2,
        },
      ],
    }
  }

  #[test]
  fn human_report_without_color() {
    let text = report(OutputFormat::Human, false)
      .render(&forecast())
      .unwrap();

    let expected = [
      "Москва (https://yandex.ru/pogoda/moscow)",
      "Сейчас: -3 °C, облачно",
      "Давление: 745 мм рт. ст.",
      "Влажность: 86%",
      "Ветер: 3 м/с, СЗ",
      "────────────",
      "23  00  01",
      "▃▂▂▁▁▁▁▁▁▁▁▁",
      "-1  -2  -2",
      "    ❄   ❄",
      "────────────────────────────────────────────────",
      " дата         °C погода                °C ночью",
      "────────────────────────────────────────────────",
      " 18.03 (пт)   1° небольшой снег             -4°",
      " 19.03 (сб)   4° ясно                       -2°",
      "────────────────────────────────────────────────",
    ];
    assert_eq!(text, format!("{}\n", expected.join("\n")));
  }

  #[test]
  fn hourly_block_needs_today() {
    let config = Config::builder()
      .city("moscow")
      .include_today(false)
      .build()
      .unwrap();
    let text = Report::new(&config, Locale::ru())
      .unwrap()
      .render(&forecast())
      .unwrap();

    assert!(!text.contains("23  00  01"));
    assert!(text.contains(" 18.03 (пт)"));
  }

  #[test]
  fn empty_sections_are_left_out() {
    let mut forecast = forecast();
    forecast.by_hours.clear();
    forecast.next_days.clear();
    let text = report(OutputFormat::Human, false).render(&forecast).unwrap();

    assert_eq!(text.lines().count(), 5);
    assert!(!text.contains(RULE));
  }

  #[test]
  fn description_column_grows_with_longest_text() {
    let mut forecast = forecast();
    forecast.by_hours.clear();
    forecast.next_days[1].desc = "облачно с прояснениями, без осадков".into();
    let text = report(OutputFormat::Human, false).render(&forecast).unwrap();

    let width = "облачно с прояснениями, без осадков".chars().count();
    let rule = RULE.repeat(DAY_TABLE_FIXED_WIDTH + width);
    assert!(text.contains(&format!("{}\n", rule)));
    assert!(text.contains(" 19.03 (сб)   4° облачно с прояснениями, без осадков      -2°"));
  }

  #[test]
  fn weekend_is_highlighted_with_color() {
    let text = report(OutputFormat::Human, true)
      .render(&forecast())
      .unwrap();

    assert!(text.contains(&format!("19.03 (\x1b[91mсб{})", RESET)));
    assert!(text.contains("18.03 (пт)"));
    assert!(text.contains(&format!("\x1b[32m-3 °C{}", RESET)));
    assert!(text.contains(&format!("(\x1b[33mhttps://yandex.ru/pogoda/moscow{})", RESET)));
  }

  #[test]
  fn table_header_markup_is_expanded() {
    let text = report(OutputFormat::Human, true)
      .render(&forecast())
      .unwrap();

    assert!(text.contains(&format!(
      "\x1b[94m дата         °C погода                °C ночью{}\n",
      RESET
    )));
    assert!(text.contains(&format!("\x1b[90m23  00  01{}\n", RESET)));
    assert!(!text.contains("<blue+h>"));
  }

  #[test]
  fn markup_in_scraped_text_stays_literal() {
    let mut forecast = forecast();
    forecast.now.desc_now = "<red>жара</>".into();
    forecast.now.wind = "<b>штиль".into();

    let colored = report(OutputFormat::Human, true).render(&forecast).unwrap();
    assert!(colored.contains(&format!("\x1b[32m<red>жара</>{}\n", RESET)));
    assert!(colored.contains(&format!("Ветер: \x1b[32m<b>штиль{}\n", RESET)));

    let plain = report(OutputFormat::Human, false).render(&forecast).unwrap();
    assert!(plain.contains("Сейчас: -3 °C, <red>жара</>\n"));
  }

  #[test]
  fn json_is_one_line_with_iso_dates() {
    let text = report(OutputFormat::Json, true).render(&forecast()).unwrap();
    assert!(text.ends_with('\n'));
    assert_eq!(text.trim_end().lines().count(), 1);
    assert!(!text.contains('\x1b'));

    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["city"], "Москва");
    assert_eq!(value["term_now"], -3);
    assert_eq!(value["desc_now"], "облачно");
    assert_eq!(value["wind"], "3 м/с, СЗ");
    assert_eq!(value["humidity"], "86%");
    assert_eq!(value["pressure"], "745 мм рт. ст.");
    assert_eq!(value["by_hours"][1]["hour"], 0);
    assert_eq!(value["by_hours"][1]["temp"], -2);
    assert_eq!(value["by_hours"][1]["icon"], "icon_snow");
    assert_eq!(value["next_days"][0]["date"], "2016-03-18");
    assert_eq!(value["next_days"][0]["desc"], "небольшой снег");
    assert_eq!(value["next_days"][0]["temp"], 1);
    assert_eq!(value["next_days"][0]["temp_night"], -4);
    assert!(value["next_days"][0].get("human_date").is_none());
    assert!(value["next_days"][0].get("iso_date").is_none());
  }

  #[test]
  fn json_omits_empty_sections() {
    let mut forecast = forecast();
    forecast.by_hours.clear();
    forecast.next_days.clear();
    let text = report(OutputFormat::Json, false).render(&forecast).unwrap();

    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert!(value.get("by_hours").is_none());
    assert!(value.get("next_days").is_none());
  }

  #[test]
  fn json_round_trip_keeps_numbers() {
    let expected = forecast();
    let text = report(OutputFormat::Json, false).render(&expected).unwrap();
    let parsed: Forecast = serde_json::from_str(&text).unwrap();

    assert_eq!(parsed.now, expected.now);
    assert_eq!(parsed.by_hours, expected.by_hours);
    assert_eq!(parsed.next_days.len(), expected.next_days.len());
    for (parsed, expected) in parsed.next_days.iter().zip(&expected.next_days) {
      assert_eq!(parsed.iso_date, expected.iso_date);
      assert_eq!(parsed.temp, expected.temp);
      assert_eq!(parsed.temp_night, expected.temp_night);
    }

    let human = report(OutputFormat::Human, false).render(&expected).unwrap();
    assert!(human.contains(&format!("{} °C", parsed.now.term_now)));
    for day in &parsed.next_days {
      assert!(human.contains(&format!("{:>3}°", day.temp)));
      assert!(human.contains(&format!("{:>7}°", day.temp_night)));
    }
  }
}
