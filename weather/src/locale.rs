// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use chrono::Weekday;
use error::Error;
use regex::Regex;

/// Words and glyphs the report is written with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
  /// Monday first.
  pub weekdays: [&'static str; 7],
  pub now_label: &'static str,
  pub pressure_label: &'static str,
  pub humidity_label: &'static str,
  pub wind_label: &'static str,
  pub date_header: &'static str,
  pub temp_header: &'static str,
  pub desc_header: &'static str,
  pub night_header: &'static str,
  /// Shown when the page has no wind row at all.
  pub calm_wind: &'static str,
  pub icons: &'static [(&'static str, &'static str)],
}

impl Locale {
  pub fn ru() -> Self {
    Self {
      weekdays: ["пн", "вт", "ср", "чт", "пт", "сб", "вс"],
      now_label: "Сейчас",
      pressure_label: "Давление",
      humidity_label: "Влажность",
      wind_label: "Ветер",
      date_header: "дата",
      temp_header: "°C",
      desc_header: "погода",
      night_header: "°C ночью",
      calm_wind: "0 м/с",
      icons: &[
        ("icon_rain", "☂"),
        ("icon_snow", "❄"),
        ("icon_thunderstorm", "ϟ"),
      ],
    }
  }

  pub fn weekday(&self, day: Weekday) -> &'static str {
    self.weekdays[day.num_days_from_monday() as usize]
  }

  pub fn icon_glyph(&self, icon: &str) -> &'static str {
    self
      .icons
      .iter()
      .find(|(name, _)| *name == icon)
      .map(|(_, glyph)| *glyph)
      .unwrap_or("")
  }

  /// Matches the Saturday and Sunday abbreviations.
  pub fn weekend_pattern(&self) -> Result<Regex, Error> {
    let saturday = regex::escape(self.weekday(Weekday::Sat));
    let sunday = regex::escape(self.weekday(Weekday::Sun));
    Ok(Regex::new(&format!("({}|{})", saturday, sunday))?)
  }
}

impl Default for Locale {
  fn default() -> Self {
    Self::ru()
  }
}
