// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::{
  constants::{DATE_CORRECTION_ATTEMPTS, HUMAN_DATE_FORMAT, ISO_DATE_FORMAT},
  locale::Locale,
  utils::text::clean_integer,
};
use chrono::{Datelike, Days, NaiveDate};
use tracing::debug;

/// A scraped day in both of its printed forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDate {
  /// `DD.MM (wd)`
  pub human: String,
  /// `YYYY-MM-DD`
  pub iso: String,
}

impl ResolvedDate {
  fn passthrough(token: &str) -> Self {
    Self {
      human: token.to_string(),
      iso: token.to_string(),
    }
  }

  /// The calendar date, if the ISO form is one.
  pub fn date(&self) -> Option<NaiveDate> {
    let prefix = self.iso.get(..10)?;
    NaiveDate::parse_from_str(prefix, ISO_DATE_FORMAT).ok()
  }
}

/// Turns day-of-month tokens from the forecast table into full dates.
///
/// The row position gives a first guess (`today + offset`). The scraped day number
/// wins over that guess: the candidate is moved forward one day at a time until the
/// day numbers agree, giving up after a few steps.
#[derive(Debug, Clone)]
pub struct DateResolver {
  today: NaiveDate,
  locale: Locale,
}

impl DateResolver {
  pub fn new(today: NaiveDate, locale: Locale) -> Self {
    Self { today, locale }
  }

  pub fn today(&self) -> NaiveDate {
    self.today
  }

  pub fn resolve(&self, token: &str, offset: u64) -> ResolvedDate {
    let day: u32 = match clean_integer(token).parse() {
      Ok(day) => day,
      Err(_) => {
        debug!("Day token {:?} is not a number, passing it through", token);
        return ResolvedDate::passthrough(token);
      }
    };

    let Some(mut candidate) = self.today.checked_add_days(Days::new(offset)) else {
      return ResolvedDate::passthrough(token);
    };

    for _ in 0..DATE_CORRECTION_ATTEMPTS {
      if candidate.day() == day {
        break;
      }
      match candidate.succ_opt() {
        Some(next) => candidate = next,
        None => break,
      }
    }

    ResolvedDate {
      human: format!(
        "{} ({})",
        candidate.format(HUMAN_DATE_FORMAT),
        self.locale.weekday(candidate.weekday())
      ),
      iso: candidate.format(ISO_DATE_FORMAT).to_string(),
    }
  }
}
