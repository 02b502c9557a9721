// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.

const THIN_SPACE: char = '\u{2009}';
const MINUS_SIGN: char = '\u{2212}';

/// Replaces the thin space the site puts between numbers and units with a plain space.
pub fn strip_non_printable(text: &str) -> String {
  text.replace(THIN_SPACE, " ")
}

/// Keeps only ASCII digits and `-`, turning the typographic minus into `-` first.
pub fn clean_integer(text: &str) -> String {
  text
    .chars()
    .map(|c| if c == MINUS_SIGN { '-' } else { c })
    .filter(|c| c.is_ascii_digit() || *c == '-')
    .collect()
}

/// Best-effort integer out of scraped text, `0` when nothing sensible is left.
pub fn extract_integer(text: &str) -> i32 {
  clean_integer(text).parse().unwrap_or(0)
}

/// Picks the weather icon out of a class list such as `icon icon_size_24 icon_snow`.
pub fn parse_icon(classes: &str) -> String {
  classes
    .split_whitespace()
    .filter(|class| class.starts_with("icon_") && !class.starts_with("icon_size_"))
    .last()
    .unwrap_or_default()
    .to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn clean_integer_keeps_digits_and_sign() {
    for (input, expected) in [("42", "42"), (" 42 ", "42"), ("-42", "-42"), (" -42 ", "-42")] {
      assert_eq!(clean_integer(input), expected, "input {:?}", input);
    }
  }

  #[test]
  fn clean_integer_converts_minus_sign() {
    assert_eq!(clean_integer("\u{2212}7 °C"), "-7");
  }

  #[test]
  fn extract_integer_parses_or_degrades_to_zero() {
    let cases = [
      ("42", 42),
      (" 42 ", 42),
      ("-42", -42),
      (" -42 ", -42),
      ("str 42 ", 42),
      ("str", 0),
      ("", 0),
      ("-", 0),
      ("--5", 0),
      ("+3", 3),
      ("\u{2212}12\u{2009}°", -12),
    ];

    for (input, expected) in cases {
      assert_eq!(extract_integer(input), expected, "input {:?}", input);
    }
  }

  #[test]
  fn strip_non_printable_replaces_thin_space() {
    assert_eq!(strip_non_printable("str"), "str");
    assert_eq!(strip_non_printable("\u{2009}str"), " str");
    assert_eq!(strip_non_printable("745\u{2009}мм"), "745 мм");
  }

  #[test]
  fn strip_non_printable_is_idempotent() {
    for input in ["", "str", "\u{2009}a\u{2009}b", "−5\u{2009}°C"] {
      let once = strip_non_printable(input);
      assert_eq!(strip_non_printable(&once), once);
    }
  }

  #[test]
  fn parse_icon_picks_weather_class() {
    let cases = [
      ("", ""),
      ("icon", ""),
      ("icon icon_size_24 icon_snow", "icon_snow"),
      ("icon icon_size_24 icon_rain", "icon_rain"),
      ("icon_size_24", ""),
    ];

    for (input, expected) in cases {
      assert_eq!(parse_icon(input), expected, "input {:?}", input);
    }
  }
}
