// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use error::Error;
use regex::{Captures, Regex};

const ONE_COLOR: &str = r"(?:black|red|green|yellow|blue|magenta|cyan|white|grey|\d{1,3})(?:\+[bBuih]+)?";
pub const RESET: &str = "\x1b[0m";

/// Expands `<green>text</>` style markup into ANSI escapes, or drops the tags.
///
/// Opening tags take a color name or a 256-color number, optional `+` modifiers
/// (`b` bold, `B` blink, `u` underline, `i` italic, `h` bright) and an optional
/// `:background`. `</>` and `</name>` both reset. Tags that do not fit the
/// grammar are left in the text.
#[derive(Debug, Clone)]
pub struct TagRenderer {
  enabled: bool,
  tag: Regex,
}

impl TagRenderer {
  pub fn new(enabled: bool) -> Result<Self, Error> {
    let tag = Regex::new(&format!(r"<({c}(?::{c})?|/\w*)>", c = ONE_COLOR))?;
    Ok(Self { enabled, tag })
  }

  pub fn enabled(&self) -> bool {
    self.enabled
  }

  pub fn render(&self, text: &str) -> String {
    self
      .tag
      .replace_all(text, |caps: &Captures| {
        if !self.enabled {
          return String::new();
        }
        match &caps[1] {
          tag if tag.starts_with('/') => RESET.to_string(),
          tag => color_code(tag),
        }
      })
      .into_owned()
  }

  /// Wraps `text` in one color without looking for tags inside it.
  pub fn paint(&self, style: &str, text: &str) -> String {
    if !self.enabled {
      return text.to_string();
    }
    format!("{}{}{}", color_code(style), text, RESET)
  }
}

/// SGR sequence for a style such as `green`, `red+bh` or `white:blue+h`.
pub fn color_code(style: &str) -> String {
  let (fg, bg) = match style.split_once(':') {
    Some((fg, bg)) => (fg, Some(bg)),
    None => (style, None),
  };

  let (name, mods) = split_modifiers(fg);
  let mut codes: Vec<String> = [('b', "1"), ('i', "3"), ('u', "4"), ('B', "5")]
    .iter()
    .filter(|(flag, _)| mods.contains(*flag))
    .map(|(_, code)| code.to_string())
    .collect();
  codes.push(layer_code(name, mods.contains('h'), true));

  if let Some(bg) = bg {
    let (name, mods) = split_modifiers(bg);
    codes.push(layer_code(name, mods.contains('h'), false));
  }

  format!("\x1b[{}m", codes.join(";"))
}

fn split_modifiers(style: &str) -> (&str, &str) {
  style.split_once('+').unwrap_or((style, ""))
}

fn layer_code(name: &str, bright: bool, foreground: bool) -> String {
  if !name.is_empty() && name.chars().all(|c| c.is_ascii_digit()) {
    return format!("{};5;{}", if foreground { 38 } else { 48 }, name);
  }

  let (offset, bright) = match name {
    "black" => (0, bright),
    "red" => (1, bright),
    "green" => (2, bright),
    "yellow" => (3, bright),
    "blue" => (4, bright),
    "magenta" => (5, bright),
    "cyan" => (6, bright),
    "white" => (7, bright),
    "grey" => (0, true),
    _ => (9, false),
  };
  let base = match (foreground, bright) {
    (true, false) => 30,
    (true, true) => 90,
    (false, false) => 40,
    (false, true) => 100,
  };
  (base + offset).to_string()
}
