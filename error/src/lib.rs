// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum Error {
  #[error("HTTP error: {0}")]
  HttpError(#[from] reqwest::Error),
  #[error("Request to {url} failed with status {status}")]
  StatusError { url: String, status: u16 },
  #[error("Timeout error")]
  TimeoutError,
  #[error("Invalid selector: {0}")]
  SelectorError(String),
  #[error("City \"{0}\" not found")]
  CityNotFound(String),
  #[error("Configuration error: {0}")]
  ConfigError(String),
  #[error("IO error: {0}")]
  IoError(#[from] std::io::Error),
  #[error("Failed to parse page: {0}")]
  ParseError(String),
  #[error("Regex error: {0}")]
  RegexError(#[from] regex::Error),
  #[error("Invalid URL: {0}")]
  UrlError(#[from] url::ParseError),
  #[error("JSON error: {0}")]
  JsonError(#[from] serde_json::Error),
  #[error("TOML error: {0}")]
  TomlError(#[from] toml::de::Error),
}

impl Error {
  pub fn is_not_found(&self) -> bool {
    matches!(self, Error::CityNotFound(_))
  }
}
