// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use error::Error;
use scraper::{ElementRef, Html, Selector};

/// What to pull out of a matched element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extract {
  Text,
  Attr(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
  pub selector: String,
  pub extract: Extract,
}

impl Query {
  pub fn text(selector: impl Into<String>) -> Self {
    Self {
      selector: selector.into(),
      extract: Extract::Text,
    }
  }

  pub fn attr(selector: impl Into<String>, name: impl Into<String>) -> Self {
    Self {
      selector: selector.into(),
      extract: Extract::Attr(name.into()),
    }
  }
}

/// A parsed page that can be addressed with CSS selectors.
///
/// The extractor only ever talks to this trait, so any markup library can sit behind it.
pub trait Document {
  /// One value per matching element, in document order. Elements lacking the requested
  /// attribute are skipped.
  fn query(&self, query: &Query) -> Result<Vec<String>, Error>;

  /// For every element matching `item`, the first match of each field inside it.
  fn query_items(&self, item: &str, fields: &[Query]) -> Result<Vec<Vec<Option<String>>>, Error>;
}

pub struct HtmlDocument {
  html: Html,
}

impl HtmlDocument {
  pub fn parse(body: &str) -> Self {
    Self {
      html: Html::parse_document(body),
    }
  }
}

impl std::fmt::Debug for HtmlDocument {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("HtmlDocument").finish_non_exhaustive()
  }
}

fn compile(selector: &str) -> Result<Selector, Error> {
  Selector::parse(selector).map_err(|e| Error::SelectorError(format!("{:?}: {}", selector, e)))
}

fn pick(element: ElementRef<'_>, extract: &Extract) -> Option<String> {
  match extract {
    Extract::Text => Some(element.text().collect()),
    Extract::Attr(name) => element.value().attr(name).map(String::from),
  }
}

impl Document for HtmlDocument {
  fn query(&self, query: &Query) -> Result<Vec<String>, Error> {
    let selector = compile(&query.selector)?;
    Ok(
      self
        .html
        .select(&selector)
        .filter_map(|element| pick(element, &query.extract))
        .collect(),
    )
  }

  fn query_items(&self, item: &str, fields: &[Query]) -> Result<Vec<Vec<Option<String>>>, Error> {
    let item_selector = compile(item)?;
    let field_selectors = fields
      .iter()
      .map(|field| compile(&field.selector).map(|selector| (selector, &field.extract)))
      .collect::<Result<Vec<_>, _>>()?;

    Ok(
      self
        .html
        .select(&item_selector)
        .map(|element| {
          field_selectors
            .iter()
            .map(|(selector, extract)| {
              element
                .select(selector)
                .next()
                .and_then(|found| pick(found, extract))
            })
            .collect()
        })
        .collect(),
    )
  }
}
