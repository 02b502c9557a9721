// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
pub mod color;
pub mod histogram;
pub mod report;

pub use color::TagRenderer;
pub use histogram::Histogram;
pub use report::Report;
