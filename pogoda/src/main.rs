// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use anyhow::{Context, Result};
use clap::Parser;
use config::{
  Config, OutputFormat, Selectors, DEFAULT_DAY_LIMIT, DEFAULT_FORECAST_URL, DEFAULT_HOURLY_URL,
};
use error::Error;
use std::{
  env,
  io::{self, IsTerminal, Write},
  path::PathBuf,
  process::ExitCode,
};
use tracing::{debug, instrument, Level};
use weather::{ForecastService, Locale, Report};

/// Прогноз погоды с yandex.ru/pogoda в терминале.
#[derive(Debug, Parser)]
#[command(name = "pogoda", version, about, long_about = None)]
struct Cli {
  /// City as it appears in the forecast URL, e.g. moscow. Empty means the detected location.
  #[arg(default_value = "")]
  city: String,

  /// Print one JSON line instead of the report
  #[arg(long)]
  json: bool,

  /// Plain output even on a terminal (NO_COLOR is honored as well)
  #[arg(long)]
  no_color: bool,

  /// Skip today's hourly forecast
  #[arg(long)]
  no_today: bool,

  /// Maximum number of upcoming days
  #[arg(long, value_name = "N", default_value_t = DEFAULT_DAY_LIMIT)]
  days: usize,

  /// TOML file overriding the page selectors
  #[arg(long, value_name = "FILE")]
  selectors: Option<PathBuf>,

  /// Forecast page base; the city is appended as a path segment
  #[arg(long, env = "YANDEX_WEATHER_URL", default_value = DEFAULT_FORECAST_URL)]
  base_url: String,

  /// Hourly chart page base; the city is appended as a path segment
  #[arg(long, env = "YANDEX_WEATHER_HOURLY_URL", default_value = DEFAULT_HOURLY_URL)]
  hourly_url: String,

  /// More log output on stderr (-v, -vv, -vvv)
  #[arg(short, long, action = clap::ArgAction::Count)]
  verbose: u8,
}

impl Cli {
  fn color(&self) -> bool {
    !self.no_color && env::var_os("NO_COLOR").is_none() && io::stdout().is_terminal()
  }

  fn config(&self) -> Result<Config> {
    let mut builder = Config::builder()
      .city(&self.city)
      .format(if self.json {
        OutputFormat::Json
      } else {
        OutputFormat::Human
      })
      .color(self.color())
      .include_today(!self.no_today)
      .day_limit(self.days)
      .forecast_url(&self.base_url)
      .hourly_url(&self.hourly_url);

    if let Some(path) = &self.selectors {
      let selectors = Selectors::from_file(path)
        .with_context(|| format!("Failed to load selectors from {}", path.display()))?;
      builder = builder.selectors(selectors);
    }

    Ok(builder.build()?)
  }
}

pub struct App {
  service: ForecastService,
  report: Report,
}

fn max_level(verbose: u8) -> Level {
  match verbose {
    0 => Level::WARN,
    1 => Level::INFO,
    2 => Level::DEBUG,
    _ => Level::TRACE,
  }
}

#[cfg(debug_assertions)]
fn setup_logging(verbose: u8) {
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_max_level(max_level(verbose))
    .with_file(true)
    .with_line_number(true)
    .init();
}

#[cfg(not(debug_assertions))]
fn setup_logging(verbose: u8) {
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_max_level(max_level(verbose))
    .init();
}

#[tokio::main]
async fn main() -> ExitCode {
  let cli = Cli::parse();
  setup_logging(cli.verbose);
  debug!("{:?}", cli);

  let result = match cli.config().and_then(App::new) {
    Ok(app) => app.run().await,
    Err(e) => Err(e),
  };

  match result {
    Ok(text) => match io::stdout().lock().write_all(text.as_bytes()) {
      Ok(()) => ExitCode::SUCCESS,
      Err(e) => {
        eprintln!("pogoda: {}", e);
        ExitCode::FAILURE
      }
    },
    Err(e) => match e.downcast_ref::<Error>() {
      Some(err) if err.is_not_found() => {
        eprintln!("pogoda: {}", err);
        ExitCode::from(2)
      }
      _ => {
        eprintln!("pogoda: {:#}", e);
        ExitCode::FAILURE
      }
    },
  }
}

impl App {
  #[instrument(skip(config), fields(city = %config.city()))]
  pub fn new(config: Config) -> Result<Self> {
    Ok(Self {
      report: Report::new(&config, Locale::ru())?,
      service: ForecastService::new(config)?,
    })
  }

  #[instrument(skip(self))]
  pub async fn run(&self) -> Result<String> {
    let forecast = self.service.fetch().await?;
    Ok(self.report.render(&forecast)?)
  }
}
