// Авторские права (c) 2025 urdekcah. Все права защищены.
//
// Этот исходный код распространяется под лицензией AGPL-3.0,
// текст которой находится в файле LICENSE в корневом каталоге данного проекта.
use crate::constants::{HISTOGRAM_GLYPHS, INTERPOLATION_FACTOR};

/// One-line sparkline of hourly temperatures.
///
/// Every hour becomes `factor` glyphs, linearly interpolated towards the next hour
/// (the last hour interpolates towards itself). Samples are scaled between the
/// lowest and highest value onto the glyph palette. A spread smaller than half the
/// palette is drawn against a spread of exactly half the palette, so a one degree
/// wobble stays low instead of jumping from the lightest to the heaviest block.
#[derive(Debug, Clone)]
pub struct Histogram {
  glyphs: Vec<char>,
  factor: usize,
}

impl Histogram {
  pub fn new(glyphs: &str, factor: usize) -> Self {
    Self {
      glyphs: glyphs.chars().collect(),
      factor: factor.max(1),
    }
  }

  pub fn factor(&self) -> usize {
    self.factor
  }

  pub fn interpolate(&self, temps: &[i32]) -> Vec<f64> {
    let mut samples = Vec::with_capacity(temps.len() * self.factor);
    for (i, &current) in temps.iter().enumerate() {
      let current = f64::from(current);
      let next = f64::from(temps.get(i + 1).copied().unwrap_or(temps[i]));
      samples.push(current);
      for j in 1..self.factor {
        samples.push(current + (j as f64 / self.factor as f64) * (next - current));
      }
    }
    samples
  }

  pub fn render(&self, temps: &[i32]) -> String {
    if self.glyphs.is_empty() || temps.is_empty() {
      return String::new();
    }

    let samples = self.interpolate(temps);
    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let top = (self.glyphs.len() - 1) as f64;

    if max - min == 0.0 {
      let middle = self.glyphs[(self.glyphs.len() - 1) / 2];
      return std::iter::repeat(middle).take(samples.len()).collect();
    }

    let max = max.max(min + top / 2.0);
    samples
      .iter()
      .map(|value| self.glyphs[((value - min) / (max - min) * top) as usize])
      .collect()
  }
}

impl Default for Histogram {
  fn default() -> Self {
    Self::new(HISTOGRAM_GLYPHS, INTERPOLATION_FACTOR)
  }
}
