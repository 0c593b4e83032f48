use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

use super::axis_ticks::step_precision;

/// Locale used for month names on the date axis and for the caption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AxisLabelLocale {
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "pt-BR")]
    PtBr,
}

impl AxisLabelLocale {
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::PtBr => "pt-BR",
        }
    }

    /// Explanatory text drawn under the legend.
    #[must_use]
    pub const fn default_caption(self) -> &'static str {
        match self {
            Self::EnUs => "Numbers show the count of recorded cases.",
            Self::PtBr => "Os números representam o número de casos registrados.",
        }
    }
}

impl fmt::Display for AxisLabelLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for AxisLabelLocale {
    type Err = ChartError;

    fn from_str(value: &str) -> ChartResult<Self> {
        match value {
            "en-US" | "en" => Ok(Self::EnUs),
            "pt-BR" | "pt" => Ok(Self::PtBr),
            other => Err(ChartError::InvalidData(format!(
                "unsupported axis label locale `{other}`"
            ))),
        }
    }
}

const EN_US_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const PT_BR_MONTHS: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// Month name plus year, e.g. `January 2020` or `janeiro de 2020`.
#[must_use]
pub fn format_month_year_label(date: NaiveDate, locale: AxisLabelLocale) -> String {
    let month = date.month0() as usize;
    match locale {
        AxisLabelLocale::EnUs => format!("{} {}", EN_US_MONTHS[month], date.year()),
        AxisLabelLocale::PtBr => format!("{} de {}", PT_BR_MONTHS[month], date.year()),
    }
}

/// Text drawn above a bar: the raw count, no grouping.
#[must_use]
pub fn format_value_label(value: u64) -> String {
    value.to_string()
}

/// Value-axis tick text with thousands grouping and as many decimals as the
/// tick step needs (`0`, `2,500`, `0.5`).
#[must_use]
pub fn format_tick_label(value: f64, step: f64) -> String {
    if !value.is_finite() {
        return "nan".to_owned();
    }
    let precision = step_precision(step);
    let raw = format!("{:.*}", precision, value.abs());
    let (integer, fraction) = raw.split_once('.').unwrap_or((raw.as_str(), ""));

    let mut grouped = String::with_capacity(raw.len() + integer.len() / 3 + 1);
    let is_zero = raw.bytes().all(|byte| byte == b'0' || byte == b'.');
    if value.is_sign_negative() && !is_zero {
        grouped.push('-');
    }
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if !fraction.is_empty() {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}
