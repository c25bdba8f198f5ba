//! Optional formatter and localization capabilities.
//!
//! Both are supplied by the host application. A schema built without them
//! falls back to fixed-decimal currency text and the hardcoded date patterns.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;

use crate::model::Value;

/// A named display formatter: `(value, decimals) -> text`.
pub type FormatFn = Rc<dyn Fn(&Value, u32) -> Option<String>>;

/// Looks up display formatters by name.
///
/// Currency columns ask for `"currency"` once, when they are built.
pub trait FormatterLookup {
    /// Returns the formatter registered under `name`, if any.
    fn lookup(&self, name: &str) -> Option<FormatFn>;
}

/// Translates localization keys.
///
/// Date columns ask for their default pattern under
/// `Core$MomentFullDateString` / `Core$MomentFullDateTimeString`.
pub trait Localizer {
    /// Returns the translation of `key`, if one exists.
    fn translate(&self, key: &str) -> Option<String>;
}

impl<F> Localizer for F
where
    F: Fn(&str) -> Option<String>,
{
    fn translate(&self, key: &str) -> Option<String> {
        self(key)
    }
}

/// A fixed key → text translation table.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
#[serde(transparent)]
pub struct Translations(HashMap<String, String>);

impl Translations {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a translation (builder pattern).
    pub fn with(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.0.insert(key.into(), text.into());
        self
    }

    /// Returns `true` if the table holds no translations.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Localizer for Translations {
    fn translate(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }
}

/// Built-in `"currency"` and `"number"` formatters.
///
/// `currency` prints the symbol, thousands separators and the requested
/// number of decimals, with the sign in front (`-$1,234.50`). `number` is the
/// same without the symbol. Both return `None` for null and non-numeric input,
/// so zero still renders (`$0.00`).
///
/// # Example
///
/// ```
/// use findpick_lib::model::Value;
/// use findpick_lib::schema::{FormatterLookup, StandardFormatters};
///
/// let currency = StandardFormatters::default().lookup("currency").unwrap();
/// assert_eq!(currency(&Value::from(1234.5), 2).as_deref(), Some("$1,234.50"));
/// ```
#[derive(Debug, Clone)]
pub struct StandardFormatters {
    /// Currency symbol placed before the amount.
    pub symbol: String,
    /// Thousands separator.
    pub group_separator: char,
    /// Decimal separator.
    pub decimal_separator: char,
}

impl Default for StandardFormatters {
    fn default() -> Self {
        Self {
            symbol: "$".to_string(),
            group_separator: ',',
            decimal_separator: '.',
        }
    }
}

impl StandardFormatters {
    /// Creates formatters with the default `$`, `,` and `.` symbols.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the currency symbol.
    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
    }

    /// Sets the thousands and decimal separators.
    pub fn with_separators(mut self, group: char, decimal: char) -> Self {
        self.group_separator = group;
        self.decimal_separator = decimal;
        self
    }

    fn grouped(&self, value: &Value, decimals: u32, symbol: &str) -> Option<String> {
        let amount = value.as_decimal()?;
        let fixed = fixed_decimal(amount, decimals);
        let (negative, digits) = match fixed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, fixed.as_str()),
        };
        let (whole, fraction) = match digits.split_once('.') {
            Some((w, f)) => (w, Some(f)),
            None => (digits, None),
        };

        let mut out = String::with_capacity(fixed.len() + whole.len() / 3 + symbol.len() + 1);
        if negative {
            out.push('-');
        }
        out.push_str(symbol);
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                out.push(self.group_separator);
            }
            out.push(ch);
        }
        if let Some(fraction) = fraction {
            out.push(self.decimal_separator);
            out.push_str(fraction);
        }
        Some(out)
    }
}

impl FormatterLookup for StandardFormatters {
    fn lookup(&self, name: &str) -> Option<FormatFn> {
        let this = self.clone();
        match name {
            "currency" => Some(Rc::new(move |value: &Value, decimals: u32| {
                this.grouped(value, decimals, &this.symbol)
            })),
            "number" => Some(Rc::new(move |value: &Value, decimals: u32| {
                this.grouped(value, decimals, "")
            })),
            _ => None,
        }
    }
}

/// Formats `amount` with exactly `decimals` fraction digits, rounding halves
/// away from zero.
pub fn fixed_decimal(amount: Decimal, decimals: u32) -> String {
    let rounded = amount.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.*}", decimals as usize, rounded);
    // A value that rounds to zero keeps no sign, e.g. -0.001 at 2 places.
    if rounded.is_zero() {
        text.trim_start_matches('-').to_string()
    } else {
        text
    }
}

pub(crate) struct DebugFormatFn<'a>(pub(crate) &'a Option<FormatFn>);

impl fmt::Debug for DebugFormatFn<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(_) => f.write_str("Some(<formatter>)"),
            None => f.write_str("None"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_decimal_rounds_half_away() {
        assert_eq!(fixed_decimal(Decimal::new(3, 0), 2), "3.00");
        assert_eq!(fixed_decimal(Decimal::new(1005, 3), 2), "1.01");
        assert_eq!(fixed_decimal(Decimal::new(-1005, 3), 2), "-1.01");
        assert_eq!(fixed_decimal(Decimal::new(-1, 3), 2), "0.00");
        assert_eq!(fixed_decimal(Decimal::new(15, 1), 0), "2");
    }

    #[test]
    fn test_currency_grouping() {
        let currency = StandardFormatters::new().lookup("currency").unwrap();
        assert_eq!(currency(&Value::from(0), 2).as_deref(), Some("$0.00"));
        assert_eq!(currency(&Value::from(999), 0).as_deref(), Some("$999"));
        assert_eq!(
            currency(&Value::from(-1_234_567.891), 2).as_deref(),
            Some("-$1,234,567.89")
        );
        assert_eq!(currency(&Value::Null, 2), None);
        assert_eq!(currency(&Value::from("abc"), 2), None);
    }

    #[test]
    fn test_custom_symbols() {
        let number = StandardFormatters::new()
            .with_separators('.', ',')
            .lookup("number")
            .unwrap();
        assert_eq!(number(&Value::from(12345.5), 1).as_deref(), Some("12.345,5"));
    }

    #[test]
    fn test_unknown_formatter() {
        assert!(StandardFormatters::new().lookup("percent").is_none());
    }

    #[test]
    fn test_closure_localizer() {
        let localizer = |key: &str| (key == "k").then(|| "v".to_string());
        assert_eq!(localizer.translate("k").as_deref(), Some("v"));
        assert_eq!(localizer.translate("other"), None);
    }

    #[test]
    fn test_translation_table() {
        let table = Translations::new().with("App$Find", "Buscar");
        assert_eq!(table.translate("App$Find").as_deref(), Some("Buscar"));
        assert_eq!(table.translate("Core$OK"), None);
    }
}
