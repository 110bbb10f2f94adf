//! Monetary input mask
//!
//! The price field is masked on every keystroke: whatever the user typed is
//! reduced to its digits, read as cents and re-rendered as currency. The
//! amount is recovered from the rendered string only when the form is
//! submitted.
//!
//! ```text
//! "12345"        --encode--> "R$ 123,45"
//! "R$ 123,45"    --decode--> Valid(123.45)
//! "abc"          --decode--> Invalid
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

/// Optional leading minus, optional 1-3 char currency prefix, an integer part
/// (plain or grouped in threes) and an optional fraction after the last `.`
/// or `,`. A minus anywhere else does not match.
static AMOUNT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(-)?[^\d\s-]{0,3}\s?(\d{1,3}(?:[.,]\d{3})+|\d+)(?:[.,](\d{0,2}))?$")
        .expect("amount pattern is valid")
});

/// Separator between the currency symbol and the digits, as rendered by
/// browsers for pt-BR.
const SYMBOL_SPACE: char = '\u{a0}';

/// Locale rules used to render an amount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub symbol: &'static str,
    pub grouping: char,
    pub decimal: char,
}

impl CurrencyFormat {
    /// Brazilian real, `R$ 1.234,56`
    pub const BRL: CurrencyFormat = CurrencyFormat {
        symbol: "R$",
        grouping: '.',
        decimal: ',',
    };
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::BRL
    }
}

/// Result of reading an amount back from a formatted string
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParsedAmount {
    Valid(f64),
    Invalid,
}

impl ParsedAmount {
    pub fn value(&self) -> Option<f64> {
        match self {
            ParsedAmount::Valid(v) => Some(*v),
            ParsedAmount::Invalid => None,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ParsedAmount::Valid(_))
    }

    /// Amount in minor units, rounded to the nearest cent
    pub fn cents(&self) -> Option<u64> {
        match self {
            ParsedAmount::Valid(v) if *v >= 0.0 => Some((v * 100.0).round() as u64),
            _ => None,
        }
    }

    /// `Invalid` never satisfies a minimum
    pub fn at_least(&self, minimum: f64) -> bool {
        match self {
            ParsedAmount::Valid(v) => *v >= minimum,
            ParsedAmount::Invalid => false,
        }
    }
}

/// Encoder/decoder pair for a price input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoneyMask {
    format: CurrencyFormat,
}

impl MoneyMask {
    pub fn new(format: CurrencyFormat) -> Self {
        Self { format }
    }

    /// Mask raw input. Every non-digit is dropped and the digits are read as
    /// cents, however many there are. Input without digits renders as zero.
    pub fn encode(&self, raw: &str) -> String {
        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            return self.encode("0");
        }
        self.render_cents(&digits)
    }

    /// Render an amount given in minor units
    pub fn encode_cents(&self, cents: u64) -> String {
        self.render_cents(&cents.to_string())
    }

    /// `digits` is a non-empty run of ASCII digits counting cents
    fn render_cents(&self, digits: &str) -> String {
        let digits = format!("{:0>3}", digits.trim_start_matches('0'));
        let (units, fraction) = digits.split_at(digits.len() - 2);
        let units = match units.trim_start_matches('0') {
            "" => "0",
            trimmed => trimmed,
        };
        format!(
            "{}{}{}{}{}",
            self.format.symbol,
            SYMBOL_SPACE,
            group_thousands(units, self.format.grouping),
            self.format.decimal,
            fraction
        )
    }

    /// Render a decimal amount, e.g. a price coming from the API
    pub fn format_amount(&self, value: f64) -> String {
        if !value.is_finite() {
            return self.encode_cents(0);
        }
        let cents = (value.abs() * 100.0).round() as u64;
        let rendered = self.encode_cents(cents);
        if value < 0.0 && cents > 0 {
            format!("-{}", rendered)
        } else {
            rendered
        }
    }

    /// Read the amount back from a masked string
    pub fn decode(&self, display: &str) -> ParsedAmount {
        let Some(caps) = AMOUNT_PATTERN.captures(display.trim()) else {
            return ParsedAmount::Invalid;
        };

        let negative = caps.get(1).is_some();
        let integer: String = caps
            .get(2)
            .map(|m| m.as_str())
            .unwrap_or_default()
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        let fraction = caps.get(3).map(|m| m.as_str()).unwrap_or_default();

        let number = if fraction.is_empty() {
            integer
        } else {
            format!("{}.{}", integer, fraction)
        };

        match number.parse::<f64>() {
            Ok(v) if negative => ParsedAmount::Valid(-v),
            Ok(v) => ParsedAmount::Valid(v),
            Err(_) => ParsedAmount::Invalid,
        }
    }
}

fn group_thousands(digits: &str, separator: char) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(separator);
        }
        result.push(c);
    }
    result
}
