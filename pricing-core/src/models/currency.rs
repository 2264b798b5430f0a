use std::fmt;

use serde::{Deserialize, Serialize};

/// Currency used to label monetary amounts.
///
/// The currency only changes how values are displayed; every currency shares
/// the same number format ("." grouping, "," decimal separator).
///
/// Serialized as its code (`brl`); deserialized through [`Currency::parse`],
/// so config files accept the same spellings as the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Currency {
    #[default]
    Real,
    Guarani,
    Dollar,
}

impl Currency {
    pub fn all() -> &'static [Currency] {
        &[Currency::Real, Currency::Guarani, Currency::Dollar]
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Real => "R$",
            Self::Guarani => "G$",
            Self::Dollar => "U$",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Real => "brl",
            Self::Guarani => "pyg",
            Self::Dollar => "usd",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Real => "R$ (Real)",
            Self::Guarani => "G$ (Guarani)",
            Self::Dollar => "U$ (Dólar)",
        }
    }

    /// Accepts the ISO-like code, the symbol, the English name, or the full label.
    pub fn parse(s: &str) -> Option<Self> {
        let needle = s.trim();
        Self::all().iter().copied().find(|c| {
            needle.eq_ignore_ascii_case(c.code())
                || needle == c.symbol()
                || needle == c.label()
                || needle.eq_ignore_ascii_case(&format!("{c:?}"))
        })
    }
}

impl TryFrom<String> for Currency {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
            .ok_or_else(|| format!("unknown currency '{value}' (expected brl, pyg or usd)"))
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.code().to_string()
    }
}

impl fmt::Display for Currency {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_accepts_code_symbol_and_label() {
        assert_eq!(Currency::parse("usd"), Some(Currency::Dollar));
        assert_eq!(Currency::parse("BRL"), Some(Currency::Real));
        assert_eq!(Currency::parse("G$"), Some(Currency::Guarani));
        assert_eq!(Currency::parse("R$ (Real)"), Some(Currency::Real));
        assert_eq!(Currency::parse("guarani"), Some(Currency::Guarani));
    }

    #[test]
    fn parse_rejects_unknown_currency() {
        assert_eq!(Currency::parse("EUR"), None);
    }

    #[test]
    fn try_from_reports_the_rejected_text() {
        assert_eq!(Currency::try_from("pyg".to_string()), Ok(Currency::Guarani));
        assert_eq!(
            Currency::try_from("EUR".to_string()),
            Err("unknown currency 'EUR' (expected brl, pyg or usd)".to_string())
        );
    }

    #[test]
    fn display_uses_symbol() {
        assert_eq!(Currency::Dollar.to_string(), "U$");
    }
}
