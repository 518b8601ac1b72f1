use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use strum::{EnumIter, IntoEnumIterator};

/// EDGAR form types this tool surface understands. Anything else round-trips
/// through `Other` so an unusual form string is never lost or rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, EnumIter)]
#[serde(try_from = "String")]
pub enum FormType {
    Form3,
    Form4,
    Form5,
    Form144,
    Form13D,
    Form13G,
    Form10K,
    Form10Q,
    Form8K,
    Other(String),
}

impl TryFrom<String> for FormType {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        FormType::from_str(&s)
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormType::Form3 => write!(f, "3"),
            FormType::Form4 => write!(f, "4"),
            FormType::Form5 => write!(f, "5"),
            FormType::Form144 => write!(f, "144"),
            FormType::Form13D => write!(f, "13D"),
            FormType::Form13G => write!(f, "13G"),
            FormType::Form10K => write!(f, "10-K"),
            FormType::Form10Q => write!(f, "10-Q"),
            FormType::Form8K => write!(f, "8-K"),
            FormType::Other(s) => write!(f, "{}", s),
        }
    }
}

pub static FORM_TYPES: Lazy<String> = Lazy::new(|| {
    FormType::iter()
        .filter(|t| !matches!(t, FormType::Other(_)))
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(", ")
});

impl FormType {
    pub fn list_types() -> &'static str {
        &FORM_TYPES
    }
}

impl FromStr for FormType {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<FormType, String> {
        match s.trim().to_uppercase().as_str() {
            "3" => Ok(FormType::Form3),
            "4" => Ok(FormType::Form4),
            "5" => Ok(FormType::Form5),
            "144" => Ok(FormType::Form144),
            "13D" => Ok(FormType::Form13D),
            "13G" => Ok(FormType::Form13G),
            "10-K" => Ok(FormType::Form10K),
            "10-Q" => Ok(FormType::Form10Q),
            "8-K" => Ok(FormType::Form8K),
            _ => Ok(FormType::Other(s.trim().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_forms_round_trip() {
        for form in FormType::iter().filter(|t| !matches!(t, FormType::Other(_))) {
            let parsed: FormType = form.to_string().parse().unwrap();
            assert_eq!(parsed, form);
        }
    }

    #[test]
    fn unknown_form_is_preserved() {
        let parsed: FormType = "4/A".parse().unwrap();
        assert_eq!(parsed, FormType::Other("4/A".to_string()));
        assert_eq!(parsed.to_string(), "4/A");
    }

    #[test]
    fn list_types_names_the_insider_forms() {
        assert!(FormType::list_types().contains('4'));
        assert!(FormType::list_types().contains("13D"));
    }
}
