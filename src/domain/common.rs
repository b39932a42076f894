use serde::{de, Deserialize, Deserializer};

/// Identifies entities that expose a stable unique identifier.
pub trait Identifiable {
    fn id(&self) -> &str;
}

/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Parses user-entered amount text. Blank input yields `None`.
pub fn parse_amount_text(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseNumber {
    Number(f64),
    Text(String),
}

/// Accepts a JSON number or a numeric string. Records written by earlier
/// clients stored the raw input text of the amount field.
pub(crate) fn de_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match LooseNumber::deserialize(deserializer)? {
        LooseNumber::Number(value) => Ok(value),
        LooseNumber::Text(text) => parse_amount_text(&text)
            .ok_or_else(|| de::Error::custom(format!("`{text}` is not a number"))),
    }
}

/// Like [`de_amount`], but `null` and `""` decode to `None`.
pub(crate) fn de_optional_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<LooseNumber>::deserialize(deserializer)? {
        None => Ok(None),
        Some(LooseNumber::Number(value)) => Ok(Some(value)),
        Some(LooseNumber::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(LooseNumber::Text(text)) => parse_amount_text(&text)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("`{text}` is not a number"))),
    }
}
