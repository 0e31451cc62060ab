use std::collections::BTreeMap;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

// ============================================================================
// Permissive field decoding
// ============================================================================
//
// The backend emits loosely typed JSON: fields go missing, come back as null,
// or change type between endpoints. None of that is an error for the client;
// every helper below maps an unusable value to "no value".

/// Decodes any field as `Option<T>`, treating null or a type mismatch as `None`
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Decodes a display string; numbers are stringified, blanks become `None`
pub(crate) fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(scalar_text))
}

/// Decodes a sequence, dropping entries that are not usable as `T`
pub(crate) fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Array(entries)) = value else {
        return Ok(Vec::new());
    };

    let total = entries.len();
    let items: Vec<T> = entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect();

    if items.len() < total {
        tracing::warn!(
            dropped = total - items.len(),
            kept = items.len(),
            "Skipped unreadable entries in backend list"
        );
    }

    Ok(items)
}

fn lenient_price<'de, D>(deserializer: D) -> Result<Option<Price>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Price::from_json))
}

fn lenient_aspects<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Object(map)) = value else {
        return Ok(BTreeMap::new());
    };

    Ok(map
        .into_iter()
        .filter_map(|(name, value)| {
            let text = match &value {
                Value::Array(values) => values.first().and_then(scalar_text),
                other => scalar_text(other),
            };
            text.map(|text| (name, text))
        })
        .collect())
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(format_number(n)),
        _ => None,
    }
}

/// Formats a JSON number the way a browser prints it: `12`, not `12.0`
fn format_number(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }
    match n.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => {
            format!("{}", f as i64)
        }
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

// ============================================================================
// Item shapes
// ============================================================================

/// A price normalized from either backend shape
///
/// Recommended and viewed items send `{ "value": .., "currency": .. }` while
/// cluster items send a bare pre-formatted scalar. Both end up here; a scalar
/// price simply has no currency.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Price {
    pub value: Option<String>,
    pub currency: Option<String>,
}

impl Price {
    /// Normalizes either price shape, returning `None` when nothing is displayable
    pub fn from_json(value: &Value) -> Option<Self> {
        let price = match value {
            Value::Object(map) => Price {
                value: map.get("value").and_then(scalar_text),
                currency: map.get("currency").and_then(scalar_text),
            },
            other => Price {
                value: scalar_text(other),
                currency: None,
            },
        };

        if price.value.is_none() && price.currency.is_none() {
            None
        } else {
            Some(price)
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.value, &self.currency) {
            (Some(value), Some(currency)) => write!(f, "{} {}", value, currency),
            (Some(value), None) => f.write_str(value),
            (None, Some(currency)) => f.write_str(currency),
            (None, None) => Ok(()),
        }
    }
}

/// An item as returned by the recommend endpoint (viewed or recommended)
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ItemView {
    #[serde(rename = "itemId", default, deserialize_with = "lenient_text")]
    pub item_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: Option<Price>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub category_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub condition: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub seller_username: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub location: Option<String>,
    #[serde(rename = "shortDescription", default, deserialize_with = "lenient_text")]
    pub short_description: Option<String>,
    /// Shipping cost as sent by the backend
    #[serde(default, deserialize_with = "lenient_text")]
    pub shipping: Option<String>,
    /// Item specifics, e.g. "Brand" -> "Sony"
    #[serde(default, deserialize_with = "lenient_aspects")]
    pub aspects: BTreeMap<String, String>,
}

/// An item sharing a cluster with the requested item
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ClusterItemView {
    #[serde(rename = "itemId", default, deserialize_with = "lenient_text")]
    pub item_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: Option<Price>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub condition: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub category_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub seller_username: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub cluster_id: Option<i64>,
}
