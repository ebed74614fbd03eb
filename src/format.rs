use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Typed view of one upstream format record.
///
/// Read leniently from the raw JSON: a field of the wrong type counts as
/// absent instead of failing the whole response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormatDescriptor {
    pub quality_label: Option<String>,
    pub ext: Option<String>,
    pub url: Option<String>,
    pub filesize: Option<u64>,
}

impl FormatDescriptor {
    pub fn with_quality(label: impl Into<String>) -> Self {
        Self {
            quality_label: Some(label.into()),
            ..Self::default()
        }
    }

    pub fn from_value(value: &Value) -> Self {
        let text = |key: &str| value.get(key).and_then(Value::as_str).map(ToString::to_string);

        Self {
            quality_label: text("quality_label"),
            ext: text("ext"),
            url: text("url"),
            filesize: value.get("filesize").and_then(whole_number),
        }
    }
}

/// Upstream response body. `formats` is kept as raw JSON so it can be
/// echoed back to the client untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoInfo {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub length_seconds: Option<u64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub thumbnail: Option<String>,
    #[serde(default, deserialize_with = "array_or_empty")]
    pub formats: Vec<Value>,
}

impl VideoInfo {
    /// One descriptor per entry of `formats`, in the same order.
    pub fn descriptors(&self) -> Vec<FormatDescriptor> {
        self.formats.iter().map(FormatDescriptor::from_value).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadResponse {
    pub title: String,
    pub author: String,
    pub duration: u64,
    pub thumbnail: String,
    pub download_url: Option<String>,
    pub quality: String,
    pub filesize: u64,
    pub formats: Vec<Value>,
}

impl DownloadResponse {
    /// Builds the client payload from an upstream record and the descriptor
    /// the resolver picked out of `info.descriptors()`.
    pub fn normalize(info: &VideoInfo, selected: Option<&FormatDescriptor>) -> Self {
        Self {
            title: text_or(info.title.as_deref(), "Video"),
            author: text_or(info.author.as_deref(), "Unknown"),
            duration: info.length_seconds.unwrap_or_default(),
            thumbnail: info.thumbnail.clone().unwrap_or_default(),
            download_url: selected
                .and_then(|format| format.url.as_deref())
                .filter(|value| !value.is_empty())
                .map(ToString::to_string),
            quality: text_or(
                selected.and_then(|format| format.quality_label.as_deref()),
                "Unknown",
            ),
            filesize: selected
                .and_then(|format| format.filesize)
                .unwrap_or_default(),
            formats: info.formats.clone(),
        }
    }
}

fn text_or(value: Option<&str>, fallback: &str) -> String {
    value
        .filter(|value| !value.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

// Sizes and durations arrive either as numbers or as numeric strings.
// Negative or fractional values are not byte counts or second counts.
fn whole_number(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number.as_u64().or_else(|| {
            number
                .as_f64()
                .filter(|n| *n >= 0.0 && n.fract() == 0.0 && *n <= u64::MAX as f64)
                .map(|n| n as u64)
        }),
        Value::String(text) => text.trim().parse::<u64>().ok(),
        _ => None,
    }
}

fn lenient_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .as_ref()
        .and_then(whole_number))
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(text)) => Some(text),
        _ => None,
    })
}

fn array_or_empty<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    })
}
