//! Fetched page record as stored in the results file.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// One fetched page. Created on a successful fetch and never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    pub url: String,
    /// Raw response body, stored verbatim.
    pub html_content: String,
    /// Local wall-clock time without offset (`2025-07-08T21:37:58.946123`).
    /// Stamps written with an offset or `Z` are read as their wall-clock time.
    #[serde(deserialize_with = "lenient_timestamp")]
    pub scraped_at: NaiveDateTime,
    pub status_code: u16,
}

impl PageRecord {
    /// Record stamped with the current local time.
    pub fn now(url: impl Into<String>, html_content: String, status_code: u16) -> Self {
        Self {
            url: url.into(),
            html_content,
            scraped_at: chrono::Local::now().naive_local(),
            status_code,
        }
    }
}

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a stored timestamp, with or without a UTC offset.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_local()))
        .or_else(|| {
            DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%z")
                .ok()
                .map(|dt| dt.naive_local())
        })
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("unrecognised timestamp: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_python_isoformat_timestamps() {
        let json = r#"{
            "url": "https://example.com/",
            "html_content": "<html></html>",
            "scraped_at": "2025-07-08T21:37:58.946123",
            "status_code": 200
        }"#;
        let r: PageRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.status_code, 200);
        assert_eq!(r.scraped_at.to_string(), "2025-07-08 21:37:58.946123");
    }

    #[test]
    fn reads_timestamps_with_offset_or_zulu() {
        for stamp in [
            "2025-07-08T21:37:58+00:00",
            "2025-07-08T21:37:58Z",
            "2025-07-08T21:37:58.000+0000",
            "2025-07-08 21:37:58",
        ] {
            let json = format!(
                r#"{{"url": "u", "html_content": "", "scraped_at": "{stamp}", "status_code": 200}}"#
            );
            let r: PageRecord = serde_json::from_str(&json).unwrap();
            assert_eq!(r.scraped_at.to_string(), "2025-07-08 21:37:58", "{stamp}");
        }
    }

    #[test]
    fn rejects_non_timestamp() {
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn serializes_expected_field_names() {
        let r = PageRecord::now("https://example.com/a", "<p>x</p>".into(), 200);
        let v = serde_json::to_value(&r).unwrap();
        let obj = v.as_object().unwrap();
        for key in ["url", "html_content", "scraped_at", "status_code"] {
            assert!(obj.contains_key(key), "missing {key}");
        }
        assert!(!obj["scraped_at"].as_str().unwrap().contains('+'));
    }
}
