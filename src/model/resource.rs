use serde::{Deserialize, Serialize};

/// One translated source string within a resource/language pair, as returned
/// by the strings endpoint and stored verbatim in the cache file.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StringRecord {
    pub source_string: String,

    #[serde(default)]
    pub translation: String,

    /// Absent or empty means the string has no attributed contributor.
    #[serde(default)]
    pub user: Option<String>,

    /// Zero-padded ISO timestamp, so lexicographic order is chronological.
    pub last_update: String,
}

impl StringRecord {
    pub fn contributor(&self) -> Option<&str> {
        match self.user.as_deref() {
            Some(user) if !user.is_empty() => Some(user),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Resource {
    pub name: String,
    pub slug: String,

    // Empty until the per-resource strings request has run.
    #[serde(default)]
    pub strings: Vec<StringRecord>,
}

/// The full downloaded dataset for one project/language pair.
pub type Dataset = Vec<Resource>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contributor_treats_absent_and_empty_alike() {
        let attributed: StringRecord = serde_json::from_str(
            r#"{"source_string": "Hello", "translation": "Hallo", "user": "alice", "last_update": "2021-05-01T12:00:00.000"}"#,
        )
        .unwrap();
        assert_eq!(attributed.contributor(), Some("alice"));

        let empty: StringRecord = serde_json::from_str(
            r#"{"source_string": "Hello", "translation": "", "user": "", "last_update": "2021-05-01T12:00:00.000"}"#,
        )
        .unwrap();
        assert_eq!(empty.contributor(), None);

        let absent: StringRecord = serde_json::from_str(
            r#"{"source_string": "Hello", "last_update": "2021-05-01T12:00:00.000"}"#,
        )
        .unwrap();
        assert_eq!(absent.contributor(), None);
    }

    #[test]
    fn record_without_required_fields_is_rejected() {
        let missing_update = serde_json::from_str::<StringRecord>(r#"{"source_string": "Hello"}"#);
        assert!(missing_update.is_err());
    }
}
