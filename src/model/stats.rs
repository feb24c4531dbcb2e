/// Sentinel older than any real timestamp; any attributed record supersedes it.
pub const EPOCH: &str = "1970-01-01T00:00:00.000";

/// Cumulative statistics for one contributor, built up by the aggregator
/// one translation event at a time.
#[derive(Debug, Clone)]
pub struct ContributorStats {
    pub name: String,
    pub count: u64,
    pub last_update: String,
}

impl ContributorStats {
    pub fn new(name: &str) -> Self {
        ContributorStats {
            name: name.to_string(),
            count: 0,
            last_update: EPOCH.to_string(),
        }
    }

    /// Timestamps are zero-padded ISO strings, so the lexicographic max is
    /// the chronological max.
    pub fn add_translation(&mut self, last_update: &str) {
        self.count += 1;
        if last_update > self.last_update.as_str() {
            self.last_update = last_update.to_string();
        }
    }
}

/// One attributed translation, flattened out of its resource.
#[derive(Debug, Clone)]
pub struct TranslationEvent {
    pub source_string: String,
    pub last_update: String,
    pub user: String,
    pub resource_name: String,
}
