use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt::Write as _;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::model::stats::{ContributorStats, TranslationEvent};

pub const DEFAULT_TOP_LIMIT: usize = 50;
pub const DEFAULT_CHANGES_LIMIT: usize = 100;

/// Ordering policy for the recent-changes report, resolved once from the
/// group key and passed into the sort call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    ByLastUpdateDesc,
    ByResourceAsc,
    ByUserAsc,
    BySourceAsc,
}

impl SortOrder {
    /// Unrecognized keys deliberately fall back to the date ordering.
    pub fn from_key(key: Option<&str>) -> Self {
        match key {
            Some("resource") => SortOrder::ByResourceAsc,
            Some("user") => SortOrder::ByUserAsc,
            Some("source") => SortOrder::BySourceAsc,
            _ => SortOrder::ByLastUpdateDesc,
        }
    }

    fn compare(self, a: &TranslationEvent, b: &TranslationEvent) -> Ordering {
        match self {
            SortOrder::ByLastUpdateDesc => b.last_update.cmp(&a.last_update),
            SortOrder::ByResourceAsc => a.resource_name.cmp(&b.resource_name),
            SortOrder::ByUserAsc => a.user.cmp(&b.user),
            SortOrder::BySourceAsc => a.source_string.cmp(&b.source_string),
        }
    }
}

// Best-effort line write: render the text first, falling back to the raw
// UTF-8 byte form if that fails. Encoding trouble must never abort a report.
// The output sees each line in a single write, so a failed attempt never
// leaves a duplicated prefix behind; a write error here is a real I/O error
// and propagates.
fn write_line<W: Write>(out: &mut W, line: &str) -> io::Result<()> {
    let mut rendered = String::new();
    if write!(rendered, "{line}").is_err() {
        return out.write_all(line.as_bytes());
    }
    out.write_all(rendered.as_bytes())
}

/// Writes the top-users leaderboard, descending by translation count.
/// Tie order between equal counts is unspecified.
pub fn write_top_users(
    dir: &Path,
    project: &str,
    language: &str,
    users: &HashMap<String, ContributorStats>,
    limit: usize,
) -> io::Result<PathBuf> {
    let mut ranked: Vec<&ContributorStats> = users.values().collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(limit);

    let path = dir.join(format!("{project}_{language}_users_top_{limit}.txt"));
    let mut out = File::create(&path)?;

    let header = format!("{:>21} {:>18} {:>21}\n", "user name", "translations", "last update");
    write_line(&mut out, &header)?;

    for user in ranked {
        let line = format!("{:>25}: {:>9} {:>32}\n", user.name, user.count, user.last_update);
        write_line(&mut out, &line)?;
    }

    Ok(path)
}

/// Writes the recent-changes feed, sorted per `order` and truncated to `limit`.
pub fn write_recent_changes(
    dir: &Path,
    project: &str,
    language: &str,
    events: &[TranslationEvent],
    order: SortOrder,
    limit: usize,
) -> io::Result<PathBuf> {
    let mut sorted: Vec<&TranslationEvent> = events.iter().collect();
    sorted.sort_by(|a, b| order.compare(a, b));
    sorted.truncate(limit);

    let path = dir.join(format!("{project}_{language}_last_changes.txt"));
    let mut out = File::create(&path)?;

    write_line(&mut out, "Last changes\n\n")?;

    for event in sorted {
        let line = format!(
            "{}: \"{}\", {} by {}\n",
            event.resource_name, event.source_string, event.last_update, event.user
        );
        write_line(&mut out, &line)?;
    }

    Ok(path)
}
