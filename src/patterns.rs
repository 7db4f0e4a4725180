use crate::columns::{self, RoleAssignment};
use crate::table::Table;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Grouping key length: the first 50 characters of a description, which drops
/// the row-specific tail (host names, percentages) most exports append.
pub const PATTERN_KEY_LEN: usize = 50;

/// Resource label used when the resource cell is empty.
pub const UNKNOWN_RESOURCE: &str = "Unknown";

static RE_LINE_BREAKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\r\n]+").unwrap());

/// A recurring alert pattern: its normalized key, how often it occurred, and
/// which resources it was seen on.
#[derive(Debug, Clone)]
pub struct Pattern {
    pub key: String,
    pub count: usize,
    pub resources: Counter,
}

/// Occurrence counter that remembers first-seen order so ranking ties break
/// deterministically.
#[derive(Debug, Clone, Default)]
pub struct Counter {
    order: Vec<String>,
    counts: HashMap<String, usize>,
}

impl Counter {
    pub fn bump(&mut self, key: &str) {
        match self.counts.get_mut(key) {
            Some(n) => *n += 1,
            None => {
                self.order.push(key.to_string());
                self.counts.insert(key.to_string(), 1);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Entries by count descending; ties keep first-seen order (stable sort
    /// over the insertion sequence).
    pub fn ranked(&self) -> Vec<(&str, usize)> {
        let mut items: Vec<(&str, usize)> = self
            .order
            .iter()
            .map(|k| (k.as_str(), self.counts[k]))
            .collect();
        items.sort_by(|a, b| b.1.cmp(&a.1));
        items
    }
}

/// Everything the aggregation pass over the table produced: patterns in
/// first-seen order, the overall per-resource noise totals, and the row
/// accounting needed for percentages.
#[derive(Debug, Clone, Default)]
pub struct PatternBook {
    patterns: Vec<Pattern>,
    index: HashMap<String, usize>,
    pub resource_noise: Counter,
    pub total_rows: usize,
    /// Rows whose key was empty or a placeholder token; counted toward the
    /// total, absent from the ranked list.
    pub unusable_keys: usize,
}

impl PatternBook {
    pub fn distinct_patterns(&self) -> usize {
        self.patterns.len()
    }

    /// Patterns by occurrence count descending, ties by first-seen order.
    /// Rows with unusable keys are already excluded; they only show up in
    /// `total_rows` and `unusable_keys`.
    pub fn ranked(&self) -> Vec<&Pattern> {
        let mut out: Vec<&Pattern> = self.patterns.iter().collect();
        out.sort_by(|a, b| b.count.cmp(&a.count));
        out
    }

    fn bump(&mut self, key: String, resource: Option<&str>) {
        let idx = match self.index.get(&key) {
            Some(&i) => i,
            None => {
                self.patterns.push(Pattern {
                    key: key.clone(),
                    count: 0,
                    resources: Counter::default(),
                });
                self.index.insert(key, self.patterns.len() - 1);
                self.patterns.len() - 1
            }
        };
        let pattern = &mut self.patterns[idx];
        pattern.count += 1;
        if let Some(res) = resource {
            pattern.resources.bump(res);
        }
    }
}

/// Normalize a description into its grouping key: trim, collapse embedded
/// line breaks to single spaces, take the first 50 characters. Case and
/// punctuation are preserved, so "CPU Usage" and "cpu usage" stay distinct.
pub fn normalize_key(description: &str) -> String {
    let collapsed = RE_LINE_BREAKS.replace_all(description.trim(), " ");
    collapsed.chars().take(PATTERN_KEY_LEN).collect()
}

/// Group every row by its normalized description prefix, counting occurrences
/// and per-resource sightings. Resource noise totals cover all rows, empty
/// descriptions included.
pub fn aggregate(table: &Table, roles: &RoleAssignment) -> PatternBook {
    let mut book = PatternBook { total_rows: table.len(), ..Default::default() };
    let Some(desc_col) = roles.description.as_deref() else {
        return book;
    };

    for row in 0..table.len() {
        let resource = roles.resource.as_deref().map(|col| {
            let v = table.value(row, col).trim();
            if v.is_empty() { UNKNOWN_RESOURCE } else { v }
        });
        if let Some(res) = resource {
            book.resource_noise.bump(res);
        }

        let key = normalize_key(table.value(row, desc_col));
        if !columns::is_valid_value(&key) {
            book.unusable_keys += 1;
            continue;
        }
        book.bump(key, resource);
    }
    book
}
