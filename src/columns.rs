use crate::config::RoleKeywords;
use crate::table::Table;

/// Tokens that carry no diagnostic signal; cells holding one of these (or
/// nothing) do not count as valid values when profiling a column.
pub const PLACEHOLDER_TOKENS: [&str; 5] = ["#N/A", "Unknown", "None", "0", "1"];

/// Cardinality floor/ceiling penalties: near-constant columns read like status
/// flags, near-unique columns like identifiers. Neither groups well.
const LOW_CARDINALITY_FLOOR: usize = 5;
const HIGH_CARDINALITY_RATIO: f64 = 0.9;
const CARDINALITY_PENALTY: f64 = 50.0;

/// Minimum score a column must exceed to win the description role through the
/// scoring fallback. A pure-identifier table lands every column below this,
/// and the resolver reports failure instead of picking the least-bad column.
const SCORE_FLOOR: f64 = -1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnProfile {
    pub name: String,
    pub valid_count: usize,
    pub unique_count: usize,
    pub avg_len: f64,
}

/// Resolved column roles. Absence of `description` is fatal downstream;
/// `resource` and `timestamp` are best-effort. `description_score` is set
/// only when the scoring fallback (not a keyword) picked the column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoleAssignment {
    pub description: Option<String>,
    pub description_score: Option<f64>,
    pub resource: Option<String>,
    pub timestamp: Option<String>,
}

pub fn is_valid_value(value: &str) -> bool {
    let v = value.trim();
    !v.is_empty() && !PLACEHOLDER_TOKENS.contains(&v)
}

pub fn profile_column(name: &str, values: &[&str]) -> ColumnProfile {
    let valid: Vec<&str> = values.iter().map(|v| v.trim()).filter(|v| is_valid_value(v)).collect();
    let unique_count = {
        let mut seen: Vec<&str> = valid.clone();
        seen.sort_unstable();
        seen.dedup();
        seen.len()
    };
    let avg_len = if valid.is_empty() {
        0.0
    } else {
        valid.iter().map(|v| v.chars().count()).sum::<usize>() as f64 / valid.len() as f64
    };
    ColumnProfile {
        name: name.to_string(),
        valid_count: valid.len(),
        unique_count,
        avg_len,
    }
}

/// Description-likelihood score. Alert descriptions repeat across rows yet
/// carry substantive length, so length is rewarded and both cardinality
/// extremes are penalized. A column with no valid values is ineligible
/// (`None`).
pub fn score(profile: &ColumnProfile, total_rows: usize) -> Option<f64> {
    if profile.valid_count == 0 {
        return None;
    }
    let mut s = profile.avg_len * 2.0
        - (total_rows as f64 - profile.unique_count as f64).abs() * 0.1;
    if profile.unique_count < LOW_CARDINALITY_FLOOR {
        s -= CARDINALITY_PENALTY;
    }
    if profile.unique_count as f64 > total_rows as f64 * HIGH_CARDINALITY_RATIO {
        s -= CARDINALITY_PENALTY;
    }
    Some(s)
}

/// Assign {description, resource, timestamp} roles to columns.
///
/// Keywords are tried in list order; the first column matching, in column
/// order, wins the role. The description role alone falls back to the scorer
/// when no keyword matches; resource and timestamp stay unassigned instead.
/// Roles resolve in description → resource → timestamp order and a column
/// never holds two roles.
pub fn resolve(table: &Table, keywords: &RoleKeywords) -> RoleAssignment {
    let mut roles = RoleAssignment::default();

    match match_keyword(table.columns(), &keywords.description, &[]) {
        Some(col) => roles.description = Some(col),
        None => {
            if let Some((col, s)) = best_scored_column(table) {
                roles.description = Some(col);
                roles.description_score = Some(s);
            }
        }
    }

    let taken: Vec<&str> = roles.description.iter().map(|s| s.as_str()).collect();
    roles.resource = match_keyword(table.columns(), &keywords.resource, &taken);

    let taken: Vec<&str> = roles
        .description
        .iter()
        .chain(roles.resource.iter())
        .map(|s| s.as_str())
        .collect();
    roles.timestamp = match_keyword(table.columns(), &keywords.timestamp, &taken);

    roles
}

fn match_keyword(columns: &[String], keywords: &[String], excluded: &[&str]) -> Option<String> {
    for kw in keywords {
        for col in columns {
            if excluded.contains(&col.as_str()) {
                continue;
            }
            if keyword_matches(&col.to_lowercase(), kw) {
                return Some(col.clone());
            }
        }
    }
    None
}

// Keywords of three characters or fewer must match the whole header; as
// substrings they over-match (`ci` occurs inside `descripcion`).
fn keyword_matches(column_lower: &str, keyword: &str) -> bool {
    if keyword.chars().count() <= 3 {
        column_lower == keyword
    } else {
        column_lower.contains(keyword)
    }
}

/// Scoring fallback: maximum score across all columns, ineligible columns
/// skipped and scores at or below the floor never winning. Strict comparison
/// keeps the first column on ties, so the result is stable in column order.
fn best_scored_column(table: &Table) -> Option<(String, f64)> {
    let mut best: Option<(String, f64)> = None;
    for col in table.columns() {
        let profile = profile_column(col, &table.column_values(col));
        let Some(s) = score(&profile, table.len()) else { continue };
        if s <= SCORE_FLOOR {
            continue;
        }
        if best.as_ref().map(|(_, b)| s > *b).unwrap_or(true) {
            best = Some((col.clone(), s));
        }
    }
    best
}
