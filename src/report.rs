use crate::config::AnalysisConfig;
use crate::table::Table;
use crate::{columns, patterns, recommend, temporal};
use serde::Serialize;
use thiserror::Error;

/// How many resources are listed per pattern and in the overall noise ranking.
const TOP_RESOURCES_PER_PATTERN: usize = 3;
const RESOURCE_RANKING_LIMIT: usize = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("no description column detected")]
    NoDescriptionColumn,
}

/// Structured analysis result. The core never formats output; rendering is
/// the binary's job. Degraded sections (unresolved resource role, no usable
/// timeline) are absent rather than erroneous.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub summary: Summary,
    pub roles: RolesOut,
    pub patterns: Vec<PatternOut>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<CountItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temporal: Option<TemporalOut>,
    pub recommendations: Vec<RecommendationOut>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub total_rows: usize,
    pub distinct_patterns: usize,
    /// Rows whose description was empty or a placeholder token.
    pub unusable_descriptions: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RolesOut {
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_score: Option<f64>,
    pub resource: Option<String>,
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PatternOut {
    pub pattern: String,
    pub count: usize,
    /// Percent of all rows, blank descriptions included in the denominator.
    pub share: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub top_resources: Vec<CountItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CountItem {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct TemporalOut {
    pub start: String,
    pub end: String,
    pub span_days: i64,
    pub by_month: Vec<MonthCount>,
    pub parsed: usize,
    pub unparsed: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthCount {
    pub month: u32,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationOut {
    pub pattern: String,
    pub count: usize,
    pub share: f64,
    pub rule: String,
    pub action: String,
}

/// Run the full pipeline over a materialized table: resolve column roles,
/// aggregate patterns, profile the timeline, and attach tuning advisories to
/// the top-K patterns. The one fatal condition is an unresolvable description
/// column; everything else degrades to absent sections.
pub fn analyze(table: &Table, config: &AnalysisConfig) -> Result<Report, AnalysisError> {
    let roles = columns::resolve(table, &config.role_keywords);
    if roles.description.is_none() {
        return Err(AnalysisError::NoDescriptionColumn);
    }

    let book = patterns::aggregate(table, &roles);
    let profile = temporal::profile(table, &roles, &config.date_formats);
    let ranked = book.ranked();

    let pattern_rows: Vec<PatternOut> = ranked
        .iter()
        .map(|p| PatternOut {
            pattern: p.key.clone(),
            count: p.count,
            share: share_of(p.count, book.total_rows),
            top_resources: count_items(p.resources.ranked(), TOP_RESOURCES_PER_PATTERN),
        })
        .collect();

    let resources = roles
        .resource
        .as_ref()
        .map(|_| count_items(book.resource_noise.ranked(), RESOURCE_RANKING_LIMIT));

    let top_k = config.top_k.min(ranked.len());
    let recommendations = ranked[..top_k]
        .iter()
        .map(|p| {
            let rec = recommend::recommend(&p.key, &config.rules, &config.fallback_action);
            RecommendationOut {
                pattern: rec.pattern,
                count: p.count,
                share: share_of(p.count, book.total_rows),
                rule: rec.rule,
                action: rec.action,
            }
        })
        .collect();

    Ok(Report {
        summary: Summary {
            total_rows: book.total_rows,
            distinct_patterns: book.distinct_patterns(),
            unusable_descriptions: book.unusable_keys,
        },
        roles: RolesOut {
            description: roles.description,
            description_score: roles.description_score,
            resource: roles.resource,
            timestamp: roles.timestamp,
        },
        patterns: pattern_rows,
        resources,
        temporal: profile.map(temporal_out),
        recommendations,
    })
}

fn share_of(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

fn count_items(ranked: Vec<(&str, usize)>, limit: usize) -> Vec<CountItem> {
    ranked
        .into_iter()
        .take(limit)
        .map(|(name, count)| CountItem { name: name.to_string(), count })
        .collect()
}

fn temporal_out(p: temporal::TemporalProfile) -> TemporalOut {
    TemporalOut {
        start: p.start.format("%Y-%m-%d %H:%M:%S").to_string(),
        end: p.end.format("%Y-%m-%d %H:%M:%S").to_string(),
        span_days: p.span_days,
        by_month: p
            .by_month
            .iter()
            .map(|(&month, &count)| MonthCount { month, count })
            .collect(),
        parsed: p.parsed,
        unparsed: p.unparsed,
    }
}
