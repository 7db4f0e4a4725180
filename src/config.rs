use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Column-name keywords per role, checked in list order (earlier wins).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RoleKeywords {
    pub description: Vec<String>,
    pub resource: Vec<String>,
    pub timestamp: Vec<String>,
}

impl Default for RoleKeywords {
    fn default() -> Self {
        RoleKeywords {
            description: strings(&[
                "breve descripcion",
                "breve descripción",
                "descripcion",
                "descripción",
                "resumen",
                "description",
                "short description",
                "summary",
                "titulo",
                "título",
                "detalle",
                "detail",
                "asunto",
            ]),
            resource: strings(&[
                "elemento",
                "configuration item",
                "ci",
                "affected entity",
                "entidad",
            ]),
            timestamp: strings(&["fecha", "created", "creado", "apertura", "opened", "date"]),
        }
    }
}

/// One keyword → advisory action entry of the recommendation table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Rule {
    pub keyword: String,
    pub action: String,
}

/// Externally supplied analysis knobs: role keywords, the ordered date-format
/// list, how many top patterns get a recommendation, and the ordered rule
/// table. Every field has a default, so a partial JSON document overrides
/// only what it names.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub role_keywords: RoleKeywords,
    pub date_formats: Vec<String>,
    pub top_k: usize,
    #[serde(alias = "recommendation_rules")]
    pub rules: Vec<Rule>,
    pub fallback_action: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            role_keywords: RoleKeywords::default(),
            date_formats: strings(&[
                "%d/%m/%Y %H:%M:%S",
                "%d/%m/%Y %H:%M",
                "%Y-%m-%d %H:%M:%S",
                "%d-%m-%Y",
            ]),
            top_k: 5,
            rules: default_rules(),
            fallback_action: "Review automated baselining; if the alert is frequent and \
                 short-lived, set a static threshold instead."
                .to_string(),
        }
    }
}

impl AnalysisConfig {
    /// Load from a JSON file. Keyword and rule matching is case-insensitive,
    /// implemented by lower-casing the lists once here.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let mut config: AnalysisConfig = serde_json::from_reader(BufReader::new(file))?;
        config.lowercase_keywords();
        Ok(config)
    }

    fn lowercase_keywords(&mut self) {
        for list in [
            &mut self.role_keywords.description,
            &mut self.role_keywords.resource,
            &mut self.role_keywords.timestamp,
        ] {
            for kw in list.iter_mut() {
                *kw = kw.to_lowercase();
            }
        }
        for rule in &mut self.rules {
            rule.keyword = rule.keyword.to_lowercase();
        }
    }
}

fn default_rules() -> Vec<Rule> {
    [
        (
            "cpu",
            "Raise the CPU saturation threshold or widen the observation window \
             (e.g. 95% for 5 min instead of 3).",
        ),
        (
            "memory",
            "Review memory usage; check whether it is GC pressure before raising the threshold.",
        ),
        (
            "memoria",
            "Review memory usage; check whether it is GC pressure before raising the threshold.",
        ),
        (
            "disk",
            "Switch low-disk alerts from percentage to a fixed free-space value (MB), \
             or exclude temporary partitions.",
        ),
        (
            "disco",
            "Switch low-disk alerts from percentage to a fixed free-space value (MB), \
             or exclude temporary partitions.",
        ),
        (
            "service",
            "Review the failure rate; filter non-critical HTTP 404/400 errors and prefer \
             automated baselines over fixed thresholds.",
        ),
        (
            "servicio",
            "Review the failure rate; filter non-critical HTTP 404/400 errors and prefer \
             automated baselines over fixed thresholds.",
        ),
        (
            "failure",
            "Review the failure rate; filter non-critical HTTP 404/400 errors and prefer \
             automated baselines over fixed thresholds.",
        ),
        (
            "process",
            "Check for scheduled restarts; define maintenance windows or disable \
             process-unavailable alerts for non-critical processes.",
        ),
        (
            "proceso",
            "Check for scheduled restarts; define maintenance windows or disable \
             process-unavailable alerts for non-critical processes.",
        ),
        (
            "synthetic",
            "Verify synthetic test stability from every location; raise the retry count \
             for intermittent failures.",
        ),
        (
            "connection",
            "Enable retry-on-error in the affected monitors before alerting.",
        ),
        (
            "timeout",
            "Enable retry-on-error in the affected monitors before alerting.",
        ),
    ]
    .into_iter()
    .map(|(keyword, action)| Rule { keyword: keyword.to_string(), action: action.to_string() })
    .collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
