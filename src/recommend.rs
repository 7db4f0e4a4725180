use crate::config::Rule;

/// Rule label reported when no keyword matched and the generic advisory
/// applied.
pub const FALLBACK_RULE: &str = "baseline";

/// A tuning advisory for one pattern, read-only once produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub pattern: String,
    pub rule: String,
    pub action: String,
}

/// Map a pattern key to a tuning action. Rules are tested top-to-bottom
/// against the lower-cased key and the first match wins, even when several
/// keywords occur in the same pattern. Always returns an advisory: the
/// fallback action covers keys no rule matches.
pub fn recommend(pattern_key: &str, rules: &[Rule], fallback_action: &str) -> Recommendation {
    let lowered = pattern_key.to_lowercase();
    for rule in rules {
        if lowered.contains(&rule.keyword) {
            return Recommendation {
                pattern: pattern_key.to_string(),
                rule: rule.keyword.clone(),
                action: rule.action.clone(),
            };
        }
    }
    Recommendation {
        pattern: pattern_key.to_string(),
        rule: FALLBACK_RULE.to_string(),
        action: fallback_action.to_string(),
    }
}
