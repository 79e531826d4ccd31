//! Two-phase config resolution: base rule sets, then local overrides.
//!
//! `extends` entries are applied left to right, so a later base replaces an
//! earlier one rule by rule. Local `rules` entries are applied last and
//! always win. The result is a fresh `ResolvedConfig`; nothing shared is
//! mutated.

use crate::config::LintConfig;
use crate::error::ConfigError;
use crate::models::{Condition, ResolvedConfig, Rule, RuleValue, Severity};
use crate::presets;
use serde_json::Value as Json;
use std::collections::BTreeMap;
use tracing::debug;

/// Merge the named base sets with `overrides` into an ordered rule map.
pub fn resolve(
    extends: &[String],
    overrides: &BTreeMap<String, Vec<Json>>,
) -> Result<ResolvedConfig, ConfigError> {
    let mut rules: BTreeMap<String, Rule> = BTreeMap::new();
    for base in extends {
        let set = presets::base_rule_set(base).ok_or_else(|| ConfigError::UnknownBase(base.clone()))?;
        debug!(base = %base, rules = set.len(), "applying base rule set");
        for rule in set {
            rules.insert(rule.name.clone(), rule);
        }
    }
    for (name, raw) in overrides {
        let rule = parse_rule(name, raw)?;
        rules.insert(name.clone(), rule);
    }
    Ok(ResolvedConfig {
        rules,
        ..ResolvedConfig::default()
    })
}

/// Resolve a loaded config file, carrying over ignore and help settings.
pub fn resolve_config(cfg: &LintConfig) -> Result<ResolvedConfig, ConfigError> {
    let mut resolved = resolve(&cfg.extends, &cfg.rules)?;
    resolved.ignores = cfg.ignores.clone();
    resolved.default_ignores = cfg.default_ignores.unwrap_or(true);
    resolved.help_url = cfg.help_url.clone();
    Ok(resolved)
}

/// Parse `[severity, condition?, value?]`.
pub fn parse_rule(name: &str, raw: &[Json]) -> Result<Rule, ConfigError> {
    let severity = raw
        .first()
        .and_then(Json::as_i64)
        .and_then(Severity::from_code)
        .ok_or_else(|| ConfigError::InvalidSeverity {
            rule: name.to_string(),
            found: raw.first().map_or_else(|| "nothing".to_string(), Json::to_string),
        })?;

    let condition = match raw.get(1) {
        None => Condition::Always,
        Some(v) => v
            .as_str()
            .and_then(Condition::parse)
            .ok_or_else(|| ConfigError::InvalidCondition {
                rule: name.to_string(),
                found: v.to_string(),
            })?,
    };

    let value = raw.get(2).map(|v| parse_value(name, v)).transpose()?;

    if raw.len() > 3 {
        return Err(ConfigError::InvalidValue {
            rule: name.to_string(),
            found: format!("{} elements (at most 3 allowed)", raw.len()),
        });
    }

    Ok(Rule {
        name: name.to_string(),
        severity,
        condition,
        value,
    })
}

fn parse_value(name: &str, v: &Json) -> Result<RuleValue, ConfigError> {
    let invalid = || ConfigError::InvalidValue {
        rule: name.to_string(),
        found: v.to_string(),
    };
    match v {
        Json::Bool(b) => Ok(RuleValue::Bool(*b)),
        Json::Number(n) => n.as_i64().map(RuleValue::Int).ok_or_else(invalid),
        Json::String(s) => Ok(RuleValue::Text(s.clone())),
        Json::Array(items) => items
            .iter()
            .map(|i| i.as_str().map(str::to_string).ok_or_else(invalid))
            .collect::<Result<Vec<_>, _>>()
            .map(RuleValue::List),
        Json::Null | Json::Object(_) => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn overrides(v: Json) -> BTreeMap<String, Vec<Json>> {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn unknown_base_fails() {
        let err = resolve(&["nonexistent".into()], &BTreeMap::new()).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownBase(b) if b == "nonexistent"));
    }

    #[test]
    fn override_wins_over_base() {
        let ov = overrides(json!({"type-case": [1, "never", "upper-case"], "subject-case": [0]}));
        let resolved = resolve(&["conventional".into()], &ov).unwrap();
        let type_case = &resolved.rules["type-case"];
        assert_eq!(type_case.severity, Severity::Warning);
        assert_eq!(type_case.condition, Condition::Never);
        assert_eq!(type_case.value, Some(RuleValue::Text("upper-case".into())));
        assert_eq!(resolved.rules["subject-case"].severity, Severity::Off);
        assert_eq!(resolved.rules["subject-case"].value, None);
    }

    #[test]
    fn later_base_replaces_earlier() {
        let resolved = resolve(&["conventional".into(), "angular".into()], &BTreeMap::new()).unwrap();
        assert_eq!(resolved.rules["header-max-length"].value, Some(RuleValue::Int(72)));
        // only in conventional, still present
        assert!(resolved.rules.contains_key("header-trim"));
        let reversed = resolve(&["angular".into(), "conventional".into()], &BTreeMap::new()).unwrap();
        assert_eq!(reversed.rules["header-max-length"].value, Some(RuleValue::Int(100)));
    }

    #[test]
    fn additive_overrides_are_kept() {
        let ov = overrides(json!({"references-empty": [1, "never"]}));
        let resolved = resolve(&[], &ov).unwrap();
        assert_eq!(resolved.rules.len(), 1);
        assert_eq!(resolved.rules["references-empty"].condition, Condition::Never);
    }

    #[test]
    fn resolving_twice_is_identical() {
        let cfg = LintConfig {
            extends: vec!["conventional".into()],
            rules: overrides(json!({"scope-case": [2, "always", "lower-case"]})),
            ..LintConfig::default()
        };
        assert_eq!(resolve_config(&cfg).unwrap(), resolve_config(&cfg).unwrap());
    }

    #[test]
    fn severity_out_of_range_fails() {
        for bad in [json!([3]), json!([-1]), json!(["2"]), json!([])] {
            let raw: Vec<Json> = serde_json::from_value(bad).unwrap();
            let err = parse_rule("type-case", &raw).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidSeverity { .. }), "{err}");
        }
    }

    #[test]
    fn bad_condition_and_value_fail() {
        let err = parse_rule("type-case", &[json!(2), json!("sometimes")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidCondition { .. }));
        let err = parse_rule("type-enum", &[json!(2), json!("always"), json!({"a": 1})]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        let err = parse_rule("type-enum", &[json!(2), json!("always"), json!([1, 2])]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn config_settings_carry_over() {
        let cfg = LintConfig {
            ignores: vec!["^WIP".into()],
            default_ignores: Some(false),
            help_url: Some("https://example.com".into()),
            ..LintConfig::default()
        };
        let resolved = resolve_config(&cfg).unwrap();
        assert_eq!(resolved.ignores, vec!["^WIP"]);
        assert!(!resolved.default_ignores);
        assert_eq!(resolved.help_url.as_deref(), Some("https://example.com"));
    }
}
