//! Report rendering and exit status.
//!
//! Supports `human` (default) and `json` outputs. Human output prints one
//! line per failing rule and a summary; the JSON form carries every result
//! plus a top-level summary.

use crate::models::{Condition, LintReport, Outcome, ResolvedConfig, Severity, Summary};
use crate::rules::Registry;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

pub const EXIT_PASS: i32 = 0;
pub const EXIT_WARN: i32 = 1;
pub const EXIT_FAIL: i32 = 2;
/// Broken setup (config, registry, unreadable input), distinct from lint failures.
pub const EXIT_FATAL: i32 = 3;

fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

fn stderr_color() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

pub fn error_prefix() -> String {
    if stderr_color() {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

pub fn note_prefix() -> String {
    if stderr_color() {
        "note:".cyan().bold().to_string()
    } else {
        "note:".to_string()
    }
}

/// Worst outcome across all reports.
pub fn overall(reports: &[LintReport]) -> Outcome {
    reports
        .iter()
        .map(|r| r.outcome)
        .max()
        .unwrap_or(Outcome::Pass)
}

pub fn exit_code(outcome: Outcome) -> i32 {
    match outcome {
        Outcome::Pass => EXIT_PASS,
        Outcome::Warn => EXIT_WARN,
        Outcome::Fail => EXIT_FAIL,
    }
}

/// Print lint results in the requested format.
pub fn print_lint(reports: &[LintReport], output: &str, help_url: Option<&str>) {
    match output {
        "json" => match serde_json::to_string_pretty(&compose_lint_json(reports)) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("failed to render json report: {e}"),
        },
        _ => print!("{}", render_human(reports, use_colors(output), help_url)),
    }
}

/// Render the human report (pure, for testing).
pub fn render_human(reports: &[LintReport], color: bool, help_url: Option<&str>) -> String {
    let mut out = String::new();
    for report in reports {
        if report.ignored {
            continue;
        }
        let failures: Vec<_> = report.failures().collect();
        if failures.is_empty() {
            continue;
        }
        let input = format!("⧗ input: {} ({})", report.header, report.source);
        if color {
            out.push_str(&input.bold().to_string());
        } else {
            out.push_str(&input);
        }
        out.push('\n');
        for r in failures {
            let (icon, sev) = match r.severity {
                Severity::Error => ("✖", "⟦error⟧"),
                _ => ("▲", "⟦warn⟧"),
            };
            let (icon, sev) = if color {
                match r.severity {
                    Severity::Error => (icon.red().to_string(), sev.red().bold().to_string()),
                    _ => (icon.yellow().to_string(), sev.yellow().bold().to_string()),
                }
            } else {
                (icon.to_string(), sev.to_string())
            };
            let message = r.message.as_deref().unwrap_or("rule failed");
            out.push_str(&format!("{icon} {sev} ❲{}❳ — {message}\n", r.rule));
        }
    }

    let summary = Summary::from_reports(reports);
    let line = format!(
        "— Summary — errors={} warnings={} messages={} ignored={}",
        summary.errors, summary.warnings, summary.messages, summary.ignored
    );
    if color {
        out.push_str(&line.bold().to_string());
    } else {
        out.push_str(&line);
    }
    out.push('\n');

    if let Some(url) = help_url {
        if summary.errors + summary.warnings > 0 {
            out.push_str(&format!("ⓘ Get help: {url}\n"));
        }
    }
    out
}

/// Compose lint JSON object (pure) for testing/snapshot purposes.
pub fn compose_lint_json(reports: &[LintReport]) -> JsonVal {
    json!({
        "reports": reports,
        "summary": Summary::from_reports(reports),
        "outcome": overall(reports),
    })
}

/// Print registered rules with their default severity.
pub fn print_rules(registry: &Registry, output: &str) {
    match output {
        "json" => {
            let items: Vec<_> = registry
                .iter()
                .map(|(name, entry)| {
                    json!({
                        "rule": name,
                        "defaultSeverity": entry.default_severity,
                        "description": entry.validator().description(),
                    })
                })
                .collect();
            match serde_json::to_string_pretty(&items) {
                Ok(s) => println!("{s}"),
                Err(e) => eprintln!("failed to render json: {e}"),
            }
        }
        _ => {
            let width = registry.iter().map(|(n, _)| n.len()).max().unwrap_or(0);
            for (name, entry) in registry.iter() {
                println!(
                    "{name:<width$}  {:<7}  {}",
                    entry.default_severity.to_string(),
                    entry.validator().description()
                );
            }
        }
    }
}

/// Print the resolved rule set.
pub fn print_config(config: &ResolvedConfig, output: &str) {
    match output {
        "json" => match serde_json::to_string_pretty(config) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("failed to render json: {e}"),
        },
        _ => print!("{}", render_config(config)),
    }
}

/// One `name [code, condition, value]` line per rule (pure, for testing).
pub fn render_config(config: &ResolvedConfig) -> String {
    let mut out = String::new();
    for rule in config.rules.values() {
        let condition = match rule.condition {
            Condition::Always => "always",
            Condition::Never => "never",
        };
        match &rule.value {
            Some(v) => out.push_str(&format!(
                "{} [{}, {condition}, {v}]\n",
                rule.name,
                rule.severity.code()
            )),
            None => out.push_str(&format!(
                "{} [{}, {condition}]\n",
                rule.name,
                rule.severity.code()
            )),
        }
    }
    if !config.default_ignores {
        out.push_str("defaultIgnores = false\n");
    }
    for pattern in &config.ignores {
        out.push_str(&format!("ignore {pattern}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ValidationResult;

    fn report(source: &str, results: Vec<ValidationResult>) -> LintReport {
        let outcome = Outcome::aggregate(&results);
        LintReport {
            source: source.into(),
            header: "Fix: X".into(),
            ignored: false,
            results,
            outcome,
        }
    }

    fn result(rule: &str, severity: Severity, passed: bool) -> ValidationResult {
        ValidationResult {
            rule: rule.into(),
            severity,
            passed,
            message: (!passed).then(|| format!("{rule} failed")),
        }
    }

    #[test]
    fn exit_codes_follow_worst_outcome() {
        let pass = report("a", vec![result("type-case", Severity::Error, true)]);
        let warn = report("b", vec![result("references-empty", Severity::Warning, false)]);
        let fail = report("c", vec![result("type-case", Severity::Error, false)]);
        assert_eq!(exit_code(overall(&[])), EXIT_PASS);
        assert_eq!(exit_code(overall(&[pass.clone()])), EXIT_PASS);
        assert_eq!(exit_code(overall(&[pass.clone(), warn.clone()])), EXIT_WARN);
        assert_eq!(exit_code(overall(&[warn, fail, pass])), EXIT_FAIL);
    }

    #[test]
    fn human_lists_only_failures() {
        let r = report(
            "stdin",
            vec![
                result("scope-case", Severity::Error, false),
                result("subject-empty", Severity::Error, true),
                result("references-empty", Severity::Warning, false),
            ],
        );
        let text = render_human(&[r], false, Some("https://example.com/help"));
        assert!(text.contains("⧗ input: Fix: X (stdin)"));
        assert!(text.contains("✖ ⟦error⟧ ❲scope-case❳ — scope-case failed"));
        assert!(text.contains("▲ ⟦warn⟧ ❲references-empty❳"));
        assert!(!text.contains("subject-empty"));
        assert!(text.contains("errors=1 warnings=1 messages=1 ignored=0"));
        assert!(text.contains("Get help: https://example.com/help"));
    }

    #[test]
    fn help_url_hidden_when_clean() {
        let r = report("stdin", vec![result("type-case", Severity::Error, true)]);
        let text = render_human(&[r], false, Some("https://example.com/help"));
        assert!(!text.contains("Get help"));
        assert!(!text.contains("⧗ input"));
    }

    #[test]
    fn config_lines() {
        let cfg = crate::resolver::resolve(&[], &serde_json::from_value(json!({
            "references-empty": [1, "never"],
            "scope-case": [2, "always", "lower-case"],
            "subject-case": [0]
        })).unwrap())
        .unwrap();
        assert_eq!(
            render_config(&cfg),
            "references-empty [1, never]\nscope-case [2, always, lower-case]\nsubject-case [0, always]\n"
        );
    }

    #[test]
    fn test_compose_lint_json_shape() {
        let r = report("stdin", vec![result("type-case", Severity::Error, false)]);
        let out = compose_lint_json(&[r]);
        assert_eq!(out["summary"]["errors"], 1);
        assert_eq!(out["outcome"], "fail");
        assert_eq!(out["reports"][0]["results"][0]["severity"], "error");
        assert_eq!(out["reports"][0]["results"][0]["passed"], false);
    }
}
