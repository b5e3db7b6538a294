//! Marker dialects: how expected issues are spelled inside fixture comments.
//!
//! A dialect only decodes a single line. Resolving the rule id default, the absolute line,
//! and duplicate detection is the parser's job.

use thiserror::Error;

/// Comment openers recognized before a marker keyword.
const COMMENT_OPENERS: &[&str] = &["//", "/*", "<!--", "#", "--"];

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MarkerSyntaxError {
    #[error("invalid rule id `{0}`")]
    InvalidRuleId(String),

    #[error("non-numeric count `{0}`")]
    InvalidCount(String),

    #[error("invalid line adjustment `{0}`")]
    InvalidLineAdjustment(String),

    #[error("more than one rule id (`{0}` and `{1}`)")]
    MultipleRuleIds(String, String),

    #[error("unterminated message: missing `}}}}`")]
    UnterminatedMessage,

    #[error("unexpected text after messages: `{0}`")]
    TrailingText(String),

    #[error("count {count} does not match {messages} messages")]
    CountMessageMismatch { count: u32, messages: usize },
}

/// Where the expected issue sits relative to the marker's own line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineAdjust {
    #[default]
    Same,
    Relative(i64),
    Absolute(u32),
}

impl LineAdjust {
    /// Resolve against the 1-based marker line. `None` when the result falls before line 1
    /// (line 0 is only reachable through an absolute `@0`, meaning a file-level issue).
    pub fn resolve(self, marker_line: u32) -> Option<u32> {
        match self {
            LineAdjust::Same => Some(marker_line),
            LineAdjust::Absolute(line) => Some(line),
            LineAdjust::Relative(delta) => {
                let line = i64::from(marker_line).checked_add(delta)?;
                if line < 1 { None } else { u32::try_from(line).ok() }
            }
        }
    }
}

/// One decoded marker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Marker {
    pub rule: Option<String>,
    pub count: u32,
    pub messages: Vec<String>,
    pub line_adjust: LineAdjust,
}

impl Marker {
    /// Reconcile an explicit count with the messages given.
    pub fn new(
        rule: Option<String>,
        count: Option<u32>,
        messages: Vec<String>,
        line_adjust: LineAdjust,
    ) -> Result<Self, MarkerSyntaxError> {
        let count = match count {
            Some(n) if messages.len() > 1 && n as usize != messages.len() => {
                return Err(MarkerSyntaxError::CountMessageMismatch {
                    count: n,
                    messages: messages.len(),
                });
            }
            Some(n) => n,
            None => messages.len().max(1) as u32,
        };
        Ok(Self {
            rule,
            count,
            messages,
            line_adjust,
        })
    }
}

/// Pluggable marker syntax.
pub trait MarkerDialect: Send + Sync {
    fn name(&self) -> &'static str;

    /// Decode every marker on one line. A line without a marker yields an empty vector.
    fn extract_markers(&self, line_text: &str) -> Result<Vec<Marker>, MarkerSyntaxError>;
}

/// `repo:key` or `key`, where each part is `[A-Za-z][A-Za-z0-9_-]*`.
pub fn is_valid_rule_id(id: &str) -> bool {
    fn part(s: &str) -> bool {
        let mut chars = s.chars();
        matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    }
    match id.split_once(':') {
        Some((repo, key)) => part(repo) && part(key),
        None => part(id),
    }
}

/// Drop the `repo:` prefix when asked to.
pub fn normalize_rule(rule: &str, strip_repository: bool) -> String {
    let rule = rule.trim();
    if strip_repository && let Some((_, key)) = rule.split_once(':') {
        return key.to_string();
    }
    rule.to_string()
}

/// Find `keyword` as the first word of a comment; return the text after it.
fn comment_body<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    for (idx, _) in line.match_indices(keyword) {
        let before = line[..idx].trim_end();
        if !COMMENT_OPENERS.iter().any(|o| before.ends_with(o)) {
            continue;
        }
        let rest = &line[idx + keyword.len()..];
        match rest.chars().next() {
            None => return Some(rest),
            Some(c) if c.is_whitespace() || c == '@' || c == '{' || c == ':' => {
                let rest = rest.trim_end();
                let rest = rest
                    .strip_suffix("*/")
                    .or_else(|| rest.strip_suffix("-->"))
                    .unwrap_or(rest);
                return Some(rest);
            }
            Some(_) => continue,
        }
    }
    None
}

fn parse_adjust(token: &str) -> Result<LineAdjust, MarkerSyntaxError> {
    let invalid = || MarkerSyntaxError::InvalidLineAdjustment(format!("@{token}"));
    if let Some(n) = token.strip_prefix('+') {
        let n: u32 = n.parse().map_err(|_| invalid())?;
        Ok(LineAdjust::Relative(i64::from(n)))
    } else if let Some(n) = token.strip_prefix('-') {
        let n: u32 = n.parse().map_err(|_| invalid())?;
        Ok(LineAdjust::Relative(-i64::from(n)))
    } else {
        token.parse().map(LineAdjust::Absolute).map_err(|_| invalid())
    }
}

/// Upper bound on one marker's occurrence count.
const MAX_COUNT: u32 = 10_000;

fn parse_count(token: &str) -> Result<u32, MarkerSyntaxError> {
    match token.parse::<u32>() {
        Ok(n) if (1..=MAX_COUNT).contains(&n) => Ok(n),
        _ => Err(MarkerSyntaxError::InvalidCount(token.to_string())),
    }
}

/// `// Noncompliant[@adj] [rule-id] [count] [{{message}}...]`
#[derive(Clone, Copy, Debug, Default)]
pub struct NoncompliantDialect;

impl NoncompliantDialect {
    const KEYWORD: &'static str = "Noncompliant";
}

impl MarkerDialect for NoncompliantDialect {
    fn name(&self) -> &'static str {
        "noncompliant"
    }

    fn extract_markers(&self, line_text: &str) -> Result<Vec<Marker>, MarkerSyntaxError> {
        let Some(mut rest) = comment_body(line_text, Self::KEYWORD) else {
            return Ok(Vec::new());
        };

        let mut line_adjust = LineAdjust::Same;
        if let Some(after_at) = rest.strip_prefix('@') {
            let end = after_at
                .find(|c: char| c.is_whitespace() || c == '{')
                .unwrap_or(after_at.len());
            line_adjust = parse_adjust(&after_at[..end])?;
            rest = &after_at[end..];
        }

        let (head, tail) = match rest.find("{{") {
            Some(i) => (&rest[..i], &rest[i..]),
            None => (rest, ""),
        };

        let mut rule: Option<String> = None;
        let mut count: Option<u32> = None;
        for token in head.split_whitespace() {
            if token.starts_with(|c: char| c.is_ascii_digit()) {
                count = Some(parse_count(token)?);
            } else if is_valid_rule_id(token) {
                if let Some(prev) = &rule {
                    return Err(MarkerSyntaxError::MultipleRuleIds(
                        prev.clone(),
                        token.to_string(),
                    ));
                }
                rule = Some(token.to_string());
            } else {
                return Err(MarkerSyntaxError::InvalidRuleId(token.to_string()));
            }
        }

        let mut messages = Vec::new();
        let mut tail = tail.trim_start();
        while !tail.is_empty() {
            let Some(open) = tail.strip_prefix("{{") else {
                return Err(MarkerSyntaxError::TrailingText(tail.to_string()));
            };
            let Some(close) = open.find("}}") else {
                return Err(MarkerSyntaxError::UnterminatedMessage);
            };
            messages.push(open[..close].trim().to_string());
            tail = open[close + 2..].trim_start();
        }

        Ok(vec![Marker::new(rule, count, messages, line_adjust)?])
    }
}

/// `// issue: S1438 x2 "message"; S100` (one or more `;`-separated entries).
#[derive(Clone, Copy, Debug, Default)]
pub struct IssueDialect;

impl IssueDialect {
    const KEYWORD: &'static str = "issue";

    fn parse_entry(entry: &str) -> Result<Marker, MarkerSyntaxError> {
        let (head, message) = match entry.find('"') {
            Some(i) => {
                let quoted = &entry[i + 1..];
                let Some(end) = quoted.find('"') else {
                    return Err(MarkerSyntaxError::UnterminatedMessage);
                };
                let trailing = quoted[end + 1..].trim();
                if !trailing.is_empty() {
                    return Err(MarkerSyntaxError::TrailingText(trailing.to_string()));
                }
                (&entry[..i], Some(quoted[..end].trim().to_string()))
            }
            None => (entry, None),
        };

        let mut rule: Option<String> = None;
        let mut count = None;
        let mut line_adjust = LineAdjust::Same;
        for token in head.split_whitespace() {
            if let Some(n) = token.strip_prefix('x')
                && n.starts_with(|c: char| c.is_ascii_digit())
            {
                count = Some(parse_count(n)?);
                continue;
            }
            if let Some(adj) = token.strip_prefix('@') {
                line_adjust = parse_adjust(adj)?;
            } else if is_valid_rule_id(token) {
                if let Some(prev) = &rule {
                    return Err(MarkerSyntaxError::MultipleRuleIds(
                        prev.clone(),
                        token.to_string(),
                    ));
                }
                rule = Some(token.to_string());
            } else {
                return Err(MarkerSyntaxError::InvalidRuleId(token.to_string()));
            }
        }

        Marker::new(rule, count, message.into_iter().collect(), line_adjust)
    }
}

impl MarkerDialect for IssueDialect {
    fn name(&self) -> &'static str {
        "issue"
    }

    fn extract_markers(&self, line_text: &str) -> Result<Vec<Marker>, MarkerSyntaxError> {
        let Some(rest) = comment_body(line_text, Self::KEYWORD) else {
            return Ok(Vec::new());
        };
        let Some(rest) = rest.strip_prefix(':') else {
            return Ok(Vec::new());
        };
        split_entries(rest)
            .into_iter()
            .filter(|e| !e.trim().is_empty())
            .map(Self::parse_entry)
            .collect()
    }
}

/// Split on `;` outside double-quoted messages.
fn split_entries(text: &str) -> Vec<&str> {
    let mut entries = Vec::new();
    let mut start = 0;
    let mut quoted = false;
    for (i, c) in text.char_indices() {
        match c {
            '"' => quoted = !quoted,
            ';' if !quoted => {
                entries.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    entries.push(&text[start..]);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one(line: &str) -> Marker {
        let mut markers = NoncompliantDialect.extract_markers(line).expect("parse");
        assert_eq!(markers.len(), 1, "expected one marker in {line:?}");
        markers.remove(0)
    }

    #[test]
    fn plain_lines_have_no_markers() {
        for line in [
            "",
            "let x = 1;",
            "const s = 'Noncompliant';",
            "// a comment mentioning noncompliant code",
            "// NoncompliantFoo",
        ] {
            assert!(NoncompliantDialect.extract_markers(line).unwrap().is_empty());
        }
    }

    #[test]
    fn bare_marker_defaults_to_one_slot() {
        let m = one("foo() // Noncompliant");
        assert_eq!(m.rule, None);
        assert_eq!(m.count, 1);
        assert!(m.messages.is_empty());
        assert_eq!(m.line_adjust, LineAdjust::Same);
    }

    #[test]
    fn rule_count_and_message() {
        let m = one("x = 1 // Noncompliant typescript:S1438 2 {{Add a semicolon.}}");
        assert_eq!(m.rule.as_deref(), Some("typescript:S1438"));
        assert_eq!(m.count, 2);
        assert_eq!(m.messages, vec!["Add a semicolon.".to_string()]);
    }

    #[test]
    fn several_messages_set_the_count() {
        let m = one("a(); b(); // Noncompliant S100 {{first}} {{second}}");
        assert_eq!(m.count, 2);
        assert_eq!(m.messages, vec!["first".to_string(), "second".to_string()]);
    }

    #[test]
    fn line_adjustments() {
        assert_eq!(one("// Noncompliant@+1").line_adjust, LineAdjust::Relative(1));
        assert_eq!(one("// Noncompliant@-2 S1").line_adjust, LineAdjust::Relative(-2));
        assert_eq!(one("// Noncompliant@0 S104").line_adjust, LineAdjust::Absolute(0));
        assert_eq!(LineAdjust::Relative(-2).resolve(2), None);
        assert_eq!(LineAdjust::Relative(-1).resolve(2), Some(1));
    }

    #[test]
    fn block_and_hash_comments() {
        assert_eq!(one("x /* Noncompliant S1 */").rule.as_deref(), Some("S1"));
        assert_eq!(one("x = 1  # Noncompliant S2").rule.as_deref(), Some("S2"));
        assert_eq!(one("<a/> <!-- Noncompliant S3 -->").rule.as_deref(), Some("S3"));
    }

    #[test]
    fn malformed_markers_are_errors() {
        let cases = [
            ("// Noncompliant 2x", MarkerSyntaxError::InvalidCount("2x".to_string())),
            ("// Noncompliant 0", MarkerSyntaxError::InvalidCount("0".to_string())),
            ("// Noncompliant S1$4", MarkerSyntaxError::InvalidRuleId("S1$4".to_string())),
            ("// Noncompliant {{open", MarkerSyntaxError::UnterminatedMessage),
            (
                "// Noncompliant S1 S2",
                MarkerSyntaxError::MultipleRuleIds("S1".to_string(), "S2".to_string()),
            ),
            (
                "// Noncompliant 3 {{a}} {{b}}",
                MarkerSyntaxError::CountMessageMismatch {
                    count: 3,
                    messages: 2,
                },
            ),
            (
                "// Noncompliant@x",
                MarkerSyntaxError::InvalidLineAdjustment("@x".to_string()),
            ),
            (
                "// Noncompliant {{a}} oops",
                MarkerSyntaxError::TrailingText("oops".to_string()),
            ),
        ];
        for (line, expected) in cases {
            assert_eq!(
                NoncompliantDialect.extract_markers(line),
                Err(expected),
                "line: {line}"
            );
        }
    }

    #[test]
    fn rule_id_format() {
        assert!(is_valid_rule_id("S1438"));
        assert!(is_valid_rule_id("typescript:S1438"));
        assert!(is_valid_rule_id("no-unused-vars"));
        assert!(!is_valid_rule_id("1438"));
        assert!(!is_valid_rule_id("a:b:c"));
        assert!(!is_valid_rule_id(":S1"));
        assert!(!is_valid_rule_id(""));
    }

    #[test]
    fn normalize_rule_strips_repository() {
        assert_eq!(normalize_rule("typescript:S1438", true), "S1438");
        assert_eq!(normalize_rule("typescript:S1438", false), "typescript:S1438");
        assert_eq!(normalize_rule(" S1 ", true), "S1");
    }

    #[test]
    fn issue_dialect_entries() {
        let markers = IssueDialect
            .extract_markers(r#"x = 1 // issue: S1438 x2 "Add a semicolon."; S100 @+1"#)
            .expect("parse");
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].rule.as_deref(), Some("S1438"));
        assert_eq!(markers[0].count, 2);
        assert_eq!(markers[0].messages, vec!["Add a semicolon.".to_string()]);
        assert_eq!(markers[1].rule.as_deref(), Some("S100"));
        assert_eq!(markers[1].line_adjust, LineAdjust::Relative(1));

        assert!(IssueDialect.extract_markers("// issues remain").unwrap().is_empty());
        assert!(IssueDialect.extract_markers("// Noncompliant S1").unwrap().is_empty());
        assert_eq!(
            IssueDialect.extract_markers("// issue: S1 x0"),
            Err(MarkerSyntaxError::InvalidCount("0".to_string()))
        );
    }

    #[test]
    fn issue_dialect_keeps_semicolons_inside_messages() {
        let markers = IssueDialect
            .extract_markers(r#"x // issue: S1 "Add a ; here"; S2 "a;b;c""#)
            .expect("parse");
        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].rule.as_deref(), Some("S1"));
        assert_eq!(markers[0].messages, vec!["Add a ; here".to_string()]);
        assert_eq!(markers[1].messages, vec!["a;b;c".to_string()]);

        assert_eq!(
            IssueDialect.extract_markers(r#"// issue: S1 "open; S2"#),
            Err(MarkerSyntaxError::UnterminatedMessage)
        );
    }
}
