//! Expected-issue extraction from fixture text.

use crate::error::ConformanceError;
use crate::marker::{Marker, MarkerDialect, is_valid_rule_id, normalize_rule};
use crate::model::ExpectedIssue;
use ruleconf_types::CorpusPath;
use std::collections::{BTreeSet, VecDeque};

/// Decodes marker comments of one dialect into [`ExpectedIssue`]s.
///
/// Parsing is line-oriented and stateless across files; the same text always yields the
/// same sequence.
pub struct ExpectedIssueParser<'d> {
    dialect: &'d dyn MarkerDialect,
    strip_repository: bool,
}

impl<'d> ExpectedIssueParser<'d> {
    pub fn new(dialect: &'d dyn MarkerDialect, strip_repository: bool) -> Self {
        Self {
            dialect,
            strip_repository,
        }
    }

    /// Lazily walk `text`, yielding one item per marker. Stops after the first error.
    pub fn markers<'a>(&'a self, path: &'a CorpusPath, text: &'a str) -> ExpectedIssues<'a>
    where
        'd: 'a,
    {
        ExpectedIssues {
            dialect: self.dialect,
            strip_repository: self.strip_repository,
            path,
            default_rule: path
                .file_stem()
                .filter(|stem| is_valid_rule_id(stem))
                .map(str::to_string),
            lines: text.lines().enumerate(),
            pending: VecDeque::new(),
            failed: false,
        }
    }

    /// Collect all markers of a file, rejecting two markers on the same line and rule.
    pub fn parse(
        &self,
        path: &CorpusPath,
        text: &str,
    ) -> Result<Vec<ExpectedIssue>, ConformanceError> {
        let mut seen: BTreeSet<(u32, String)> = BTreeSet::new();
        let mut out = Vec::new();
        for issue in self.markers(path, text) {
            let issue = issue?;
            if !seen.insert((issue.line, issue.rule.clone())) {
                return Err(ConformanceError::MalformedMarker {
                    path: path.clone(),
                    line: issue.line,
                    reason: format!(
                        "duplicate marker for rule {} on line {}",
                        issue.rule, issue.line
                    ),
                });
            }
            out.push(issue);
        }
        Ok(out)
    }
}

/// Iterator returned by [`ExpectedIssueParser::markers`].
pub struct ExpectedIssues<'a> {
    dialect: &'a dyn MarkerDialect,
    strip_repository: bool,
    path: &'a CorpusPath,
    default_rule: Option<String>,
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    pending: VecDeque<ExpectedIssue>,
    failed: bool,
}

impl ExpectedIssues<'_> {
    fn malformed(&mut self, line: u32, reason: String) -> ConformanceError {
        self.failed = true;
        ConformanceError::MalformedMarker {
            path: self.path.clone(),
            line,
            reason,
        }
    }

    fn resolve(&mut self, line_no: u32, marker: Marker) -> Result<ExpectedIssue, ConformanceError> {
        let rule = match marker.rule.or_else(|| self.default_rule.clone()) {
            Some(rule) => normalize_rule(&rule, self.strip_repository),
            None => {
                return Err(self.malformed(
                    line_no,
                    "missing rule id (and the file name is not a rule key)".to_string(),
                ));
            }
        };
        let Some(line) = marker.line_adjust.resolve(line_no) else {
            return Err(self.malformed(
                line_no,
                "line adjustment points before line 1".to_string(),
            ));
        };
        Ok(ExpectedIssue {
            path: self.path.clone(),
            line,
            rule,
            count: marker.count,
            messages: marker.messages,
        })
    }
}

impl Iterator for ExpectedIssues<'_> {
    type Item = Result<ExpectedIssue, ConformanceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.failed {
                return None;
            }
            if let Some(issue) = self.pending.pop_front() {
                return Some(Ok(issue));
            }
            let (idx, text) = self.lines.next()?;
            let line_no = idx as u32 + 1;
            match self.dialect.extract_markers(text) {
                Ok(markers) => {
                    for marker in markers {
                        match self.resolve(line_no, marker) {
                            Ok(issue) => self.pending.push_back(issue),
                            Err(err) => return Some(Err(err)),
                        }
                    }
                }
                Err(err) => return Some(Err(self.malformed(line_no, err.to_string()))),
            }
        }
    }
}
