//! Per-file matching of expected slots against reported issues.

use crate::model::{ActualIssue, DiffEntry, ExpectedIssue, IssueKey};
use crate::policy::MessageMode;
use globset::{Glob, GlobMatcher};
use ruleconf_types::CorpusPath;
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pass {
    /// Expected message equals the reported one.
    Equal,
    /// Expected message matches under the configured mode.
    Mode,
    /// Expected slot carries no message.
    Any,
}

struct ExpectedSlot<'a> {
    ordinal: u32,
    message: Option<&'a str>,
    /// Compiled `message` in pattern mode. `None` for an invalid glob, which then compares
    /// literally.
    pattern: Option<GlobMatcher>,
}

#[derive(Default)]
struct Group<'a> {
    expected: Vec<ExpectedSlot<'a>>,
    actual: Vec<&'a ActualIssue>,
}

/// Computes the [`DiffEntry`] set for one file.
#[derive(Clone, Copy, Debug)]
pub struct IssueComparator {
    mode: MessageMode,
}

impl IssueComparator {
    pub fn new(mode: MessageMode) -> Self {
        Self { mode }
    }

    pub fn compare_file(
        &self,
        path: &CorpusPath,
        expected: &[ExpectedIssue],
        actual: &[ActualIssue],
    ) -> Vec<DiffEntry> {
        let mut groups: BTreeMap<(u32, &str), Group<'_>> = BTreeMap::new();
        for issue in expected {
            let group = groups.entry((issue.line, issue.rule.as_str())).or_default();
            for ordinal in 0..issue.count {
                let message = issue.message_for(ordinal);
                group.expected.push(ExpectedSlot {
                    ordinal,
                    message,
                    pattern: self.compile_pattern(message),
                });
            }
        }
        for issue in actual {
            groups
                .entry((issue.line, issue.rule.as_str()))
                .or_default()
                .actual
                .push(issue);
        }

        let mut out = Vec::new();
        for ((line, rule), mut group) in groups {
            group.actual.sort_by(|a, b| a.message.cmp(&b.message));
            self.compare_group(path, line, rule, &group, &mut out);
        }
        out
    }

    fn compare_group(
        &self,
        path: &CorpusPath,
        line: u32,
        rule: &str,
        group: &Group<'_>,
        out: &mut Vec<DiffEntry>,
    ) {
        let key = |ordinal: u32| IssueKey {
            path: path.clone(),
            line,
            rule: rule.to_string(),
            ordinal,
        };

        let mut used = vec![false; group.actual.len()];
        let mut open: Vec<&ExpectedSlot<'_>> = group.expected.iter().collect();
        for pass in [Pass::Equal, Pass::Mode, Pass::Any] {
            let mut still_open = Vec::new();
            for slot in open {
                let hit = group.actual.iter().enumerate().position(|(j, a)| {
                    !used[j] && self.slot_matches(pass, slot, &a.message)
                });
                match hit {
                    Some(j) => used[j] = true,
                    None => still_open.push(slot),
                }
            }
            open = still_open;
        }

        let mut leftover: Vec<(u32, &ActualIssue)> = group
            .actual
            .iter()
            .enumerate()
            .filter(|(j, _)| !used[*j])
            .map(|(j, a)| (j as u32, *a))
            .collect();

        if self.mode.compares_messages() {
            let pairs = open.len().min(leftover.len());
            for (slot, (_, actual)) in open.drain(..pairs).zip(leftover.drain(..pairs)) {
                out.push(DiffEntry::Mismatched {
                    key: key(slot.ordinal),
                    expected_message: slot.message.unwrap_or_default().to_string(),
                    actual_message: actual.message.clone(),
                });
            }
        }

        for slot in open {
            out.push(DiffEntry::Missing {
                key: key(slot.ordinal),
                expected_message: slot.message.map(str::to_string),
            });
        }
        for (ordinal, actual) in leftover {
            out.push(DiffEntry::Unexpected {
                key: key(ordinal),
                actual_message: actual.message.clone(),
            });
        }
    }

    fn compile_pattern(&self, message: Option<&str>) -> Option<GlobMatcher> {
        if self.mode != MessageMode::Pattern {
            return None;
        }
        Glob::new(message?).ok().map(|glob| glob.compile_matcher())
    }

    fn slot_matches(&self, pass: Pass, slot: &ExpectedSlot<'_>, actual: &str) -> bool {
        if !self.mode.compares_messages() {
            return true;
        }
        match (pass, slot.message) {
            (Pass::Equal, Some(m)) => m == actual,
            (Pass::Mode, Some(m)) => self.message_matches(m, slot.pattern.as_ref(), actual),
            (Pass::Any, None) => true,
            _ => false,
        }
    }

    fn message_matches(&self, expected: &str, pattern: Option<&GlobMatcher>, actual: &str) -> bool {
        match self.mode {
            MessageMode::Ignore => true,
            MessageMode::Exact => expected == actual,
            MessageMode::Contains => actual.contains(expected),
            MessageMode::Pattern => match pattern {
                Some(matcher) => matcher.is_match(actual),
                None => expected == actual,
            },
        }
    }
}
