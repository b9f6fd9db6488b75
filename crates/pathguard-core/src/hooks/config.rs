use std::fmt;

use crate::path::{ends_with_separator, strip_trailing_separator};
use crate::{Error, Result};

/// Root of the project the built-in allowlist protects.
pub const PROJECT_ROOT: &str = "/Users/jstar/ComputerScience/EduProj/ClassIntroToAI/Proj-2";

/// Entries of the built-in allowlist relative to [`PROJECT_ROOT`], in match order.
pub const BUILTIN_ALLOW_LIST: &[&str] = &[
    "src/stud/g06/",
    "src/AITester.java",
    ".claude/",
    ".gitignore",
    "CLAUDE_RULES.md",
];

/// One allowlist entry. The kind is decided by whether the entry text ends
/// with a path separator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowPattern {
    /// A directory: matches any path starting with it, and the directory
    /// itself written without the trailing separator.
    Prefix(String),
    /// A single file: matches that path, or that path plus one trailing separator.
    Exact(String),
}

impl AllowPattern {
    /// Classify an entry. Does not reject empty entries; [`AllowList::new`] does.
    pub fn new(entry: impl Into<String>) -> Self {
        let entry = entry.into();
        if ends_with_separator(&entry) {
            AllowPattern::Prefix(entry)
        } else {
            AllowPattern::Exact(entry)
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            AllowPattern::Prefix(s) | AllowPattern::Exact(s) => s,
        }
    }

    /// Case-sensitive string comparison. No normalization of `.`, `..` or symlinks.
    pub fn matches(&self, path: &str) -> bool {
        match self {
            AllowPattern::Prefix(prefix) => {
                path.starts_with(prefix.as_str())
                    || strip_trailing_separator(prefix)
                        .is_some_and(|dir| !dir.is_empty() && path == dir)
            }
            AllowPattern::Exact(exact) => {
                path == exact || strip_trailing_separator(path) == Some(exact.as_str())
            }
        }
    }
}

impl fmt::Display for AllowPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllowPattern::Prefix(prefix) => write!(f, "{prefix}**"),
            AllowPattern::Exact(exact) => f.write_str(exact),
        }
    }
}

/// Ordered allowlist. First match wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowList {
    patterns: Vec<AllowPattern>,
}

impl AllowList {
    /// Build an allowlist from entry strings. Empty entries are rejected so
    /// that a missing path can never be allowed.
    pub fn new<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                let entry = entry.into();
                if entry.is_empty() {
                    Err(Error::EmptyPattern { index })
                } else {
                    Ok(AllowPattern::new(entry))
                }
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// The allowlist compiled into the hook, anchored at [`PROJECT_ROOT`].
    pub fn builtin() -> Self {
        Self {
            patterns: BUILTIN_ALLOW_LIST
                .iter()
                .map(|rel| AllowPattern::new(format!("{PROJECT_ROOT}/{rel}")))
                .collect(),
        }
    }

    pub fn patterns(&self) -> &[AllowPattern] {
        &self.patterns
    }

    pub fn first_match(&self, path: &str) -> Option<&AllowPattern> {
        self.patterns.iter().find(|pattern| pattern.matches(path))
    }

    /// The "what is allowed" line shown when a write is blocked.
    pub fn hint(&self) -> String {
        if self.patterns.is_empty() {
            return "Allowed: (nothing)".to_string();
        }
        let listed: Vec<String> = self.patterns.iter().map(ToString::to_string).collect();
        format!("Allowed: {}", listed.join(", "))
    }
}

/// What to do with input that cannot be parsed as a hook request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedInput {
    /// Nothing to validate, so allow.
    #[default]
    FailOpen,
    /// Block, naming the parse failure.
    FailClosed,
}

/// Everything a [`PathGuard`](super::PathGuard) decides with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardConfig {
    pub allow_list: AllowList,
    pub on_malformed: MalformedInput,
}

impl GuardConfig {
    pub fn new(allow_list: AllowList) -> Self {
        Self {
            allow_list,
            on_malformed: MalformedInput::default(),
        }
    }

    pub fn builtin() -> Self {
        Self::new(AllowList::builtin())
    }

    pub fn with_malformed_input(mut self, policy: MalformedInput) -> Self {
        self.on_malformed = policy;
        self
    }
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn entries_are_classified_by_trailing_separator() {
        assert_eq!(
            AllowPattern::new("/a/b/"),
            AllowPattern::Prefix("/a/b/".to_string())
        );
        assert_eq!(
            AllowPattern::new("/a/AITester.java"),
            AllowPattern::Exact("/a/AITester.java".to_string())
        );
    }

    #[rstest]
    #[case("/a/b/c.txt", true)]
    #[case("/a/b/", true)]
    #[case("/a/b/deep/nested/d.rs", true)]
    #[case("/a/b", true)]
    #[case("/a/bc/d.txt", false)]
    #[case("/a/B/c.txt", false)]
    #[case("/a/", false)]
    #[case("", false)]
    fn prefix_pattern(#[case] path: &str, #[case] allowed: bool) {
        assert_eq!(AllowPattern::new("/a/b/").matches(path), allowed, "{path}");
    }

    #[test]
    fn prefix_does_not_normalize_dot_dot() {
        // Literal prefix check; traversal out of the directory still matches.
        assert!(AllowPattern::new("/a/b/").matches("/a/b/../../etc/passwd"));
        assert!(!AllowPattern::new("/a/b/").matches("/a/./b/c.txt"));
    }

    #[rstest]
    #[case("/a/AITester.java", true)]
    #[case("/a/AITester.java/", true)]
    #[case("/a/AITester.java//", false)]
    #[case("/a/AITester.java2", false)]
    #[case("/a/aitester.java", false)]
    #[case("/a/AITester.jav", false)]
    #[case("/a/AITester.java/x", false)]
    fn exact_pattern(#[case] path: &str, #[case] allowed: bool) {
        assert_eq!(
            AllowPattern::new("/a/AITester.java").matches(path),
            allowed,
            "{path}"
        );
    }

    #[test]
    fn root_prefix_does_not_match_empty_path() {
        let root = AllowPattern::new("/");
        assert!(root.matches("/anything"));
        assert!(!root.matches(""));
    }

    #[test]
    fn new_rejects_empty_entries() {
        let err = AllowList::new(["/a/", ""]).expect_err("empty entry should be rejected");
        assert!(matches!(err, Error::EmptyPattern { index: 1 }));
    }

    #[test]
    fn first_match_respects_order() {
        let list = AllowList::new(["/a/", "/a/b/"]).expect("valid allowlist");
        assert_eq!(
            list.first_match("/a/b/c"),
            Some(&AllowPattern::Prefix("/a/".to_string()))
        );
        assert_eq!(list.first_match("/z"), None);
    }

    #[test]
    fn hint_lists_every_entry() {
        let list = AllowList::new(["/repo/src/pkg/", "/repo/src/AITester.java"])
            .expect("valid allowlist");
        insta::assert_snapshot!(list.hint(), @"Allowed: /repo/src/pkg/**, /repo/src/AITester.java");
    }

    #[test]
    fn hint_for_empty_list() {
        let list = AllowList::new(Vec::<String>::new()).expect("valid allowlist");
        assert_eq!(list.hint(), "Allowed: (nothing)");
    }

    #[test]
    fn builtin_list_covers_project_files() {
        let list = AllowList::builtin();
        let allows = |rel: &str| list.first_match(&format!("{PROJECT_ROOT}/{rel}")).is_some();
        assert_eq!(list.patterns().len(), BUILTIN_ALLOW_LIST.len());
        assert!(allows("src/stud/g06/AI.java"));
        assert!(allows("src/AITester.java"));
        assert!(allows(".claude/hooks/validate-paths.py"));
        assert!(!allows("src/stud/g07/AI.java"));
        assert!(list.first_match("").is_none());
    }

    #[test]
    fn builtin_entries_are_anchored_at_project_root() {
        let list = AllowList::builtin();
        for (pattern, rel) in list.patterns().iter().zip(BUILTIN_ALLOW_LIST) {
            assert_eq!(pattern.as_str(), format!("{PROJECT_ROOT}/{rel}"));
        }
        assert_eq!(
            list.patterns()[0],
            AllowPattern::Prefix(format!("{PROJECT_ROOT}/src/stud/g06/"))
        );
        assert_eq!(
            list.patterns()[1],
            AllowPattern::Exact(format!("{PROJECT_ROOT}/src/AITester.java"))
        );
    }

    #[test]
    fn default_config_is_builtin_and_fails_open() {
        let config = GuardConfig::default();
        assert_eq!(config.allow_list, AllowList::builtin());
        assert_eq!(config.on_malformed, MalformedInput::FailOpen);
        let strict = config.with_malformed_input(MalformedInput::FailClosed);
        assert_eq!(strict.on_malformed, MalformedInput::FailClosed);
    }
}
