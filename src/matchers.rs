//! Selection of installed content by name or namespace.
//!
//! A [`MatchFilter`] is a pure predicate over [`ContentId`]s. `list` uses
//! [`MatchFilter::MatchAll`] with no arguments and
//! [`MatchFilter::MatchNamespacesOrLabels`] otherwise; `remove` uses
//! [`MatchFilter::MatchLabels`].

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Identifier of one installed content item.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ContentId {
    pub namespace: String,
    pub name: String,
}

impl ContentId {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// The short label, which is the content name.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.name
    }

    fn label_matches(&self, term: &str) -> bool {
        term == self.label()
            || term
                .split_once('.')
                .is_some_and(|(ns, name)| ns == self.namespace && name == self.name)
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.name)
    }
}

/// Selection strategy over installed content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchFilter {
    /// Every candidate
    MatchAll,
    /// Candidates whose label (or `namespace.name`) equals one of the terms
    MatchLabels(BTreeSet<String>),
    /// Candidates whose namespace or label equals one of the terms
    MatchNamespacesOrLabels(BTreeSet<String>),
}

impl MatchFilter {
    pub fn labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::MatchLabels(labels.into_iter().map(Into::into).collect())
    }

    pub fn namespaces_or_labels<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::MatchNamespacesOrLabels(terms.into_iter().map(Into::into).collect())
    }

    /// Filter for `list`: everything without arguments, namespace-or-label otherwise.
    #[must_use]
    pub fn for_list(args: &[String]) -> Self {
        if args.is_empty() {
            Self::MatchAll
        } else {
            Self::namespaces_or_labels(args.iter().cloned())
        }
    }

    /// Whether `candidate` is selected.
    #[must_use]
    pub fn matches(&self, candidate: &ContentId) -> bool {
        match self {
            Self::MatchAll => true,
            Self::MatchLabels(labels) => labels.iter().any(|l| candidate.label_matches(l)),
            Self::MatchNamespacesOrLabels(terms) => terms
                .iter()
                .any(|t| *t == candidate.namespace || candidate.label_matches(t)),
        }
    }

    /// The set of selected candidates. The input is left untouched.
    pub fn select<'a, I>(&self, candidates: I) -> BTreeSet<ContentId>
    where
        I: IntoIterator<Item = &'a ContentId>,
    {
        candidates.into_iter().filter(|c| self.matches(c)).cloned().collect()
    }

    /// Terms that selected nothing in `candidates`; empty for [`MatchFilter::MatchAll`].
    pub fn unmatched_terms<'a, I>(&self, candidates: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a ContentId> + Clone,
    {
        let terms = match self {
            Self::MatchAll => return Vec::new(),
            Self::MatchLabels(terms) | Self::MatchNamespacesOrLabels(terms) => terms,
        };

        terms
            .iter()
            .filter(|term| {
                let single = match self {
                    Self::MatchLabels(_) => Self::labels([term.as_str()]),
                    _ => Self::namespaces_or_labels([term.as_str()]),
                };
                !candidates.clone().into_iter().any(|c| single.matches(c))
            })
            .cloned()
            .collect()
    }
}
