use std::collections::HashSet;

use thiserror::Error;

use crate::congroup::{
    CongroupMetric,
    CongroupUid,
    ContainerGroup,
};

// A single difference between an expected and an actual container group.
//
// The uid kind and id are compared as Options: an absent value only matches another absent value,
// and in particular is *not* equal to a present-but-empty string.  Tags, metrics and parents are
// compared as sets, so ordering never matters.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum CongroupMismatch {
    #[error("uid kind: expected {expected:?}, got {actual:?}")]
    UidKind { expected: Option<String>, actual: Option<String> },

    #[error("uid id: expected {expected:?}, got {actual:?}")]
    UidId { expected: Option<String>, actual: Option<String> },

    #[error("tag {key}: expected {expected:?}, got {actual:?}")]
    Tag {
        key: String,
        expected: Option<String>,
        actual: Option<String>,
    },

    #[error("metric {} = {} expected but not found", .0.name, .0.value)]
    MissingMetric(CongroupMetric),

    #[error("metric {} = {} found but not expected", .0.name, .0.value)]
    ExtraMetric(CongroupMetric),

    #[error("parent {0} expected but not found")]
    MissingParent(CongroupUid),

    #[error("parent {0} found but not expected")]
    ExtraParent(CongroupUid),
}

pub fn diff_congroups(expected: &ContainerGroup, actual: &ContainerGroup) -> Vec<CongroupMismatch> {
    let mut mismatches = vec![];

    if expected.uid.kind != actual.uid.kind {
        mismatches.push(CongroupMismatch::UidKind {
            expected: expected.uid.kind.clone(),
            actual: actual.uid.kind.clone(),
        });
    }
    if expected.uid.id != actual.uid.id {
        mismatches.push(CongroupMismatch::UidId {
            expected: expected.uid.id.clone(),
            actual: actual.uid.id.clone(),
        });
    }

    let keys: HashSet<_> = expected.tags.keys().chain(actual.tags.keys()).collect();
    let mut tag_mismatches: Vec<_> = keys
        .into_iter()
        .filter_map(|key| {
            let (e, a) = (expected.tags.get(key), actual.tags.get(key));
            (e != a).then(|| CongroupMismatch::Tag { key: key.clone(), expected: e.cloned(), actual: a.cloned() })
        })
        .collect();
    tag_mismatches.sort_by(|m1, m2| m1.to_string().cmp(&m2.to_string()));
    mismatches.extend(tag_mismatches);

    let (exp_metrics, act_metrics): (HashSet<_>, HashSet<_>) =
        (expected.metrics.iter().collect(), actual.metrics.iter().collect());
    mismatches.extend(exp_metrics.difference(&act_metrics).map(|m| CongroupMismatch::MissingMetric((*m).clone())));
    mismatches.extend(act_metrics.difference(&exp_metrics).map(|m| CongroupMismatch::ExtraMetric((*m).clone())));

    let (exp_parents, act_parents): (HashSet<_>, HashSet<_>) =
        (expected.parents.iter().collect(), actual.parents.iter().collect());
    mismatches.extend(exp_parents.difference(&act_parents).map(|p| CongroupMismatch::MissingParent((*p).clone())));
    mismatches.extend(act_parents.difference(&exp_parents).map(|p| CongroupMismatch::ExtraParent((*p).clone())));

    mismatches
}

pub fn congroups_equal(expected: &ContainerGroup, actual: &ContainerGroup) -> bool {
    diff_congroups(expected, actual).is_empty()
}

// Panics with every mismatch, plus both objects as JSON, if the container groups differ
#[track_caller]
pub fn assert_congroups_eq(expected: &ContainerGroup, actual: &ContainerGroup) {
    let mismatches = diff_congroups(expected, actual);
    if mismatches.is_empty() {
        return;
    }

    let details: Vec<_> = mismatches.iter().map(|m| format!("  - {m}")).collect();
    panic!(
        "container groups differ:\n{}\n\nExpected: {}\n\nActual: {}",
        details.join("\n"),
        serde_json::to_string(expected).unwrap_or_default(),
        serde_json::to_string(actual).unwrap_or_default(),
    );
}
