use std::collections::BTreeMap;
use std::fmt;

use kc_core::prelude::*;
use serde::{
    Deserialize,
    Serialize,
};

// The kind and id are optional on the wire, and the comparator has to distinguish "absent" from
// "present but empty", so we keep them as Options here instead of collapsing to empty strings.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct CongroupUid {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl CongroupUid {
    pub fn new(kind: ResourceKind, id: impl Into<String>) -> CongroupUid {
        CongroupUid {
            kind: Some(kind.taxonomy().into()),
            id: Some(id.into()),
        }
    }
}

impl fmt::Display for CongroupUid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.kind.as_deref().unwrap_or("<none>"), self.id.as_deref().unwrap_or("<none>"))
    }
}

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct CongroupMetric {
    pub name: String,
    pub value: i64,
}

// ContainerGroup is the monitoring entity produced for every observed Kubernetes object.  Parent
// links only point "up"; nothing is ever recorded on the parent, so a parent/child edge is
// recomputed from scratch every time the child is converted.
// Metrics and parents are unordered sets; compare with `compare::congroups_equal`.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ContainerGroup {
    pub uid: CongroupUid,
    pub tags: BTreeMap<String, String>,
    pub metrics: Vec<CongroupMetric>,
    pub parents: Vec<CongroupUid>,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum CongroupEventType {
    Added,
    Updated,
    Removed,
}

impl CongroupEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CongroupEventType::Added => "added",
            CongroupEventType::Updated => "updated",
            CongroupEventType::Removed => "removed",
        }
    }
}

// One of these is sent to the export pipeline for every conversion
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CongroupUpdate {
    pub event_type: CongroupEventType,
    pub congroup: ContainerGroup,
}
