use kc_core::prelude::*;

use super::*;

pub(super) static NAMESPACE_TABLE: KindTable<corev1::Namespace> = KindTable {
    kind: ResourceKind::Namespace,
    tags: &[TagField { key: "status.phase", extract: phase }],
    metrics: &[],
    parents: &[],
};

fn phase(ns: &corev1::Namespace) -> Option<String> {
    ns.status.as_ref()?.phase.clone()
}
