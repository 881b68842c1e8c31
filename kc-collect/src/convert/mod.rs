mod namespace;
mod pvc;

use std::fmt::Debug;

use kc_core::prelude::*;
use kube::Resource;
use metrics::counter;
use serde::de::DeserializeOwned;
use tracing::*;

use crate::cache::ObjectCache;
use crate::codec::{
    append_metric,
    field_key,
    labels_to_tags,
    name_key,
    quantity_to_i64,
};
use crate::congroup::{
    CongroupUid,
    ContainerGroup,
};
use crate::context::CollectorContext;
use crate::resolver::{
    ParentEdge,
    resolve_parents,
};

pub type TagExtractor<K> = fn(&K) -> Option<String>;
pub type QuantityExtractor<K> = fn(&K) -> Option<&Quantity>;

// Emitted as "kubernetes.<kind>.<key>" when the extractor returns a value
pub struct TagField<K> {
    pub key: &'static str,
    pub extract: TagExtractor<K>,
}

// Emitted as metric "kubernetes.<kind>.<name>", with the quantity normalized to base units
pub struct MetricField<K> {
    pub name: &'static str,
    pub extract: QuantityExtractor<K>,
}

// Everything that makes one kind's container groups different from another's lives in one of
// these tables; the conversion pipeline below is shared by all kinds.
pub struct KindTable<K: 'static> {
    pub kind: ResourceKind,
    pub tags: &'static [TagField<K>],
    pub metrics: &'static [MetricField<K>],
    pub parents: &'static [ParentEdge<K>],
}

pub trait CongroupSource: Resource<DynamicType = ()> + Clone + DeserializeOwned + Debug + Send + Sync + 'static {
    fn table() -> &'static KindTable<Self>;
    fn cache(ctx: &CollectorContext) -> &ObjectCache<Self>;
}

impl CongroupSource for corev1::Namespace {
    fn table() -> &'static KindTable<Self> {
        &namespace::NAMESPACE_TABLE
    }

    fn cache(ctx: &CollectorContext) -> &ObjectCache<Self> {
        ctx.namespaces()
    }
}

impl CongroupSource for corev1::PersistentVolumeClaim {
    fn table() -> &'static KindTable<Self> {
        &pvc::PVC_TABLE
    }

    fn cache(ctx: &CollectorContext) -> &ObjectCache<Self> {
        ctx.pvcs()
    }
}

// Convert a Kubernetes object into a container group.  This never fails: fields that are missing
// don't produce a tag or metric, and fields that can't be parsed are logged and dropped, so a
// single odd object can't stall collection for everything else.
pub fn convert<K: CongroupSource>(obj: &K, ctx: &CollectorContext) -> ContainerGroup {
    let table = K::table();
    let kind = table.kind;

    // Field tags go in after the labels, so they win if a label happens to have the same key
    let mut tags = labels_to_tags(kind, obj.labels());
    for field in table.tags {
        if let Some(value) = (field.extract)(obj) {
            tags.insert(field_key(kind, field.key), value);
        }
    }
    tags.insert(name_key(kind), obj.name_any());

    let mut metrics = vec![];
    for field in table.metrics {
        let Some(quantity) = (field.extract)(obj) else { continue };
        match quantity_to_i64(&quantity.0) {
            Ok(value) => append_metric(&mut metrics, field_key(kind, field.name), value),
            Err(err) => {
                warn!("dropping metric {} for {kind} {}: {err}", field.name, obj.namespaced_name());
                counter!(CONGROUP_MALFORMED_FIELDS_METRIC, "kind" => kind.plural()).increment(1);
            },
        }
    }

    ContainerGroup {
        uid: CongroupUid::new(kind, obj.congroup_id()),
        tags,
        metrics,
        parents: resolve_parents(ctx, obj),
    }
}

// Re-convert every cached object that has a parent edge to `parent`; if `parent_name` is given,
// only the children of that particular parent are converted.  This is how links that were skipped
// because the parent wasn't known yet get filled in.
pub fn convert_children(
    ctx: &CollectorContext,
    parent: ResourceKind,
    parent_name: Option<&str>,
) -> Vec<ContainerGroup> {
    ResourceKind::ALL
        .into_iter()
        .flat_map(|kind| match kind {
            ResourceKind::Namespace => convert_children_of::<corev1::Namespace>(ctx, parent, parent_name),
            ResourceKind::PersistentVolumeClaim => {
                convert_children_of::<corev1::PersistentVolumeClaim>(ctx, parent, parent_name)
            },
        })
        .collect()
}

fn convert_children_of<K: CongroupSource>(
    ctx: &CollectorContext,
    parent: ResourceKind,
    parent_name: Option<&str>,
) -> Vec<ContainerGroup> {
    let edges: Vec<_> = K::table().parents.iter().filter(|e| e.parent == parent).collect();
    if edges.is_empty() {
        return vec![];
    }

    K::cache(ctx)
        .list()
        .into_iter()
        .filter(|obj| {
            parent_name.is_none_or(|name| edges.iter().any(|e| (e.key)(obj).is_some_and(|key| key.name == name)))
        })
        .map(|obj| convert(&*obj, ctx))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rstest::*;

    use super::*;

    fn assert_unique_metric_names<K: CongroupSource>() {
        let names: HashSet<_> = K::table().metrics.iter().map(|m| m.name).collect();
        assert_eq!(names.len(), K::table().metrics.len());
    }

    #[rstest]
    fn test_tables_have_unique_metric_names() {
        assert_unique_metric_names::<corev1::Namespace>();
        assert_unique_metric_names::<corev1::PersistentVolumeClaim>();
    }

    #[rstest]
    fn test_table_kinds() {
        assert_eq!(<corev1::Namespace as CongroupSource>::table().kind, ResourceKind::Namespace);
        assert_eq!(
            <corev1::PersistentVolumeClaim as CongroupSource>::table().kind,
            ResourceKind::PersistentVolumeClaim
        );
    }
}
