use kc_core::prelude::*;
use kube::Resource;
use tracing::*;

use crate::congroup::CongroupUid;
use crate::context::CollectorContext;
use crate::convert::CongroupSource;

// The natural key of a parent object in its kind's cache
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ParentKey {
    pub namespace: Option<String>,
    pub name: String,
}

impl ParentKey {
    pub fn cluster_scoped(name: &str) -> ParentKey {
        ParentKey { namespace: None, name: name.into() }
    }
}

pub type ParentKeyExtractor<K> = fn(&K) -> Option<ParentKey>;

// A parent edge says "objects of this kind are contained by an object of kind `parent`, which can
// be found in the parent's cache under the key returned by `key`".
pub struct ParentEdge<K> {
    pub parent: ResourceKind,
    pub key: ParentKeyExtractor<K>,
}

pub fn namespace_parent<K: Resource>(obj: &K) -> Option<ParentKey> {
    obj.meta()
        .namespace
        .as_deref()
        .filter(|ns| !ns.is_empty())
        .map(ParentKey::cluster_scoped)
}

pub fn resolve_parents<K: CongroupSource>(ctx: &CollectorContext, obj: &K) -> Vec<CongroupUid> {
    K::table()
        .parents
        .iter()
        .filter_map(|edge| resolve_edge(ctx, edge, obj))
        .collect()
}

// Neither a not-ready parent kind nor a cache miss is an error: the link is left out of this
// conversion, and gets filled in when the parent (or child) is next observed.
fn resolve_edge<K: CongroupSource>(ctx: &CollectorContext, edge: &ParentEdge<K>, obj: &K) -> Option<CongroupUid> {
    let key = (edge.key)(obj)?;
    if !ctx.readiness().is_ready(edge.parent) {
        debug!("{} not ready yet, skipping parent lookup for {}", edge.parent, obj.namespaced_name());
        return None;
    }

    let uid = lookup_uid(ctx, edge.parent, &key);
    if uid.is_none() {
        debug!("parent {} {} for {} not found in cache", edge.parent, key.name, obj.namespaced_name());
    }
    uid
}

pub fn lookup_uid(ctx: &CollectorContext, kind: ResourceKind, key: &ParentKey) -> Option<CongroupUid> {
    match kind {
        ResourceKind::Namespace => lookup_uid_in::<corev1::Namespace>(ctx, key),
        ResourceKind::PersistentVolumeClaim => lookup_uid_in::<corev1::PersistentVolumeClaim>(ctx, key),
    }
}

fn lookup_uid_in<K: CongroupSource>(ctx: &CollectorContext, key: &ParentKey) -> Option<CongroupUid> {
    let obj = K::cache(ctx).get(key.namespace.as_deref(), &key.name)?;
    Some(CongroupUid::new(K::table().kind, obj.congroup_id()))
}
