use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{
    AtomicBool,
    Ordering,
};

use kc_core::prelude::*;
use kube::Resource;
use kube::runtime::reflector::{
    self,
    ObjectRef,
    Store,
};
use kube::runtime::reflector::store::Writer;

// ObjectCache is a read-only view of the local mirror of one resource kind.  The mirror itself is
// a kube-rs reflector store: the owning watcher holds the (single) Writer and applies watch events
// to it, and every other component only ever reads.  The store hands out Arc snapshots of each
// object, and replaces entries wholesale, so readers never see a partially-applied update.
#[derive(Clone)]
pub struct ObjectCache<K>
where
    K: Resource<DynamicType = ()> + Clone + 'static,
{
    store: Store<K>,
}

impl<K> ObjectCache<K>
where
    K: Resource<DynamicType = ()> + Clone + 'static,
{
    pub fn new() -> (ObjectCache<K>, Writer<K>) {
        let (store, writer) = reflector::store();
        (ObjectCache { store }, writer)
    }

    pub fn get(&self, namespace: Option<&str>, name: &str) -> Option<Arc<K>> {
        let obj_ref = match namespace {
            Some(ns) => ObjectRef::new(name).within(ns),
            None => ObjectRef::new(name),
        };
        self.store.get(&obj_ref)
    }

    pub fn contains(&self, obj: &K) -> bool {
        self.store.get(&ObjectRef::from_obj(obj)).is_some()
    }

    pub fn list(&self) -> Vec<Arc<K>> {
        self.store.state()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

// The readiness registry records, per resource kind, whether that kind's cache has finished its
// initial list.  Lookups into a kind that isn't ready can't distinguish "doesn't exist" from
// "hasn't been seen yet", so parent resolution skips them entirely.
//
// A flag goes from false to true exactly once and is never reset; after a re-list the reflector
// keeps serving the previous state until the new listing is complete.
pub struct ReadinessRegistry {
    flags: HashMap<ResourceKind, AtomicBool>,
}

impl ReadinessRegistry {
    pub fn new() -> ReadinessRegistry {
        ReadinessRegistry {
            flags: ResourceKind::ALL.into_iter().map(|k| (k, AtomicBool::new(false))).collect(),
        }
    }

    // Returns true if this call is the one that flipped the flag
    pub fn mark_ready(&self, kind: ResourceKind) -> bool {
        !self.flags[&kind].swap(true, Ordering::SeqCst)
    }

    pub fn is_ready(&self, kind: ResourceKind) -> bool {
        self.flags[&kind].load(Ordering::SeqCst)
    }
}

impl Default for ReadinessRegistry {
    fn default() -> Self {
        Self::new()
    }
}
