use std::sync::{
    Arc,
    Mutex,
    MutexGuard,
};

use kc_core::prelude::*;
use kube::runtime::reflector::store::Writer;

use crate::cache::{
    ObjectCache,
    ReadinessRegistry,
};

// The writer half of every cache in a CollectorContext.  Each writer is moved into the watcher
// for its kind, so there's exactly one writer per kind.
pub struct CacheWriters {
    pub namespaces: Writer<corev1::Namespace>,
    pub pvcs: Writer<corev1::PersistentVolumeClaim>,
}

// CollectorContext owns all of the shared state that conversion needs: one object cache per
// resource kind plus the readiness registry.  It's passed (behind an Arc) into every converter
// call, so there's no global state anywhere in the collector.
pub struct CollectorContext {
    emission: Mutex<()>,
    readiness: ReadinessRegistry,
    namespaces: ObjectCache<corev1::Namespace>,
    pvcs: ObjectCache<corev1::PersistentVolumeClaim>,
}

impl CollectorContext {
    pub fn new() -> (Arc<CollectorContext>, CacheWriters) {
        let (namespaces, ns_writer) = ObjectCache::new();
        let (pvcs, pvc_writer) = ObjectCache::new();
        let ctx = CollectorContext {
            emission: Mutex::new(()),
            readiness: ReadinessRegistry::new(),
            namespaces,
            pvcs,
        };
        (Arc::new(ctx), CacheWriters { namespaces: ns_writer, pvcs: pvc_writer })
    }

    // Held by a watcher from its first cache write for an event until the last update for that
    // event is sent, so a child's update never goes out after its parent's reconciliation pass.
    pub fn emission_guard(&self) -> MutexGuard<'_, ()> {
        // The guarded value is (), so a poisoned lock has nothing to repair
        self.emission.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn readiness(&self) -> &ReadinessRegistry {
        &self.readiness
    }

    pub fn namespaces(&self) -> &ObjectCache<corev1::Namespace> {
        &self.namespaces
    }

    pub fn pvcs(&self) -> &ObjectCache<corev1::PersistentVolumeClaim> {
        &self.pvcs
    }
}
