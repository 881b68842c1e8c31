mod cache_test;

use std::collections::BTreeMap;
use std::sync::Arc;

use kc_core::prelude::*;
use kc_testutils::*;
use kube::Resource;
use kube::runtime::reflector::store::Writer;
use kube::runtime::watcher::Event;

use super::*;

// Populate a cache the same way a watcher does on its initial list
fn list_into<K>(writer: &mut Writer<K>, objs: Vec<K>)
where
    K: Resource<DynamicType = ()> + Clone + 'static,
{
    writer.apply_watcher_event(&Event::Init);
    for obj in objs {
        writer.apply_watcher_event(&Event::InitApply(obj));
    }
    writer.apply_watcher_event(&Event::InitDone);
}

// A context whose namespace cache holds the test namespace and is marked ready
#[fixture]
fn ready_ctx(test_namespace: corev1::Namespace) -> (Arc<CollectorContext>, CacheWriters) {
    let (ctx, mut writers) = CollectorContext::new();
    list_into(&mut writers.namespaces, vec![test_namespace]);
    ctx.readiness().mark_ready(ResourceKind::Namespace);
    (ctx, writers)
}

fn namespace_uid(name: &str) -> CongroupUid {
    CongroupUid::new(ResourceKind::Namespace, name)
}

fn pvc_tag(field: &str) -> String {
    format!("kubernetes.persistentvolumeclaim.label.{field}")
}

// What the test_pvc fixture should convert into
fn expected_pvc_congroup() -> ContainerGroup {
    let tags = BTreeMap::from([
        (pvc_tag("label_key1"), "label_value1".to_string()),
        (pvc_tag("label_key2"), "label_value2".to_string()),
        (pvc_tag("accessmode"), "ReadWriteOnce".to_string()),
        (pvc_tag("volumename"), TEST_VOLUME.to_string()),
        (pvc_tag("storageclassname"), TEST_STORAGE_CLASS.to_string()),
        (pvc_tag("status.phase"), "Bound".to_string()),
        (pvc_tag("storage"), TEST_PVC_CAPACITY.to_string()),
        ("kubernetes.persistentvolumeclaim.name".to_string(), TEST_PVC.to_string()),
    ]);

    let mut metrics = vec![];
    append_metric(&mut metrics, "kubernetes.persistentvolumeclaim.storage".into(), TEST_PVC_CAPACITY_BYTES);

    ContainerGroup {
        uid: CongroupUid {
            kind: Some("k8s_persistentvolumeclaim".into()),
            id: Some(format!("{TEST_NAMESPACE}/{TEST_PVC}")),
        },
        tags,
        metrics,
        parents: vec![CongroupUid {
            kind: Some("k8s_namespace".into()),
            id: Some(TEST_NAMESPACE.into()),
        }],
    }
}
