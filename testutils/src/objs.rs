use std::collections::BTreeMap;

use k8s_openapi::api::core::v1 as corev1;
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use k8s_openapi::apimachinery::pkg::apis::meta::v1 as metav1;
use rstest::fixture;

use crate::constants::*;

// Namespaces are cluster-unique, so the fixture uses the name as the UID as well
#[fixture]
pub fn test_namespace(#[default(TEST_NAMESPACE)] name: &str) -> corev1::Namespace {
    corev1::Namespace {
        metadata: metav1::ObjectMeta {
            name: Some(name.into()),
            uid: Some(name.into()),
            ..Default::default()
        },
        spec: Some(Default::default()),
        status: Some(corev1::NamespaceStatus { phase: Some("Active".into()), ..Default::default() }),
    }
}

// A bound claim with the same shape as the objects the collector sees in a real cluster; the
// spec and status access modes deliberately differ so tests can tell which one was used.  There
// is no UID, so conversion has to synthesize an identity for it.
#[fixture]
pub fn test_pvc(#[default(TEST_PVC)] name: &str) -> corev1::PersistentVolumeClaim {
    corev1::PersistentVolumeClaim {
        metadata: metav1::ObjectMeta {
            name: Some(name.into()),
            namespace: Some(TEST_NAMESPACE.into()),
            resource_version: Some("abcd".into()),
            labels: Some(BTreeMap::from([
                ("label_key1".into(), "label_value1".into()),
                ("label_key2".into(), "label_value2".into()),
            ])),
            ..Default::default()
        },
        spec: Some(corev1::PersistentVolumeClaimSpec {
            access_modes: Some(vec!["ReadWriteOnce".into()]),
            volume_name: Some(TEST_VOLUME.into()),
            storage_class_name: Some(TEST_STORAGE_CLASS.into()),
            ..Default::default()
        }),
        status: Some(corev1::PersistentVolumeClaimStatus {
            phase: Some("Bound".into()),
            access_modes: Some(vec!["ReadOnlyMany".into()]),
            capacity: Some(BTreeMap::from([("storage".into(), Quantity(TEST_PVC_CAPACITY.into()))])),
            conditions: Some(vec![corev1::PersistentVolumeClaimCondition {
                type_: "Resizing".into(),
                status: "Unknown".into(),
                reason: Some("NoSacciu".into()),
                message: Some("NoComment".into()),
                ..Default::default()
            }]),
            ..Default::default()
        }),
    }
}

// A claim that has been created but not yet processed by the control plane: no spec details,
// no status at all.
#[fixture]
pub fn test_pending_pvc(#[default("pending-pvc")] name: &str) -> corev1::PersistentVolumeClaim {
    corev1::PersistentVolumeClaim {
        metadata: metav1::ObjectMeta {
            name: Some(name.into()),
            namespace: Some(TEST_NAMESPACE.into()),
            uid: Some(format!("{name}-uid")),
            ..Default::default()
        },
        spec: None,
        status: None,
    }
}
