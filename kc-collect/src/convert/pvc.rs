use kc_core::prelude::*;

use super::*;
use crate::resolver::namespace_parent;

// These tag keys are what the backend has always received for claims, including the (odd)
// "label." prefix on fields that aren't actually labels.
pub(super) static PVC_TABLE: KindTable<corev1::PersistentVolumeClaim> = KindTable {
    kind: ResourceKind::PersistentVolumeClaim,
    tags: &[
        TagField { key: "label.accessmode", extract: access_modes },
        TagField { key: "label.volumename", extract: volume_name },
        TagField { key: "label.storageclassname", extract: storage_class_name },
        TagField { key: "label.status.phase", extract: phase },
        TagField { key: "label.storage", extract: capacity_string },
    ],
    metrics: &[
        MetricField { name: "storage", extract: capacity },
        MetricField { name: "requests.storage", extract: requested },
    ],
    parents: &[ParentEdge {
        parent: ResourceKind::Namespace,
        key: namespace_parent::<corev1::PersistentVolumeClaim>,
    }],
};

fn access_modes(pvc: &corev1::PersistentVolumeClaim) -> Option<String> {
    let modes = pvc.spec.as_ref()?.access_modes.as_ref()?;
    (!modes.is_empty()).then(|| modes.join(","))
}

fn volume_name(pvc: &corev1::PersistentVolumeClaim) -> Option<String> {
    pvc.spec.as_ref()?.volume_name.clone().filter(|v| !v.is_empty())
}

fn storage_class_name(pvc: &corev1::PersistentVolumeClaim) -> Option<String> {
    pvc.spec.as_ref()?.storage_class_name.clone()
}

fn phase(pvc: &corev1::PersistentVolumeClaim) -> Option<String> {
    pvc.status.as_ref()?.phase.clone()
}

fn capacity(pvc: &corev1::PersistentVolumeClaim) -> Option<&Quantity> {
    pvc.status.as_ref()?.capacity.as_ref()?.get(STORAGE_RESOURCE)
}

fn capacity_string(pvc: &corev1::PersistentVolumeClaim) -> Option<String> {
    capacity(pvc).map(|q| q.0.clone())
}

fn requested(pvc: &corev1::PersistentVolumeClaim) -> Option<&Quantity> {
    pvc.spec.as_ref()?.resources.as_ref()?.requests.as_ref()?.get(STORAGE_RESOURCE)
}
