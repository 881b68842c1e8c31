use kc_testutils::*;

use super::*;
use crate::prelude::*;

#[rstest]
fn test_namespaced_name(test_pvc: corev1::PersistentVolumeClaim, test_namespace: corev1::Namespace) {
    assert_eq!(test_pvc.namespaced_name(), format!("{TEST_NAMESPACE}/{TEST_PVC}"));
    assert_eq!(test_namespace.namespaced_name(), TEST_NAMESPACE);
}

#[rstest]
fn test_congroup_id_uses_uid(test_namespace: corev1::Namespace) {
    // the namespace fixture's UID is its own name
    assert_eq!(test_namespace.congroup_id(), TEST_NAMESPACE);
}

#[rstest]
#[case::missing(None)]
#[case::empty(Some("".into()))]
fn test_congroup_id_fallback(mut test_pvc: corev1::PersistentVolumeClaim, #[case] uid: Option<String>) {
    test_pvc.metadata.uid = uid;
    assert_eq!(test_pvc.congroup_id(), format!("{TEST_NAMESPACE}/{TEST_PVC}"));
}
