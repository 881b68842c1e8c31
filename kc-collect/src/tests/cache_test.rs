use super::*;

#[rstest]
fn test_readiness_registry() {
    let registry = ReadinessRegistry::new();
    assert!(!registry.is_ready(ResourceKind::Namespace));
    assert!(!registry.is_ready(ResourceKind::PersistentVolumeClaim));

    assert!(registry.mark_ready(ResourceKind::Namespace));
    assert!(registry.is_ready(ResourceKind::Namespace));
    assert!(!registry.is_ready(ResourceKind::PersistentVolumeClaim));

    // only the first call flips the flag
    assert!(!registry.mark_ready(ResourceKind::Namespace));
    assert!(registry.is_ready(ResourceKind::Namespace));
}

#[rstest]
fn test_object_cache_get(test_pvc: corev1::PersistentVolumeClaim) {
    let (cache, mut writer) = ObjectCache::<corev1::PersistentVolumeClaim>::new();
    assert!(cache.is_empty());

    writer.apply_watcher_event(&Event::Apply(test_pvc.clone()));

    let obj = cache.get(Some(TEST_NAMESPACE), TEST_PVC).unwrap();
    assert_eq!(obj.name_any(), TEST_PVC);
    assert!(cache.contains(&test_pvc));
    assert_eq!(cache.len(), 1);

    assert!(cache.get(Some(TEST_OTHER_NAMESPACE), TEST_PVC).is_none());
    assert!(cache.get(Some(TEST_NAMESPACE), "some-other-pvc").is_none());
}

#[rstest]
fn test_object_cache_cluster_scoped(test_namespace: corev1::Namespace) {
    let (cache, mut writer) = ObjectCache::<corev1::Namespace>::new();
    writer.apply_watcher_event(&Event::Apply(test_namespace));
    assert!(cache.get(None, TEST_NAMESPACE).is_some());
}

#[rstest]
fn test_object_cache_delete(test_pvc: corev1::PersistentVolumeClaim) {
    let (cache, mut writer) = ObjectCache::<corev1::PersistentVolumeClaim>::new();
    writer.apply_watcher_event(&Event::Apply(test_pvc.clone()));
    writer.apply_watcher_event(&Event::Delete(test_pvc.clone()));
    assert!(!cache.contains(&test_pvc));
}

#[rstest]
fn test_object_cache_initial_list_is_atomic(test_pvc: corev1::PersistentVolumeClaim) {
    let (cache, mut writer) = ObjectCache::<corev1::PersistentVolumeClaim>::new();
    writer.apply_watcher_event(&Event::Init);
    writer.apply_watcher_event(&Event::InitApply(test_pvc.clone()));

    // nothing is visible until the list is complete
    assert!(cache.is_empty());

    writer.apply_watcher_event(&Event::InitDone);
    assert!(cache.contains(&test_pvc));
}
