pub const TEST_NAMESPACE: &str = "MytestNamespace";
pub const TEST_OTHER_NAMESPACE: &str = "OtherNamespace";
pub const TEST_PVC: &str = "SamePVC";
pub const TEST_PVC_UID: &str = "5b1f2a8e-pvc-uid";
pub const TEST_VOLUME: &str = "ATestVolume";
pub const TEST_STORAGE_CLASS: &str = "StorageClassName";
pub const TEST_PVC_CAPACITY: &str = "500M";
pub const TEST_PVC_CAPACITY_BYTES: i64 = 500_000_000;
