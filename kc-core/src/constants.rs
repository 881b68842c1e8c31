// Every tag and metric key starts with this; the rest of the key is
// "<resourcekind>.<field>".  These strings are consumed by the backend, so
// changing any of them is a breaking change.
pub const TAG_KEY_PREFIX: &str = "kubernetes";
pub const LABEL_TAG_SEGMENT: &str = "label";
pub const NAME_TAG_SEGMENT: &str = "name";

// Container group kinds
pub const NAMESPACE_CONGROUP_KIND: &str = "k8s_namespace";
pub const PVC_CONGROUP_KIND: &str = "k8s_persistentvolumeclaim";

// Well-known resource names
pub const STORAGE_RESOURCE: &str = "storage";

// Metric names
pub const CONGROUP_UPDATES_METRIC: &str = "congroup_updates_total";
pub const CONGROUP_MALFORMED_FIELDS_METRIC: &str = "congroup_malformed_fields_total";
