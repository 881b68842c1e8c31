#![cfg_attr(coverage, feature(coverage_attribute))]
mod cache;
mod codec;
mod compare;
mod config;
mod congroup;
mod context;
mod convert;
mod manager;
mod resolver;
mod watcher;

pub use crate::cache::{
    ObjectCache,
    ReadinessRegistry,
};
pub use crate::codec::{
    QuantityError,
    append_metric,
    field_key,
    label_key,
    labels_to_tags,
    name_key,
    quantity_to_i64,
};
pub use crate::compare::{
    CongroupMismatch,
    assert_congroups_eq,
    congroups_equal,
    diff_congroups,
};
pub use crate::config::{
    CollectorConfig,
    KindConfig,
};
pub use crate::congroup::{
    CongroupEventType,
    CongroupMetric,
    CongroupUid,
    CongroupUpdate,
    ContainerGroup,
};
pub use crate::context::{
    CacheWriters,
    CollectorContext,
};
pub use crate::convert::{
    CongroupSource,
    KindTable,
    MetricField,
    TagField,
    convert,
    convert_children,
};
pub use crate::manager::CollectorManager;
pub use crate::resolver::{
    ParentEdge,
    ParentKey,
    lookup_uid,
    namespace_parent,
    resolve_parents,
};
pub use crate::watcher::{
    ObjStream,
    ObjWatcher,
    Receiver,
    Sender,
};

#[cfg(test)]
mod tests;
