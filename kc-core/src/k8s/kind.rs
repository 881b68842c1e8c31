use std::fmt;
use std::str::FromStr;

use serde::{
    Deserialize,
    Deserializer,
    Serialize,
    Serializer,
    de,
};

use super::*;
use crate::prelude::*;

// ResourceKind enumerates the Kubernetes resources the collector knows how to convert.  Each kind
// carries three names: the plural resource name (used in config files and for readiness
// bookkeeping), the segment used in tag and metric keys, and the container group "taxonomy" kind.
//
// For serialization we use the plural resource name, e.g. "persistentvolumeclaims".
#[derive(Clone, Copy, Debug, Hash, Eq, Ord, PartialEq, PartialOrd)]
pub enum ResourceKind {
    Namespace,
    PersistentVolumeClaim,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 2] = [ResourceKind::Namespace, ResourceKind::PersistentVolumeClaim];

    pub fn plural(&self) -> &'static str {
        match self {
            ResourceKind::Namespace => "namespaces",
            ResourceKind::PersistentVolumeClaim => "persistentvolumeclaims",
        }
    }

    pub fn tag_segment(&self) -> &'static str {
        match self {
            ResourceKind::Namespace => "namespace",
            ResourceKind::PersistentVolumeClaim => "persistentvolumeclaim",
        }
    }

    pub fn taxonomy(&self) -> &'static str {
        match self {
            ResourceKind::Namespace => NAMESPACE_CONGROUP_KIND,
            ResourceKind::PersistentVolumeClaim => PVC_CONGROUP_KIND,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.plural())
    }
}

impl FromStr for ResourceKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.plural() == s)
            .ok_or_else(|| KindError::unknown_kind(s))
    }
}

impl Serialize for ResourceKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.plural())
    }
}

struct ResourceKindVisitor;

impl<'de> de::Visitor<'de> for ResourceKindVisitor {
    type Value = ResourceKind;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a plural Kubernetes resource name, e.g. \"namespaces\"")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        value.parse().map_err(|e| E::custom(format!("{e}")))
    }
}

impl<'de> Deserialize<'de> for ResourceKind {
    fn deserialize<D>(deserializer: D) -> Result<ResourceKind, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(ResourceKindVisitor)
    }
}

#[cfg(test)]
mod test {
    use assertables::*;
    use rstest::*;
    use serde::de::IntoDeserializer;
    use serde::de::value::{
        Error as SerdeError,
        StrDeserializer,
    };

    use super::*;

    #[rstest]
    #[case::ns(ResourceKind::Namespace, "namespace", "k8s_namespace")]
    #[case::pvc(ResourceKind::PersistentVolumeClaim, "persistentvolumeclaim", "k8s_persistentvolumeclaim")]
    fn test_kind_names(#[case] kind: ResourceKind, #[case] segment: &str, #[case] taxonomy: &str) {
        assert_eq!(kind.tag_segment(), segment);
        assert_eq!(kind.taxonomy(), taxonomy);
    }

    #[rstest]
    fn test_serialize() {
        assert_eq!(serde_json::to_string(&ResourceKind::Namespace).unwrap(), "\"namespaces\"");
        assert_eq!(
            serde_json::to_string(&ResourceKind::PersistentVolumeClaim).unwrap(),
            "\"persistentvolumeclaims\""
        );
    }

    #[rstest]
    fn test_deserialize() {
        let d1: StrDeserializer<SerdeError> = "persistentvolumeclaims".into_deserializer();
        assert_eq!(ResourceKind::deserialize(d1).unwrap(), ResourceKind::PersistentVolumeClaim);

        let d2: StrDeserializer<SerdeError> = "namespace".into_deserializer();
        assert_err!(ResourceKind::deserialize(d2));

        let d3: StrDeserializer<SerdeError> = "pods".into_deserializer();
        assert_err!(ResourceKind::deserialize(d3));
    }
}
