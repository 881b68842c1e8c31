use kube::Resource;

use super::*;
use crate::prelude::*;

impl<T: Resource> KubeResourceExt for T {
    fn namespaced_name(&self) -> String {
        match self.namespace() {
            Some(ns) => format!("{}/{}", ns, self.name_any()),
            None => self.name_any(),
        }
    }

    // Objects read back from the apiserver always have a UID, but objects built by hand (or
    // replayed from somewhere that strips it) might not; in that case we fall back to the
    // namespaced name, which is unique within a kind.
    fn congroup_id(&self) -> String {
        match self.uid() {
            Some(uid) if !uid.is_empty() => uid,
            _ => self.namespaced_name(),
        }
    }
}
