use std::collections::HashMap;
use std::fs::File;

use kc_core::prelude::*;
use serde::{
    Deserialize,
    Serialize,
};

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KindConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_selector: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectorConfig {
    pub tracked_kinds: HashMap<ResourceKind, KindConfig>,
}

impl CollectorConfig {
    pub fn load(filename: &str) -> anyhow::Result<CollectorConfig> {
        Ok(serde_yaml::from_reader(File::open(filename)?)?)
    }

    pub fn is_tracked(&self, kind: ResourceKind) -> bool {
        self.tracked_kinds.contains_key(&kind)
    }

    pub fn watcher_config_for(&self, kind: ResourceKind) -> kube::runtime::watcher::Config {
        let config = kube::runtime::watcher::Config::default();
        match self.tracked_kinds.get(&kind).and_then(|c| c.label_selector.as_deref()) {
            Some(sel) => config.labels(sel),
            None => config,
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_fs::NamedTempFile;
    use assert_fs::prelude::*;
    use assertables::*;
    use rstest::*;

    use super::*;

    #[rstest]
    fn test_load_config() {
        let config_yml = "
---
trackedKinds:
  namespaces: {}
  persistentvolumeclaims:
    labelSelector: app=db
";
        let file = NamedTempFile::new("collector.yml").unwrap();
        file.write_str(config_yml).unwrap();

        let config = CollectorConfig::load(file.path().to_str().unwrap()).unwrap();
        assert!(config.is_tracked(ResourceKind::Namespace));
        assert_eq!(
            config.tracked_kinds[&ResourceKind::PersistentVolumeClaim].label_selector,
            Some("app=db".into())
        );
        assert_eq!(
            config.watcher_config_for(ResourceKind::PersistentVolumeClaim).label_selector,
            Some("app=db".into())
        );
        assert_none!(config.watcher_config_for(ResourceKind::Namespace).label_selector);
    }

    #[rstest]
    fn test_untracked_kind() {
        let config: CollectorConfig = serde_yaml::from_str("trackedKinds:\n  namespaces: {}\n").unwrap();
        assert!(!config.is_tracked(ResourceKind::PersistentVolumeClaim));
    }

    #[rstest]
    fn test_unknown_kind() {
        let res = serde_yaml::from_str::<CollectorConfig>("trackedKinds:\n  pods: {}\n");
        assert_err!(res);
    }
}
