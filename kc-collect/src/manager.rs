use std::sync::Arc;

use anyhow::bail;
use kc_core::prelude::*;
use kube::runtime::reflector::store::Writer;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::*;

use crate::config::CollectorConfig;
use crate::context::{
    CacheWriters,
    CollectorContext,
};
use crate::convert::CongroupSource;
use crate::watcher::{
    ObjWatcher,
    Receiver,
    Sender,
};

// The CollectorManager starts one watcher per tracked resource kind, all sharing a single
// CollectorContext, and funnels every container group update into one channel.  Kinds that aren't
// tracked never get a watcher, so their caches stay empty and never become ready.
pub struct CollectorManager {
    num_tracked: usize,
    ready_rx: mpsc::Receiver<bool>,
    js: JoinSet<()>,
}

impl CollectorManager {
    pub fn start(client: kube::Client, config: &CollectorConfig) -> anyhow::Result<(CollectorManager, Receiver)> {
        let (ctx, writers) = CollectorContext::new();
        let CacheWriters { namespaces, pvcs } = writers;

        let num_tracked = ResourceKind::ALL.iter().filter(|k| config.is_tracked(**k)).count();
        if num_tracked == 0 {
            bail!("no resource kinds are tracked, nothing to collect");
        }

        let (tx, rx): (Sender, Receiver) = mpsc::unbounded_channel();
        let (ready_tx, ready_rx) = mpsc::channel(ResourceKind::ALL.len());

        let mut js = JoinSet::new();
        let mut spawner = WatcherSpawner { client, ctx, config, tx, ready_tx, js: &mut js };
        spawner.spawn(namespaces);
        spawner.spawn(pvcs);

        Ok((CollectorManager { num_tracked, ready_rx, js }, rx))
    }

    pub async fn shutdown(&mut self) {
        self.js.shutdown().await;
    }

    // Resolves once every tracked kind has finished its initial list
    pub async fn wait_ready(&mut self) -> EmptyResult {
        for _ in 0..self.num_tracked {
            if self.ready_rx.recv().await.is_none() {
                bail!("watchers exited before every tracked kind was ready");
            }
        }
        Ok(())
    }
}

struct WatcherSpawner<'a> {
    client: kube::Client,
    ctx: Arc<CollectorContext>,
    config: &'a CollectorConfig,
    tx: Sender,
    ready_tx: mpsc::Sender<bool>,
    js: &'a mut JoinSet<()>,
}

impl WatcherSpawner<'_> {
    fn spawn<K: CongroupSource>(&mut self, writer: Writer<K>) {
        let kind = K::table().kind;
        if !self.config.is_tracked(kind) {
            debug!("{kind} not tracked, skipping watcher");
            return;
        }

        info!("starting {kind} watcher");
        let watcher = ObjWatcher::new_with_stream(
            self.client.clone(),
            self.ctx.clone(),
            writer,
            self.config,
            self.tx.clone(),
            self.ready_tx.clone(),
        );
        self.js.spawn(watcher.start());
    }
}

#[cfg(test)]
mod tests {
    use assertables::*;
    use kube::client::Body;
    use rstest::*;

    use super::*;

    #[fixture]
    fn client() -> kube::Client {
        let (mock_service, _) = tower_test::mock::pair::<http::Request<Body>, http::Response<Body>>();
        kube::Client::new(mock_service, "default")
    }

    fn manager_from_parts(num_tracked: usize) -> (CollectorManager, mpsc::Sender<bool>) {
        let (ready_tx, ready_rx) = mpsc::channel(ResourceKind::ALL.len());
        (CollectorManager { num_tracked, ready_rx, js: JoinSet::new() }, ready_tx)
    }

    #[rstest]
    #[tokio::test]
    async fn test_start_nothing_tracked(client: kube::Client) {
        let err = CollectorManager::start(client, &CollectorConfig::default()).err().unwrap();
        assert!(err.to_string().contains("nothing to collect"));
    }

    #[rstest]
    #[tokio::test]
    async fn test_wait_ready() {
        let (mut manager, ready_tx) = manager_from_parts(2);
        ready_tx.send(true).await.unwrap();
        ready_tx.send(true).await.unwrap();
        assert_ok!(manager.wait_ready().await);
    }

    #[rstest]
    #[tokio::test]
    async fn test_wait_ready_watchers_exited() {
        let (mut manager, ready_tx) = manager_from_parts(2);
        ready_tx.send(true).await.unwrap();
        drop(ready_tx);
        assert_err!(manager.wait_ready().await);
    }
}
