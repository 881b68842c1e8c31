use std::collections::HashMap;
use std::mem::take;
use std::pin::Pin;
use std::sync::Arc;

use futures::{
    Stream,
    StreamExt,
    TryStreamExt,
};
use kc_core::prelude::*;
use kube::runtime::WatchStreamExt;
use kube::runtime::reflector::store::Writer;
use kube::runtime::watcher::{
    Event,
    watcher,
};
use metrics::counter;
use tokio::sync::mpsc;
use tracing::*;

use crate::config::CollectorConfig;
use crate::congroup::{
    CongroupEventType,
    CongroupUpdate,
    ContainerGroup,
};
use crate::context::CollectorContext;
use crate::convert::{
    CongroupSource,
    convert,
    convert_children,
};

pub type ObjStream<K> = Pin<Box<dyn Stream<Item = anyhow::Result<Event<K>>> + Send>>;
pub type Sender = mpsc::UnboundedSender<CongroupUpdate>;
pub type Receiver = mpsc::UnboundedReceiver<CongroupUpdate>;

// The ObjWatcher consumes the watch stream for one resource kind.  Every event is first applied
// to the kind's cache (this watcher owns the only writer for it), and only then converted, so any
// conversion that runs afterwards, for any kind, sees the new state.
//
// Besides converting the object the event is about, the watcher re-converts the children of an
// object when it appears or disappears, and the children of every object of this kind when the
// kind's initial list completes.  That's what fills in parent links that were skipped because the
// parent hadn't been seen yet.
pub struct ObjWatcher<K: CongroupSource> {
    ctx: Arc<CollectorContext>,
    writer: Writer<K>,
    stream: ObjStream<K>,
    tx: Sender,
    ready_tx: mpsc::Sender<bool>,

    // Everything that was in the cache when a (re-)list started, keyed by namespaced name; whatever
    // is left over once the list is done was deleted while we weren't watching.
    relist_pending: HashMap<String, Arc<K>>,
}

impl<K: CongroupSource> ObjWatcher<K> {
    pub fn new_with_stream(
        client: kube::Client,
        ctx: Arc<CollectorContext>,
        writer: Writer<K>,
        config: &CollectorConfig,
        tx: Sender,
        ready_tx: mpsc::Sender<bool>,
    ) -> ObjWatcher<K> {
        let api: kube::Api<K> = kube::Api::all(client);
        let stream = watcher(api, config.watcher_config_for(K::table().kind))
            .default_backoff()
            .map_err(|e| e.into())
            .boxed();
        ObjWatcher::new_from_parts(ctx, writer, stream, tx, ready_tx)
    }

    pub fn new_from_parts(
        ctx: Arc<CollectorContext>,
        writer: Writer<K>,
        stream: ObjStream<K>,
        tx: Sender,
        ready_tx: mpsc::Sender<bool>,
    ) -> ObjWatcher<K> {
        ObjWatcher {
            ctx,
            writer,
            stream,
            tx,
            ready_tx,
            relist_pending: HashMap::new(),
        }
    }

    pub async fn start(mut self) {
        let kind = K::table().kind;
        while let Some(res) = self.stream.next().await {
            match res {
                Ok(evt) => self.handle_event(&evt),
                Err(err) => error!("{kind} watcher received error on stream: {err}"),
            }
        }
        warn!("{kind} watch stream ended");
    }

    pub(crate) fn handle_event(&mut self, evt: &Event<K>) {
        let ctx = self.ctx.clone();
        let _guard = ctx.emission_guard();

        match evt {
            Event::Apply(obj) => {
                let event_type = if K::cache(&self.ctx).contains(obj) {
                    CongroupEventType::Updated
                } else {
                    CongroupEventType::Added
                };
                self.writer.apply_watcher_event(evt);
                self.send(event_type, convert(obj, &self.ctx));

                if event_type == CongroupEventType::Added {
                    self.reconcile_children(Some(&obj.name_any()));
                }
            },
            Event::Delete(obj) => {
                self.writer.apply_watcher_event(evt);
                self.send(CongroupEventType::Removed, convert(obj, &self.ctx));
                self.reconcile_children(Some(&obj.name_any()));
            },
            Event::Init => {
                self.relist_pending = K::cache(&self.ctx)
                    .list()
                    .into_iter()
                    .map(|obj| (obj.namespaced_name(), obj))
                    .collect();
                self.writer.apply_watcher_event(evt);
            },
            Event::InitApply(_) => self.writer.apply_watcher_event(evt),
            Event::InitDone => {
                // The reflector only swaps in the newly-listed objects on InitDone
                self.writer.apply_watcher_event(evt);
                self.handle_list_done();
            },
        }
    }

    fn handle_list_done(&mut self) {
        let kind = K::table().kind;
        if self.ctx.readiness().mark_ready(kind) {
            info!("{kind} cache is ready");
            if let Err(err) = self.ready_tx.try_send(true) {
                warn!("could not send readiness signal for {kind}: {err}");
            }
        }

        let mut previous = take(&mut self.relist_pending);
        for obj in K::cache(&self.ctx).list() {
            let event_type = match previous.remove(&obj.namespaced_name()) {
                Some(_) => CongroupEventType::Updated,
                None => CongroupEventType::Added,
            };
            self.send(event_type, convert(&*obj, &self.ctx));
        }

        for (ns_name, obj) in previous {
            debug!("{kind} {ns_name} was deleted while the watch was down");
            self.send(CongroupEventType::Removed, convert(&*obj, &self.ctx));
        }

        self.reconcile_children(None);
    }

    fn reconcile_children(&self, parent_name: Option<&str>) {
        for congroup in convert_children(&self.ctx, K::table().kind, parent_name) {
            self.send(CongroupEventType::Updated, congroup);
        }
    }

    fn send(&self, event_type: CongroupEventType, congroup: ContainerGroup) {
        let congroup_kind = congroup.uid.kind.clone().unwrap_or_default();
        debug!("{} container group {}", event_type.as_str(), congroup.uid);
        counter!(CONGROUP_UPDATES_METRIC, "kind" => congroup_kind, "event" => event_type.as_str()).increment(1);

        if let Err(err) = self.tx.send(CongroupUpdate { event_type, congroup }) {
            error!("could not send container group update: {err}");
        }
    }
}
