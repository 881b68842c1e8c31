use std::sync::Arc;
use std::sync::atomic::Ordering;

use metrics::{
    Counter,
    Gauge,
    Histogram,
    Key,
    KeyName,
    Label,
    Metadata,
    Recorder,
    SharedString,
    Unit,
};
use metrics_util::registry::{
    AtomicStorage,
    Registry,
};

// An in-process recorder that just keeps everything in a registry, so callers (mostly tests) can
// read back what was recorded.  Use it with `metrics::with_local_recorder`, or install it globally
// with `metrics::set_global_recorder`.
#[derive(Clone)]
pub struct MemoryRecorder {
    registry: Arc<Registry<Key, AtomicStorage>>,
}

impl MemoryRecorder {
    pub fn new() -> MemoryRecorder {
        MemoryRecorder { registry: Arc::new(Registry::atomic()) }
    }

    // Counters that were never incremented read as zero
    pub fn counter(&self, name: &'static str, labels: &[(&'static str, &'static str)]) -> u64 {
        let labels: Vec<_> = labels.iter().map(|(k, v)| Label::new(*k, *v)).collect();
        self.registry
            .get_counter(&Key::from_parts(name, labels))
            .map_or(0, |c| c.load(Ordering::Relaxed))
    }
}

impl Default for MemoryRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl Recorder for MemoryRecorder {
    fn describe_counter(&self, _key: KeyName, _unit: Option<Unit>, _description: SharedString) {}

    fn describe_gauge(&self, _key: KeyName, _unit: Option<Unit>, _description: SharedString) {}

    fn describe_histogram(&self, _key: KeyName, _unit: Option<Unit>, _description: SharedString) {}

    fn register_counter(&self, key: &Key, _metadata: &Metadata<'_>) -> Counter {
        self.registry.get_or_create_counter(key, |c| Counter::from_arc(c.clone()))
    }

    fn register_gauge(&self, key: &Key, _metadata: &Metadata<'_>) -> Gauge {
        self.registry.get_or_create_gauge(key, |g| Gauge::from_arc(g.clone()))
    }

    fn register_histogram(&self, key: &Key, _metadata: &Metadata<'_>) -> Histogram {
        self.registry.get_or_create_histogram(key, |h| Histogram::from_arc(h.clone()))
    }
}

#[cfg(test)]
mod tests {
    use metrics::counter;
    use rstest::*;

    use super::*;

    #[rstest]
    fn test_memory_recorder_counter() {
        let recorder = MemoryRecorder::new();
        metrics::with_local_recorder(&recorder, || {
            counter!("widgets_total", "color" => "red").increment(2);
            counter!("widgets_total", "color" => "red").increment(1);
            counter!("widgets_total", "color" => "blue").increment(1);
        });

        assert_eq!(recorder.counter("widgets_total", &[("color", "red")]), 3);
        assert_eq!(recorder.counter("widgets_total", &[("color", "blue")]), 1);
        assert_eq!(recorder.counter("widgets_total", &[("color", "green")]), 0);
        assert_eq!(recorder.counter("widgets_total", &[]), 0);
    }
}
