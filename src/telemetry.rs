use opentelemetry::{
    global,
    metrics::{Counter, Histogram, MeterProvider},
    KeyValue,
};
use prometheus::Registry;

pub struct Metrics {
    request_counter: Counter<u64>,
    annotate_duration: Histogram<u64>,
    annotations_drawn: Counter<u64>,
    pub registry: Registry,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();
        // TODO: opentelemetry-prometheus is deprecated, move to an OTLP exporter
        let exporter = opentelemetry_prometheus::exporter()
            .with_registry(registry.clone())
            .build()
            .unwrap();

        let provider = opentelemetry_sdk::metrics::SdkMeterProvider::builder()
            .with_reader(exporter)
            .build();

        let meter = provider.meter("leaf_annotator");
        global::set_meter_provider(provider);

        let request_counter = meter
            .u64_counter("requests_total")
            .with_description("Total number of requests")
            .build();

        let annotate_duration = meter
            .u64_histogram("annotate_duration_ms")
            .with_boundaries(vec![5.0, 10.0, 25.0, 50.0, 100.0, 250.0, 500.0, 1000.0])
            .with_description("Duration of annotate requests in milliseconds")
            .build();

        let annotations_drawn = meter
            .u64_counter("annotations_drawn_total")
            .with_description("Total number of bounding boxes drawn")
            .build();

        Metrics {
            request_counter,
            annotate_duration,
            annotations_drawn,
            registry,
        }
    }

    pub fn record_request(&self, route: &str) {
        let attributes = vec![KeyValue::new("route", route.to_string())];
        self.request_counter.add(1, &attributes);
    }

    pub fn record_annotate_duration(&self, duration_ms: u64, route: &str) {
        let attributes = vec![KeyValue::new("route", route.to_string())];
        self.annotate_duration.record(duration_ms, &attributes);
    }

    pub fn record_annotations_drawn(&self, count: u64, route: &str) {
        let attributes = vec![KeyValue::new("route", route.to_string())];
        self.annotations_drawn.add(count, &attributes);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
