use affect_core::NodeKind;
use affect_session::Frame;
use prometheus::{Encoder, GaugeVec, IntCounter, IntGauge, Opts, Registry, TextEncoder};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),
    #[error("exposition is not valid UTF-8")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Refresh outcomes for one session, kept in a private registry.
pub struct AffectMetrics {
    registry: Registry,
    pub snapshots_ingested_total: IntCounter,
    pub snapshots_rejected_total: IntCounter,
    pub latest_value: GaugeVec,
    pub tree_nodes: IntGauge,
}

impl AffectMetrics {
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let snapshots_ingested_total = IntCounter::new(
            "affect_snapshots_ingested_total",
            "Affect snapshots absorbed into the sliding windows",
        )?;
        let snapshots_rejected_total = IntCounter::new(
            "affect_snapshots_rejected_total",
            "Affect snapshots rejected by schema validation",
        )?;
        let latest_value = GaugeVec::new(
            Opts::new("affect_latest_value", "Newest value per affect channel"),
            &["channel"],
        )?;
        let tree_nodes = IntGauge::new(
            "affect_tree_nodes",
            "Nodes in the most recently partitioned hierarchy",
        )?;

        registry.register(Box::new(snapshots_ingested_total.clone()))?;
        registry.register(Box::new(snapshots_rejected_total.clone()))?;
        registry.register(Box::new(latest_value.clone()))?;
        registry.register(Box::new(tree_nodes.clone()))?;

        Ok(Self {
            registry,
            snapshots_ingested_total,
            snapshots_rejected_total,
            latest_value,
            tree_nodes,
        })
    }

    /// Record a frame produced by a successful ingest.
    pub fn observe_frame(&self, frame: &Frame) {
        self.snapshots_ingested_total.inc();
        self.tree_nodes.set(frame.tree.len() as i64);

        for node in frame.tree.nodes().iter().filter(|n| n.kind == NodeKind::Metric) {
            if let Ok(latest) = node.latest_score() {
                let channel = frame.tree.key_path(node.id).join("/");
                self.latest_value.with_label_values(&[channel.as_str()]).set(latest);
            }
        }
    }

    pub fn observe_rejection(&self) {
        self.snapshots_rejected_total.inc();
    }

    /// Text exposition of every metric.
    pub fn render(&self) -> Result<String, MetricsError> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
