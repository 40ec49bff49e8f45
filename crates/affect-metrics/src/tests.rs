use crate::AffectMetrics;
use affect_core::{AffectReading, AffectSnapshot, Pad};
use affect_session::{AffectSession, VizConfig};

fn snapshot(satisfaction: f64) -> AffectSnapshot {
    AffectSnapshot {
        emotion: AffectReading {
            pad: Pad::new(0.3, 0.2, 0.1),
            description: "joy".into(),
        },
        mood: AffectReading {
            pad: Pad::new(0.1, 0.1, 0.1),
            description: "calm".into(),
        },
        satisfaction,
        ..AffectSnapshot::default()
    }
}

#[test]
fn frames_update_counters_and_gauges() {
    let metrics = AffectMetrics::new().unwrap();
    let mut session = AffectSession::new(VizConfig::default()).unwrap();

    let frame = session.refresh(&snapshot(1.25)).unwrap();
    metrics.observe_frame(&frame);
    metrics.observe_rejection();

    assert_eq!(metrics.snapshots_ingested_total.get(), 1);
    assert_eq!(metrics.snapshots_rejected_total.get(), 1);
    assert_eq!(metrics.tree_nodes.get(), frame.tree.len() as i64);
    assert_eq!(
        metrics
            .latest_value
            .with_label_values(&["Satisfaction"])
            .get(),
        1.25
    );
    assert_eq!(
        metrics
            .latest_value
            .with_label_values(&["Personality/Big Five/Openness"])
            .get(),
        0.0
    );

    let text = metrics.render().unwrap();
    assert!(text.contains("affect_snapshots_ingested_total 1"));
    assert!(text.contains("affect_latest_value{channel=\"Emotion/Pleasure\"} 0.3"));
}

#[test]
fn registries_are_independent() {
    let a = AffectMetrics::new().unwrap();
    let b = AffectMetrics::new().unwrap();
    a.observe_rejection();
    assert_eq!(b.snapshots_rejected_total.get(), 0);
}
