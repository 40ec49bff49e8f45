use crate::config::{load, VizConfig};
use crate::error::SessionError;
use std::io::Write;

fn temp_config(name: &str, body: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("{}-{name}", uuid::Uuid::new_v4()));
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(body.as_bytes()).unwrap();
    path
}

#[test]
fn defaults_match_chart_dimensions() {
    let config = VizConfig::default();
    assert_eq!(config.sunburst.width, 800.0);
    assert_eq!(config.breadcrumb.width, 116.0);
    assert_eq!(config.trend.max_points, 15);
    let geometry = config.ring_geometry();
    assert!((geometry.radius - 1.1 * 600.0 / std::f64::consts::PI).abs() < 1e-9);
    assert_eq!(config.scatter().scale(1.0), 50.0);
    config.validate().unwrap();
}

#[test]
fn partial_yaml_falls_back_to_defaults() {
    let path = temp_config("viz.yaml", "sunburst:\n  width: 400\nbreadcrumb:\n  tip: 10\n");
    let config = load(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(config.sunburst.width, 400.0);
    assert_eq!(config.sunburst.height, 600.0);
    assert_eq!(config.breadcrumb.tip, 10.0);
    assert_eq!(config.breadcrumb.height, 30.0);
    assert_eq!(config.scatter.width, 250.0);
}

#[test]
fn json_config_is_accepted() {
    let path = temp_config("viz.json", r#"{ "trend": { "max_points": 10 } }"#);
    let config = load(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(config.trend.max_points, 10);
    assert_eq!(config.cartesian().max_points(), 10);
}

#[test]
fn invalid_dimensions_are_rejected() {
    let path = temp_config("bad.yaml", "scatter:\n  width: -5\n");
    let err = load(&path).unwrap_err();
    std::fs::remove_file(&path).ok();
    assert!(matches!(err, SessionError::InvalidConfig(_)), "{err}");

    let mut config = VizConfig::default();
    config.trend.max_points = 0;
    assert!(config.validate().is_err());
}

#[test]
fn trend_points_cannot_exceed_axis_ticks() {
    let path = temp_config("long-trend.yaml", "trend:\n  max_points: 16\n");
    let err = load(&path).unwrap_err();
    std::fs::remove_file(&path).ok();
    assert!(matches!(err, SessionError::InvalidConfig(_)), "{err}");

    let mut config = VizConfig::default();
    config.trend.max_points = 15;
    config.validate().unwrap();
    config.trend.max_points = 1;
    config.validate().unwrap();
}

#[test]
fn missing_config_file_is_io_error() {
    let err = load(std::path::Path::new("/nonexistent/affect-viz.yaml")).unwrap_err();
    assert!(matches!(err, SessionError::Io(_)));
}
