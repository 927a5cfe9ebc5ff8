use super::*;
use serde_json::json;

fn parse(v: serde_json::Value) -> Scene {
    Scene::from_json(&v.to_string()).unwrap()
}

#[test]
fn empty_object_is_the_default_scene() {
    let s = parse(json!({}));
    assert_eq!(s, Scene::default());
    s.validate().unwrap();
    assert_eq!(s.duration_secs(), 0.0);
}

#[test]
fn partial_config_keeps_other_defaults() {
    let s = parse(json!({
        "canvas": {"width": 320, "height": 240},
        "config": {"max_reflection_order": 1, "wave_display_mode": "secondary"},
        "palette": {"bg": "#000000"}
    }));
    assert_eq!(s.config.max_reflection_order, 1);
    assert_eq!(s.config.max_concurrent_sources, 5);
    assert_eq!(s.config.wave_types.len(), 2);
    assert_eq!(s.palette.get("stroke"), Some("#34553c"));
    s.validate().unwrap();
}

#[test]
fn preset_overrides_named_fields() {
    let s = parse(json!({
        "preset": "historic-weave",
        "config": {"max_reflection_order": 0, "max_concurrent_sources": 9}
    }));
    let c = s.resolved_config().unwrap();
    assert_eq!(c.max_reflection_order, 4);
    assert_eq!(c.max_concurrent_sources, 9);
    assert_eq!(c.wave_types[0].speed, 20.0);
}

#[test]
fn unknown_keys_and_presets_are_rejected() {
    assert!(Scene::from_json(r#"{"canvass": {}}"#).is_err());
    let s = parse(json!({"preset": "nope"}));
    assert!(s.validate().is_err());
}

#[test]
fn invalid_parts_fail_validation() {
    assert!(parse(json!({"canvas": {"width": 0, "height": 10}})).validate().is_err());
    assert!(parse(json!({"palette": {"stroke": "green"}})).validate().is_err());
    assert!(
        parse(json!({"sequence": {"duration": 1.0, "events": [{"time": 2.0, "x": 0, "y": 0}]}}))
            .validate()
            .is_err()
    );
    assert!(parse(json!({"config": {"wave_types": []}})).validate().is_err());
}

#[test]
fn build_field_queues_the_sequence() {
    let s = parse(json!({
        "canvas": {"width": 200, "height": 200},
        "sequence": {"duration": 3.0, "events": [{"time": 0.0, "x": 100, "y": 100}]}
    }));
    assert_eq!(s.duration_secs(), 3.0);
    let f = s.build_field().unwrap();
    assert!(f.sequence().is_some());
    assert!(f.sources().is_empty());
    assert_eq!(f.canvas(), Canvas::new(200, 200).unwrap());
}

#[test]
fn serialized_scene_parses_back() {
    let s = parse(json!({
        "preset": "calm-breath",
        "sequence": {"duration": 1.0, "events": [{"time": 0.5, "x": 1, "y": 2}]}
    }));
    let back = Scene::from_json(&s.to_json().unwrap()).unwrap();
    assert_eq!(back.preset.as_deref(), Some("calm-breath"));
    assert_eq!(back.canvas, s.canvas);
    assert_eq!(back.palette, s.palette);
    assert_eq!(back.sequence.as_ref().unwrap().events.len(), 1);
    back.validate().unwrap();
}
