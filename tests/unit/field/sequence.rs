use super::*;
use serde_json::json;

fn seq() -> Sequence {
    Sequence {
        duration: 2.0,
        events: vec![
            SequenceEvent::at(0.0, 10.0, 10.0),
            SequenceEvent::at(0.5, 20.0, 20.0),
            SequenceEvent::at(0.5, 30.0, 30.0),
            SequenceEvent::at(1.5, 40.0, 40.0),
        ],
    }
}

#[test]
fn events_fire_once_in_order() {
    let mut p = SequencePlayer::new(seq());
    let first = p.advance(0.0);
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].x, 10.0);

    assert!(p.advance(0.4).is_empty());
    let mid: Vec<f64> = p.advance(0.1).iter().map(|e| e.x).collect();
    assert_eq!(mid, vec![20.0, 30.0]);
    assert!(p.advance(0.5).is_empty());

    let last = p.advance(10.0);
    assert_eq!(last.len(), 1);
    assert_eq!(p.remaining(), 0);
    assert!(p.advance(1.0).is_empty());
}

#[test]
fn finishes_only_after_duration_elapses() {
    let mut p = SequencePlayer::new(seq());
    p.advance(2.0);
    assert!(!p.is_finished());
    p.advance(0.01);
    assert!(p.is_finished());
}

#[test]
fn negative_steps_do_not_rewind() {
    let mut p = SequencePlayer::new(seq());
    p.advance(1.0);
    p.advance(-5.0);
    assert_eq!(p.clock(), 1.0);
}

#[test]
fn validate_rejects_bad_sequences() {
    seq().validate().unwrap();

    let mut s = seq();
    s.duration = 0.0;
    assert!(s.validate().is_err());

    let mut s = seq();
    s.events.swap(0, 3);
    let msg = s.validate().unwrap_err().to_string();
    assert!(msg.contains("sorted"), "{msg}");

    let mut s = seq();
    s.events[0].time = -1.0;
    assert!(s.validate().is_err());

    let mut s = seq();
    s.events[3].time = 3.0;
    assert!(s.validate().is_err());
}

#[test]
fn deserializes_override_key() {
    let s: Sequence = serde_json::from_value(json!({
        "duration": 1.0,
        "events": [
            {"time": 0.0, "x": 1, "y": 2},
            {"time": 0.5, "x": 3, "y": 4, "override": [{"speed": 90.0}, {}]}
        ]
    }))
    .unwrap();
    assert!(s.events[0].overrides.is_none());
    let o = s.events[1].overrides.as_ref().unwrap();
    assert_eq!(o.wave_types.len(), 2);
    assert_eq!(o.wave_types[0].speed, Some(90.0));
    assert!(o.wave_types[1].is_empty());
}
