use super::*;
use crate::animation::action::Effect;

#[test]
fn cascade_offsets_are_index_times_stagger() {
    let pairs = cascade(["a", "b", "c"], |id| AnimationAction::fade_in(id, 1.0), 0.25);
    let offsets: Vec<f64> = pairs.iter().map(|(o, _)| *o).collect();
    assert_eq!(offsets, vec![0.0, 0.25, 0.5]);
    let targets: Vec<&str> = pairs.iter().map(|(_, a)| a.target.as_str()).collect();
    assert_eq!(targets, vec!["a", "b", "c"]);

    let seq = sequential(vec!["x".to_string()], |id| AnimationAction::fade_out(id, 1.0), 9.0);
    assert_eq!(seq[0].0, 0.0);
    assert!(cascade(Vec::<String>::new(), |id| AnimationAction::fade_in(id, 1.0), 1.0).is_empty());
}

#[test]
fn builder_collects_steps_in_order() {
    let script = Script::new()
        .play([AnimationAction::fade_in("node1", 1.0)], 1.5)
        .wait(0.5)
        .play(
            cascade(["n1", "n2"], |id| AnimationAction::highlight(id, 0.3), 0.1),
            1.0,
        );
    assert_eq!(script.steps.len(), 3);
    assert_eq!(script.steps[1], Step::Wait { duration: 0.5 });
    let Step::Play { cues, duration } = &script.steps[2] else {
        panic!("expected play");
    };
    assert_eq!(*duration, 1.0);
    assert!(matches!(&cues[1], Cue::At { offset, .. } if (*offset - 0.1).abs() < 1e-12));
}

#[test]
fn scripts_load_from_json() {
    let json = r#"{
        "steps": [
            {"play": {"duration": 1.5, "cues": [
                {"action": {"target": "node1", "duration": 1.0, "kind": "fade_in"}}
            ]}},
            {"wait": {"duration": 0.5}},
            {"play": {"duration": 2.0, "cues": [
                {"cascade": {
                    "selection": "nodes",
                    "template": {"duration": 0.5, "kind": "scale_to", "scale": 1.2},
                    "stagger": 0.2
                }},
                {"sequential": {
                    "selection": {"explicit": ["a", "b"]},
                    "template": {"duration": 0.5, "kind": "fade_out"},
                    "delay": 0.1
                }}
            ]}}
        ]
    }"#;
    let script = Script::from_json(json).unwrap();
    assert_eq!(script.steps.len(), 3);
    let Step::Play { cues, .. } = &script.steps[2] else {
        panic!("expected play");
    };
    match &cues[0] {
        Cue::Cascade {
            selection,
            template,
            stagger,
        } => {
            assert_eq!(*selection, Selection::Nodes);
            assert!(selection.is_derived());
            assert_eq!(template.effect, Effect::ScaleTo { scale: 1.2 });
            assert_eq!(*stagger, 0.2);
        }
        other => panic!("unexpected cue {other:?}"),
    }

    let again = Script::from_json(&script.to_json().unwrap()).unwrap();
    assert_eq!(again, script);
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = Script::from_json(r#"{"steps": [{"jump": {}}]}"#).unwrap_err();
    assert!(matches!(err, MotionError::Serde(_)));
}
