use motionscape::{AnimationEngine, MotionKind, SceneSpec, Visual};

#[test]
fn json_fixture_validates() {
    let s = include_str!("data/demo_scene.json");
    let spec = SceneSpec::from_json(s).unwrap();
    assert_eq!(spec.fps, 30);
    assert_eq!(spec.elements.len(), 5);
    assert_eq!(spec.elements[1].motion.kind, MotionKind::Orbit);
}

#[test]
fn json_fixture_loads_into_engine_in_order() {
    let s = include_str!("data/demo_scene.json");
    let spec: SceneSpec = serde_json::from_str(s).unwrap();
    let engine = AnimationEngine::from_spec(&spec).unwrap();
    assert_eq!(engine.element_count(), 5);
    let kinds: Vec<MotionKind> = engine.snapshot().iter().map(|e| e.motion().kind).collect();
    assert_eq!(
        kinds,
        vec![
            MotionKind::Bounce,
            MotionKind::Orbit,
            MotionKind::Spiral,
            MotionKind::Random,
            MotionKind::Wave,
        ]
    );
    assert!(matches!(
        engine.snapshot().iter().nth(1).unwrap().visual(),
        Visual::Text { .. }
    ));
}

#[test]
fn spec_roundtrips_through_json() {
    let s = include_str!("data/demo_scene.json");
    let spec = SceneSpec::from_json(s).unwrap();
    let again = SceneSpec::from_json(&serde_json::to_string(&spec).unwrap()).unwrap();
    assert_eq!(spec, again);
}

#[test]
fn invalid_scene_is_rejected() {
    let err = SceneSpec::from_json(r#"{"canvas":{"width":0,"height":10}}"#).unwrap_err();
    assert!(err.to_string().contains("validation error"));

    let err = SceneSpec::from_json("{ not json").unwrap_err();
    assert!(err.to_string().contains("serialization error"));
}
