use super::*;

fn sample_shape() -> ShapeRecord {
    ShapeRecord {
        kind: ShapeKind::Triangle,
        shape_size: 215.0,
        transparency: 255.0,
        rotation: 0.0,
        contraction: 1.0,
        stretched: 1.0,
        round: 10,
        blur: 0,
        dispersion: 50,
        depth: 0,
        x: 400.0,
        y: 400.0,
        selected: true,
    }
}

// =============================================================
// ShapeKind / DistanceDirection
// =============================================================

#[test]
fn shape_kind_serializes_lowercase() {
    let json = serde_json::to_string(&ShapeKind::Circle).expect("serialize");
    assert_eq!(json, "\"circle\"");
}

#[test]
fn shape_kind_parse_accepts_wire_names() {
    for kind in ShapeKind::ALL {
        assert_eq!(ShapeKind::parse(kind.as_str()), Some(kind));
    }
    assert_eq!(ShapeKind::parse(" Square "), Some(ShapeKind::Square));
    assert_eq!(ShapeKind::parse("hexagon"), None);
}

#[test]
fn distance_direction_defaults_to_horizontal() {
    assert_eq!(DistanceDirection::default(), DistanceDirection::Horizontal);
    assert_eq!(DistanceDirection::Vertical.as_str(), "vertical");
}

// =============================================================
// Records
// =============================================================

#[test]
fn shape_record_uses_type_key_and_camel_case() {
    let value = serde_json::to_value(sample_shape()).expect("serialize");
    assert_eq!(value["type"], "triangle");
    assert_eq!(value["shapeSize"], 215.0);
    assert_eq!(value["dispersion"], 50);
    assert!(value.get("kind").is_none());
}

#[test]
fn slider_params_entries_follow_slider_order() {
    let params = SliderParams { shape_size: 1, depth: 9, ..SliderParams::default() };
    let entries = params.entries();
    assert_eq!(entries[0], ("shapeSize", 1));
    assert_eq!(entries[9], ("depth", 9));
    assert_eq!(entries[8].0, "scatter");
}

#[test]
fn poster_decodes_reference_shaped_json() {
    let raw = r##"{
        "emotion": "Happy",
        "reason": "friends",
        "color": "#5D9B2F",
        "img": "Happy_friends_canvas_2025-01-01T00-00-00",
        "imgRoute": "https://files.example/abc.png",
        "shapes": [{
            "type": "circle", "shapeSize": 30, "transparency": 255, "rotation": 0,
            "contraction": 1, "stretched": 1, "round": 0, "blur": 0,
            "dispersion": 0, "depth": 0, "x": 400, "y": 400, "selected": false
        }],
        "sliderParams": {"shapeSize": 0, "scatter": 20},
        "distanceDirection": "vertical",
        "createdAt": "2025-01-01T00:00:00.000Z",
        "source": "canvas"
    }"##;
    let poster = Poster::from_json(raw).expect("decode");
    assert!(poster.is_canvas());
    assert_eq!(poster.shapes.len(), 1);
    assert_eq!(poster.shapes[0].kind, ShapeKind::Circle);
    assert_eq!(poster.slider_params.scatter, 20);
    assert_eq!(poster.slider_params.depth, 0);
    assert_eq!(poster.distance_direction, DistanceDirection::Vertical);
    assert_eq!(poster.img_route, "https://files.example/abc.png");
}

#[test]
fn poster_missing_fields_fall_back_to_defaults() {
    let poster = Poster::from_json(r#"{"emotion":"Sad"}"#).expect("decode");
    assert_eq!(poster.emotion, "Sad");
    assert!(poster.shapes.is_empty());
    assert!(!poster.is_canvas());
}

#[test]
fn parse_posters_rejects_malformed_json() {
    let err = parse_posters("[{").expect_err("should fail");
    assert!(matches!(err, PosterError::Decode(_)));
}

// =============================================================
// File names
// =============================================================

#[test]
fn file_name_sanitizes_and_trims_timestamp() {
    let name = poster_file_name("Very Happy", "my dog!", "2025-03-04T05:06:07.890Z");
    assert_eq!(name, "Very_Happy_my_dog__canvas_2025-03-04T05-06-07");
}

#[test]
fn file_name_uses_unknown_for_empty_segments() {
    let name = poster_file_name("", "", "2025-03-04T05:06:07.890Z");
    assert!(name.starts_with("unknown_unknown_canvas_"));
}

#[test]
fn file_name_tolerates_short_timestamp() {
    assert_eq!(poster_file_name("a", "b", "123"), "a_b_canvas_");
}
