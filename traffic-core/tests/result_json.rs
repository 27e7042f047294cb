use traffic_core::{CongestionLevel, MapReference, QueryResult, TrafficAssessment};

#[test]
fn result_json_shape() {
    let result = QueryResult::new(
        TrafficAssessment {
            location: "Bengaluru, India".into(),
            lat: 12.97,
            lng: 77.59,
            congestion_level: CongestionLevel::High,
            road_color: CongestionLevel::High.road_color(),
            confidence: "High".into(),
            message: CongestionLevel::High.status_message().into(),
            explanation: "Weekday evening peak on Outer Ring Road".into(),
        },
        vec![
            MapReference {
                uri: "https://maps.google.com/?cid=2".into(),
                title: "Silk Board Junction".into(),
            },
            MapReference {
                uri: "https://maps.google.com/?cid=1".into(),
                title: "Bengaluru".into(),
            },
        ],
    );

    let json = serde_json::to_string(&result).unwrap();
    let back: QueryResult = serde_json::from_str(&json).unwrap();

    assert_eq!(back, result);
    // order is whatever the service returned
    assert_eq!(back.references[0].title, "Silk Board Junction");
}

#[test]
fn every_level_has_a_consistent_triple() {
    for level in CongestionLevel::ALL {
        let a = TrafficAssessment {
            location: "X".into(),
            lat: 1.0,
            lng: 1.0,
            congestion_level: level,
            road_color: level.road_color(),
            confidence: "Medium".into(),
            message: level.status_message().into(),
            explanation: String::new(),
        };
        assert!(a.follows_status_mapping(), "{}", level.as_str());
        assert!(!a.is_degraded());
    }
}
