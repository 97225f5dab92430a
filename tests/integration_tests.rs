// Integration tests for EcoTrack

use ecotrack::core::{
    all_facets, category_compatible, classify, ImageLabels, ImageTag, LocationSearch, MaterialType,
    NearbySearch,
};
use ecotrack::models::{GeoPoint, Location, MaterialAcceptance, MaterialKey};

fn create_test_location(
    id: i64,
    name: &str,
    city: &str,
    location_type: &str,
    lat: f64,
    lon: f64,
    accepts: &[MaterialKey],
) -> Location {
    Location {
        id,
        latitude: lat,
        longitude: lon,
        name: name.to_string(),
        municipality: None,
        city: Some(city.to_string()),
        location_type: Some(location_type.to_string()),
        operation: Some("Mon-Fri 08:00-17:00".to_string()),
        website: None,
        other: None,
        group_name: None,
        is_dropoff_site: location_type == "Drop-off",
        is_paid: false,
        accepted_materials: MaterialAcceptance::of(accepts),
        created_at: None,
        updated_at: None,
    }
}

fn gauteng_locations() -> Vec<Location> {
    vec![
        create_test_location(1, "Braamfontein Drop-off", "Johannesburg", "Drop-off", -26.1929, 28.0305, &[MaterialKey::Plastic, MaterialKey::Paper, MaterialKey::Cans]),
        create_test_location(2, "Rosebank Buy-Back", "Johannesburg", "Buy-Back Centre", -26.1467, 28.0436, &[MaterialKey::Cans, MaterialKey::Metal]),
        create_test_location(3, "Marshalltown eDrop", "Johannesburg", "eDrop_off", -26.2069, 28.0410, &[MaterialKey::Ewaste]),
        create_test_location(4, "Hatfield Drop-off", "Pretoria", "Drop-off", -25.7487, 28.2380, &[MaterialKey::Plastic, MaterialKey::MotorOil]),
        create_test_location(5, "Soweto Drop-off", "Soweto", "Drop-off", -26.2485, 27.8540, &[MaterialKey::Paper, MaterialKey::Cardboard]),
    ]
}

fn johannesburg_cbd() -> GeoPoint {
    GeoPoint::new(-26.2041, 28.0473)
}

#[test]
fn test_integration_nearby_search_ranks_by_distance() {
    let search = LocationSearch::default();

    let result = search.find_nearby(&NearbySearch::new(johannesburg_cbd()), gauteng_locations());

    assert_eq!(result.total_candidates, 5);
    let ids: Vec<i64> = result.locations.iter().map(|r| r.location.id).collect();
    assert_eq!(ids, vec![3, 1, 2]);
    assert!(result.locations.windows(2).all(|w| w[0].distance <= w[1].distance));
    assert!(result.locations.iter().all(|r| r.distance <= 10.0));
}

#[test]
fn test_integration_nearby_search_with_filters() {
    let search = LocationSearch::default();

    let query = NearbySearch::new(johannesburg_cbd())
        .radius(100.0)
        .location_type("Drop-off")
        .materials(MaterialAcceptance::of(&[MaterialKey::Plastic]));
    let result = search.find_nearby(&query, gauteng_locations());

    let ids: Vec<i64> = result.locations.iter().map(|r| r.location.id).collect();
    assert_eq!(ids, vec![1, 4]);
}

#[test]
fn test_integration_nearby_search_no_match() {
    let search = LocationSearch::default();
    let cape_town = GeoPoint::new(-33.9249, 18.4241);

    let result = search.find_nearby(&NearbySearch::new(cape_town).radius(50.0), gauteng_locations());

    assert!(result.locations.is_empty());
    assert_eq!(result.total_candidates, 5);
}

#[test]
fn test_integration_facets_over_collection() {
    let facets = all_facets(&gauteng_locations());

    let cities: Vec<&str> = facets.cities.iter().map(|f| f.label.as_str()).collect();
    assert_eq!(cities, vec!["Johannesburg", "Pretoria", "Soweto"]);

    let types: Vec<&str> = facets.facility_types.iter().map(|f| f.value.as_str()).collect();
    assert_eq!(types, vec!["buy-backcentre", "drop-off", "edrop_off"]);

    let materials: Vec<&str> = facets.materials.iter().map(|f| f.value.as_str()).collect();
    assert_eq!(
        materials,
        vec!["plastic", "paper", "cardboard", "cans", "ewaste", "metal", "motorOil"]
    );
}

#[test]
fn test_integration_facets_serialize_camel_case() {
    let json = serde_json::to_value(all_facets(&gauteng_locations())).unwrap();

    assert!(json.get("facilityTypes").is_some());
    assert_eq!(json["materials"][0]["label"], "Plastic");
}

#[test]
fn test_integration_ranked_location_json_shape() {
    let search = LocationSearch::default();
    let result = search.find_nearby(&NearbySearch::new(johannesburg_cbd()), gauteng_locations());

    let json = serde_json::to_value(&result.locations[0]).unwrap();
    assert_eq!(json["id"], 3);
    assert_eq!(json["type"], "eDrop_off");
    assert_eq!(json["acceptedMaterials"]["ewaste"], true);
    assert_eq!(json["acceptedMaterials"]["plastic"], false);
    assert!(json["distance"].as_f64().unwrap() < 1.0);
}

#[test]
fn test_integration_image_classification_to_locations() {
    let labels = ImageLabels {
        tags: vec![
            ImageTag { name: "laptop".to_string(), confidence: 0.92 },
            ImageTag { name: "desk".to_string(), confidence: 0.55 },
        ],
        objects: vec![],
    };

    let classification = classify(&labels, 0.6);
    assert_eq!(classification.material, MaterialType::Electronic);
    assert_eq!(classification.material.waste_category_name(), "e-waste");

    let search = LocationSearch::default();
    let nearby = search.find_nearby(&NearbySearch::new(johannesburg_cbd()), gauteng_locations());
    let compatible: Vec<i64> = nearby
        .locations
        .iter()
        .filter(|r| {
            category_compatible(classification.material.as_str(), None, &r.location.accepted_materials)
        })
        .map(|r| r.location.id)
        .collect();

    assert_eq!(compatible, vec![3]);
}

#[test]
fn test_integration_unrecognised_image() {
    let labels = ImageLabels {
        tags: vec![ImageTag { name: "sky".to_string(), confidence: 0.99 }],
        objects: vec![vec![ImageTag { name: "cloud".to_string(), confidence: 0.7 }]],
    };

    let classification = classify(&labels, 0.6);
    assert_eq!(classification.material, MaterialType::Unknown);
    assert!(!classification.is_recyclable());
    assert_eq!(classification.detected_objects, vec!["sky", "cloud"]);
    assert_eq!(classification.material.waste_category_name(), "general waste");
}
