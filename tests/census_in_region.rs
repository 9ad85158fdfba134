use fungi_atlas::region::{records_in_region, species_in_region, RegionGeometry};
use fungi_atlas::search::{autocomplete, free_search};
use fungi_atlas::{point_in_region, Census, Region, RegionError};

const CENSUS: &str = r#"{
    "title": "Alta Val Seriana",
    "totalSpecies": 3,
    "totalSamples": 4,
    "species": [
        {
            "genus": "Amanita",
            "species": "muscaria",
            "fullName": "Amanita muscaria",
            "lineage": "Regnum: Fungi > Ordo: Agaricales > Familia: Amanitaceae",
            "campioniRaccolti": [
                { "localityCoordinates": "45.88196, 9.91806", "locality": "Pineta della Selva, Clusone" }
            ]
        },
        {
            "genus": "Boletus",
            "species": "edulis",
            "fullName": "Boletus edulis",
            "lineage": "Regnum: Fungi > Ordo: Boletales > Familia: Boletaceae",
            "campioniRaccolti": [
                { "localityCoordinates": "not-a-number, 9.9" },
                { "localityCoordinates": "45.90, 9.95" }
            ]
        },
        {
            "genus": "Russula",
            "species": "emetica",
            "fullName": "Russula emetica",
            "lineage": "Regnum: Fungi > Ordo: Russulales > Familia: Russulaceae",
            "campioniRaccolti": [
                { "localityCoordinates": "46.10, 8.69" }
            ]
        }
    ]
}"#;

/// Rough box around Clusone, as a FeatureCollection with a decoy second feature
const CLUSONE: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "properties": { "name": "Clusone" },
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[9.85, 45.85], [10.00, 45.85], [10.00, 45.95], [9.85, 45.95], [9.85, 45.85]]]
            }
        },
        {
            "type": "Feature",
            "properties": { "name": "Lago Maggiore" },
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[8.60, 46.00], [8.80, 46.00], [8.80, 46.20], [8.60, 46.20]]]
            }
        }
    ]
}"#;

#[test]
fn species_inside_first_feature_only() {
    let census: Census = serde_json::from_str(CENSUS).unwrap();
    let region = RegionGeometry::from_json(CLUSONE).unwrap();

    let names: Vec<&str> = species_in_region(&census.species, &region)
        .unwrap()
        .map(|sp| sp.full_name.as_str())
        .collect();
    assert_eq!(names, vec!["Amanita muscaria", "Boletus edulis"]);

    // Inside the second feature only
    assert!(!point_in_region(46.10, 8.69, &region).unwrap());
}

#[test]
fn malformed_specimen_is_skipped() {
    let census: Census = serde_json::from_str(CENSUS).unwrap();
    let region = RegionGeometry::from_json(CLUSONE).unwrap();

    let boletus = &census.species[1];
    let inside: Vec<_> = records_in_region(&boletus.specimens, &region)
        .unwrap()
        .collect();
    assert_eq!(inside.len(), 1);
    assert_eq!(inside[0].locality_coordinates, "45.90, 9.95");
}

#[test]
fn resolved_region_filters_specimens() {
    let census: Census = serde_json::from_str(CENSUS).unwrap();
    let region = Region::from_geojson_str(CLUSONE).unwrap();

    let total: usize = census
        .species
        .iter()
        .map(|sp| region.filter(&sp.specimens).count())
        .sum();
    assert_eq!(total, 2);
}

#[test]
fn search_then_filter_by_region() {
    let census: Census = serde_json::from_str(CENSUS).unwrap();
    let region = Region::from_geojson_str(CLUSONE).unwrap();

    let found: Vec<&str> = free_search(&census.species, "fungi")
        .into_iter()
        .filter(|sp| sp.specimens.iter().any(|s| region.contains_record(s)))
        .map(|sp| sp.full_name.as_str())
        .collect();
    assert_eq!(found.len(), 2);

    assert_eq!(autocomplete(&census.species, "russ"), vec!["Russula", "Russulales", "Russulaceae"]);
}

#[test]
fn unsupported_payload_is_a_typed_error() {
    let err = Region::from_geojson_str(r#"{"type": "GeometryCollection", "geometries": []}"#)
        .unwrap_err();
    assert!(matches!(err, RegionError::InvalidGeometry(_)));
}
