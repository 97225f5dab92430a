// Criterion benchmarks for EcoTrack

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ecotrack::core::{all_facets, distance::distance_km, LocationSearch, NearbySearch};
use ecotrack::models::{GeoPoint, Location, MaterialAcceptance, MaterialKey};

const TYPES: [&str; 4] = ["Drop-off", "Buy-Back Centre", "eDrop_off", "Swap Shop"];
const CITIES: [&str; 5] = ["Johannesburg", "Pretoria", "Soweto", "Cape Town", "Durban"];

fn create_location(id: usize, lat: f64, lon: f64) -> Location {
    let accepts: Vec<MaterialKey> = MaterialKey::ALL
        .into_iter()
        .enumerate()
        .filter(|(i, _)| (id + i) % 3 == 0)
        .map(|(_, m)| m)
        .collect();

    Location {
        id: id as i64,
        latitude: lat,
        longitude: lon,
        name: format!("Facility {}", id),
        municipality: None,
        city: Some(CITIES[id % CITIES.len()].to_string()),
        location_type: Some(TYPES[id % TYPES.len()].to_string()),
        operation: None,
        website: None,
        other: None,
        group_name: None,
        is_dropoff_site: id % 2 == 0,
        is_paid: false,
        accepted_materials: MaterialAcceptance::of(&accepts),
        created_at: None,
        updated_at: None,
    }
}

fn create_locations(count: usize) -> Vec<Location> {
    (0..count)
        .map(|i| {
            let lat = -26.2041 + ((i % 100) as f64 - 50.0) * 0.01;
            let lon = 28.0473 + ((i / 100) as f64 - 50.0) * 0.01;
            create_location(i, lat, lon)
        })
        .collect()
}

fn bench_distance(c: &mut Criterion) {
    c.bench_function("distance_km", |b| {
        b.iter(|| {
            distance_km(
                black_box(-26.2041),
                black_box(28.0473),
                black_box(-25.7479),
                black_box(28.2293),
            )
        });
    });
}

fn bench_find_nearby(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_nearby");
    let search = LocationSearch::default();
    let query = NearbySearch::new(GeoPoint::new(-26.2041, 28.0473))
        .materials(MaterialAcceptance::of(&[MaterialKey::Plastic]));

    for size in [100, 1_000, 10_000] {
        let locations = create_locations(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &locations, |b, locations| {
            b.iter(|| search.find_nearby(black_box(&query), locations.clone()));
        });
    }

    group.finish();
}

fn bench_facets(c: &mut Criterion) {
    let locations = create_locations(5_000);

    c.bench_function("all_facets_5000", |b| {
        b.iter(|| all_facets(black_box(&locations)));
    });
}

criterion_group!(benches, bench_distance, bench_find_nearby, bench_facets);
criterion_main!(benches);
