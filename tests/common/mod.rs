//! Common test utilities and helpers
#![allow(dead_code)]

use statmerge::artifact::{decode_object, encode_object, Artifact};
use statmerge::objects::{Axis, Efficiency, Histogram, StatObject};
use std::collections::BTreeMap;
use std::path::Path;

pub const STATS_DIR: &str = "EventCategorizer subtask 0 stats";

/// Objects a single worker would produce, varied by `seed`.
///
/// Values are integers so sums are exact regardless of merge order.
pub fn worker_objects(seed: u64) -> BTreeMap<String, StatObject> {
    let mut delta_phi = Histogram::new_1d("Delta phi", Axis::new(181, -0.5, 180.5));
    for k in 0..(5 + seed) {
        delta_phi.fill(((seed * 37 + k * 11) % 180) as f64, 1.0);
    }

    let mut hits = Histogram::new_1d("Found hits", Axis::new(20, -0.5, 19.5));
    for k in 0..(3 + seed) {
        hits.fill(((seed + k) % 6) as f64, 1.0);
    }

    let mut theta = Histogram::new_2d(
        "Theta 1 vs theta 2",
        Axis::new(18, 0.0, 180.0),
        Axis::new(18, 0.0, 180.0),
    );
    for k in 0..4 {
        theta.fill_2d(((seed * 13 + k * 20) % 180) as f64, (k * 40) as f64, 1.0);
    }

    let mut efficiency = Efficiency::new("Selection efficiency", Axis::new(4, 0.0, 4.0));
    for k in 0..(6 + seed) {
        efficiency.fill((seed + k) % 3 != 0, (k % 4) as f64);
    }

    let mut objects = BTreeMap::new();
    objects.insert(
        "CF2G4H2SH_DeltaPhi".to_string(),
        StatObject::Histogram1D(delta_phi),
    );
    objects.insert("CHMN_FoundHitsSize".to_string(), StatObject::Histogram1D(hits));
    objects.insert("CF2G4H2SH_Theta1Theta2".to_string(), StatObject::Histogram2D(theta));
    objects.insert(
        "effSelection".to_string(),
        StatObject::EfficiencyCurve(efficiency),
    );
    objects
}

/// Write `objects` as an artifact under the default stats directory.
pub fn write_artifact(path: &Path, objects: &BTreeMap<String, StatObject>) {
    let mut artifact = Artifact::new();
    for (name, object) in objects {
        artifact.insert(STATS_DIR, name.clone(), encode_object(object));
    }
    artifact.write(path).unwrap();
}

/// Write one artifact per seed as `worker_<seed>.cat.evt.json`.
pub fn write_workers(dir: &Path, seeds: &[u64]) {
    for seed in seeds {
        write_artifact(
            &dir.join(format!("worker_{:03}.cat.evt.json", seed)),
            &worker_objects(*seed),
        );
    }
}

/// Decode every object of the stats directory of `path`.
pub fn read_objects(path: &Path) -> BTreeMap<String, StatObject> {
    let artifact = Artifact::read(path).unwrap();
    artifact
        .directory(STATS_DIR)
        .unwrap()
        .iter()
        .map(|(name, raw)| {
            (
                name.clone(),
                decode_object(name, raw.clone(), "eff").unwrap(),
            )
        })
        .collect()
}

/// Combine the objects of several workers in memory.
pub fn expected_sum(seeds: &[u64]) -> BTreeMap<String, StatObject> {
    let mut iter = seeds.iter();
    let mut total = worker_objects(*iter.next().unwrap());
    for seed in iter {
        for (name, object) in worker_objects(*seed) {
            total.get_mut(&name).unwrap().combine(&object).unwrap();
        }
    }
    total
}
