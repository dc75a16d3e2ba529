use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    curves: HashMap<String, String>,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

pub mod curves {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.curves.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.curves, "curve", name)?;
        read_to_string(rel)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let rel = lookup(&MANIFEST.curves, "curve", name)?;
        super::load_json(rel)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let rel = lookup(&MANIFEST.curves, "curve", name)?;
        Ok(resolve_path(rel))
    }
}

/// Seeded pseudo-random curve synthesis.
///
/// Key `i` of `n` sits at time `i / (n - 1)` (0 for a single key) with a value
/// in [0,1) and in/out tangents `tan(u * 360deg)` for independent uniform `u`.
/// The same `(resolution, seed)` always yields the same keys.
pub mod random {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    pub const DEFAULT_SEED: u64 = 1_234_567;

    /// Build `resolution` keys, handing `(time, value, in_tangent, out_tangent)`
    /// to `make` for each one.
    pub fn random_keys<K>(
        resolution: usize,
        seed: u64,
        mut make: impl FnMut(f32, f32, f32, f32) -> K,
    ) -> Vec<K> {
        let mut rng = StdRng::seed_from_u64(seed);
        let last = resolution.saturating_sub(1).max(1) as f32;
        (0..resolution)
            .map(|i| {
                let time = i as f32 / last;
                let value: f32 = rng.gen();
                let in_tangent = random_tangent(&mut rng);
                let out_tangent = random_tangent(&mut rng);
                make(time, value, in_tangent, out_tangent)
            })
            .collect()
    }

    fn random_tangent(rng: &mut StdRng) -> f32 {
        (rng.gen::<f32>() * 360.0).to_radians().tan()
    }

    /// `count` evenly spaced query times covering `[start, end]` inclusive.
    pub fn even_times(start: f32, end: f32, count: usize) -> Vec<f32> {
        match count {
            0 => Vec::new(),
            1 => vec![start],
            _ => {
                let step = (end - start) / (count - 1) as f32;
                (0..count)
                    .map(|i| if i + 1 == count { end } else { start + step * i as f32 })
                    .collect()
            }
        }
    }

}
