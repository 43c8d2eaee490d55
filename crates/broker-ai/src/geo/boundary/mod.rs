//! Offline generator for the province map cards.
//!
//! Each province's GeoJSON is fetched, every region's outer rings are
//! thinned ([`sample_ring`]) and simplified ([`simplify`]), projected into a
//! per-province view box, and emitted as SVG path data. A province that fails
//! to fetch or parse is logged and skipped; the rest of the batch continues.

mod output;
mod provinces;
mod source;

pub use output::{render, write_output, OutputFormat};
pub use provinces::{find_province, Province, PROVINCES};
pub use source::{
    parse_feature_collection, BoundarySource, Feature, FeatureCollection, Geometry,
    HttpBoundarySource,
};

use crate::config::BoundaryConfig;
use crate::geo::{combined_bounds, ring_to_path, sample_ring, simplify, Projection};
use geo::{MultiPolygon, Polygon};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum BoundaryError {
    #[error("boundary request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("boundary document is not valid GeoJSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("no drawable regions for {province}")]
    Empty { province: String },
    #[error("none of the {attempted} requested provinces produced an outline")]
    NothingGenerated { attempted: usize },
    #[error("failed to write generated maps: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimplifyOptions {
    pub epsilon: f64,
    pub max_points: usize,
    pub view_size: f64,
    pub padding: f64,
}

impl Default for SimplifyOptions {
    fn default() -> Self {
        Self::from(&BoundaryConfig::default())
    }
}

impl From<&BoundaryConfig> for SimplifyOptions {
    fn from(config: &BoundaryConfig) -> Self {
        Self {
            epsilon: config.epsilon,
            max_points: config.max_points,
            view_size: config.view_size,
            padding: 4.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProvinceMap {
    #[serde(rename = "viewBox")]
    pub view_box: String,
    pub paths: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedMaps {
    pub province_maps: BTreeMap<String, ProvinceMap>,
    pub region_to_province: BTreeMap<String, String>,
    #[serde(skip)]
    pub skipped: Vec<String>,
}

impl GeneratedMaps {
    fn insert(&mut self, province: &Province, map: ProvinceMap) {
        for name in province.names() {
            self.region_to_province
                .insert(name.to_string(), province.name.to_string());
        }

        for region in map.paths.keys() {
            self.region_to_province
                .insert(format!("{} {}", province.name, region), province.name.to_string());

            let owner = self
                .region_to_province
                .entry(region.clone())
                .or_insert_with(|| province.name.to_string());
            if owner.as_str() != province.name {
                debug!(region = %region, kept = %owner, "region name shared across provinces");
            }
        }

        self.province_maps.insert(province.name.to_string(), map);
    }
}

/// Simplifies and projects every feature of one province.
pub fn build_province_map(
    province: &Province,
    collection: &FeatureCollection,
    options: &SimplifyOptions,
) -> Result<ProvinceMap, BoundaryError> {
    let mut regions: BTreeMap<String, MultiPolygon<f64>> = BTreeMap::new();

    for feature in &collection.features {
        let Some(name) = feature.region_name() else {
            debug!(province = province.name, "skipping unnamed feature");
            continue;
        };

        let polygons: Vec<Polygon<f64>> = feature
            .outer_rings()
            .iter()
            .map(|ring| simplify(&sample_ring(ring, options.max_points), options.epsilon))
            .filter(|ring| ring.0.len() >= 3)
            .map(|ring| Polygon::new(ring, vec![]))
            .collect();

        if polygons.is_empty() {
            debug!(province = province.name, region = name, "region collapsed during simplification");
            continue;
        }

        regions
            .entry(name.to_string())
            .or_insert_with(|| MultiPolygon::new(Vec::new()))
            .0
            .extend(polygons);
    }

    let bounds = combined_bounds(regions.values()).ok_or_else(|| BoundaryError::Empty {
        province: province.name.to_string(),
    })?;
    let projection = Projection::fit(bounds, options.view_size, options.padding);

    let paths = regions
        .into_iter()
        .filter_map(|(name, region)| {
            let subpaths: Vec<String> = projection
                .apply(&region)
                .0
                .iter()
                .filter_map(|polygon| ring_to_path(polygon.exterior()))
                .collect();
            (!subpaths.is_empty()).then(|| (name, subpaths.join(" ")))
        })
        .collect();

    Ok(ProvinceMap {
        view_box: projection.view_box(),
        paths,
    })
}

/// Runs provinces one after another against a [`BoundarySource`].
pub struct BoundaryMapGenerator<S> {
    source: S,
    options: SimplifyOptions,
}

impl<S: BoundarySource> BoundaryMapGenerator<S> {
    pub fn new(source: S, options: SimplifyOptions) -> Self {
        Self { source, options }
    }

    /// Errors with [`BoundaryError::NothingGenerated`] when no province could
    /// be drawn; individual failures are only logged and listed in `skipped`.
    pub async fn generate(&self, provinces: &[Province]) -> Result<GeneratedMaps, BoundaryError> {
        let mut maps = GeneratedMaps::default();

        for province in provinces {
            match self.generate_one(province).await {
                Ok(map) => {
                    info!(
                        province = province.name,
                        regions = map.paths.len(),
                        "province outline generated"
                    );
                    maps.insert(province, map);
                }
                Err(err) => {
                    warn!(province = province.name, error = %err, "skipping province");
                    maps.skipped.push(province.name.to_string());
                }
            }
        }

        if maps.province_maps.is_empty() {
            return Err(BoundaryError::NothingGenerated {
                attempted: provinces.len(),
            });
        }
        Ok(maps)
    }

    async fn generate_one(&self, province: &Province) -> Result<ProvinceMap, BoundaryError> {
        let collection = self.source.fetch(province).await?;
        build_province_map(province, &collection, &self.options)
    }
}
