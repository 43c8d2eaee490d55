use super::provinces::Province;
use super::BoundaryError;
use geo::{Coord, LineString};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Property keys checked, in order, for a feature's region name.
const NAME_KEYS: [&str; 4] = ["SIG_KOR_NM", "sggnm", "name", "adm_nm"];

#[derive(Debug, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub properties: Map<String, Value>,
    pub geometry: Option<Geometry>,
}

/// `[x, y]` with any extra ordinates ignored.
type Position = Vec<f64>;

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Polygon {
        coordinates: Vec<Vec<Position>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Position>>>,
    },
    #[serde(other)]
    Unsupported,
}

impl Feature {
    pub fn region_name(&self) -> Option<&str> {
        NAME_KEYS.iter().find_map(|key| {
            self.properties
                .get(*key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|name| !name.is_empty())
        })
    }

    /// Outer ring of every polygon; holes are not drawn.
    pub fn outer_rings(&self) -> Vec<LineString<f64>> {
        match &self.geometry {
            Some(Geometry::Polygon { coordinates }) => {
                coordinates.first().map(|ring| to_ring(ring)).into_iter().collect()
            }
            Some(Geometry::MultiPolygon { coordinates }) => coordinates
                .iter()
                .filter_map(|polygon| polygon.first())
                .map(|ring| to_ring(ring))
                .collect(),
            Some(Geometry::Unsupported) | None => Vec::new(),
        }
    }
}

fn to_ring(positions: &[Position]) -> LineString<f64> {
    positions
        .iter()
        .filter_map(|position| match position.as_slice() {
            [x, y, ..] => Some(Coord { x: *x, y: *y }),
            _ => None,
        })
        .collect()
}

pub fn parse_feature_collection(bytes: &[u8]) -> Result<FeatureCollection, BoundaryError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Where province boundary documents come from.
pub trait BoundarySource {
    fn fetch(
        &self,
        province: &Province,
    ) -> impl Future<Output = Result<FeatureCollection, BoundaryError>> + Send;
}

/// Fetches one GeoJSON document per province from a URL template.
#[derive(Debug, Clone)]
pub struct HttpBoundarySource {
    client: reqwest::Client,
    url_template: String,
}

impl HttpBoundarySource {
    pub fn new(url_template: impl Into<String>, timeout: Duration) -> Result<Self, BoundaryError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url_template: url_template.into(),
        })
    }

    pub fn url_for(&self, province: &Province) -> String {
        self.url_template.replace("{province}", province.name)
    }
}

impl BoundarySource for HttpBoundarySource {
    async fn fetch(&self, province: &Province) -> Result<FeatureCollection, BoundaryError> {
        let url = self.url_for(province);
        debug!(%url, "fetching province boundary");

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let body = response.bytes().await?;
        parse_feature_collection(&body)
    }
}
