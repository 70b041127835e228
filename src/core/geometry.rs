use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::core::GeoPoint;
use crate::error::{GlobeError, GlobeResult};

/// One polygon: outer ring first, holes after.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoPolygon {
    pub rings: SmallVec<[Vec<GeoPoint>; 1]>,
}

impl GeoPolygon {
    #[must_use]
    pub fn from_outer(outer: Vec<GeoPoint>) -> Self {
        let mut rings = SmallVec::new();
        rings.push(outer);
        Self { rings }
    }
}

/// Immutable country record.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoFeature {
    name: String,
    key: String,
    polygons: Vec<GeoPolygon>,
}

impl GeoFeature {
    #[must_use]
    pub fn new(name: impl Into<String>, polygons: Vec<GeoPolygon>) -> Self {
        let name = name.into();
        let key = name.to_uppercase();
        Self {
            name,
            key,
            polygons,
        }
    }

    /// Display name as shipped in the asset.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Uppercase lookup key shared with selection and measure maps.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn polygons(&self) -> &[GeoPolygon] {
        &self.polygons
    }
}

/// Country geometry for one visualization instance plus its name index.
///
/// The index is built once per load; per-frame code only walks `features`.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldGeometry {
    features: Vec<GeoFeature>,
    index: IndexMap<String, usize>,
}

#[derive(Debug, Deserialize)]
struct FeatureCollectionDoc {
    #[serde(default)]
    features: Vec<FeatureDoc>,
}

#[derive(Debug, Deserialize)]
struct FeatureDoc {
    #[serde(default)]
    properties: Option<Value>,
    #[serde(default)]
    geometry: Option<Value>,
}

impl WorldGeometry {
    pub fn from_features(features: Vec<GeoFeature>) -> GlobeResult<Self> {
        if features.is_empty() {
            return Err(GlobeError::GeometryAsset(
                "geometry contains no features".to_owned(),
            ));
        }
        let index = features
            .iter()
            .enumerate()
            .map(|(position, feature)| (feature.key.clone(), position))
            .collect();
        Ok(Self { features, index })
    }

    /// Parses a GeoJSON `FeatureCollection` whose features carry
    /// `properties.name` and a `Polygon` or `MultiPolygon` geometry.
    pub fn from_geojson_str(input: &str) -> GlobeResult<Self> {
        let doc: FeatureCollectionDoc = serde_json::from_str(input)
            .map_err(|err| GlobeError::GeometryAsset(format!("malformed geojson: {err}")))?;

        let total = doc.features.len();
        let mut skipped = 0usize;
        let mut features = Vec::with_capacity(total);
        for feature in doc.features {
            let name = feature
                .properties
                .as_ref()
                .and_then(|properties| properties.get("name"))
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|name| !name.is_empty());
            let polygons = feature.geometry.as_ref().map(parse_geometry);
            match (name, polygons) {
                (Some(name), Some(polygons)) if !polygons.is_empty() => {
                    features.push(GeoFeature::new(name, polygons));
                }
                _ => skipped += 1,
            }
        }

        if skipped > 0 {
            warn!(total, skipped, "skipped unusable geometry features");
        }
        debug!(features = features.len(), "loaded country geometry");
        Self::from_features(features)
    }

    #[must_use]
    pub fn features(&self) -> &[GeoFeature] {
        &self.features
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    #[must_use]
    pub fn feature(&self, key: &str) -> Option<&GeoFeature> {
        self.index
            .get(key)
            .and_then(|&position| self.features.get(position))
    }
}

fn parse_geometry(geometry: &Value) -> Vec<GeoPolygon> {
    let coordinates = geometry.get("coordinates");
    match (geometry.get("type").and_then(Value::as_str), coordinates) {
        (Some("Polygon"), Some(coordinates)) => parse_polygon(coordinates).into_iter().collect(),
        (Some("MultiPolygon"), Some(Value::Array(polygons))) => {
            polygons.iter().filter_map(parse_polygon).collect()
        }
        _ => Vec::new(),
    }
}

fn parse_polygon(value: &Value) -> Option<GeoPolygon> {
    let rings: SmallVec<[Vec<GeoPoint>; 1]> = value
        .as_array()?
        .iter()
        .filter_map(parse_ring)
        .collect();
    (!rings.is_empty()).then_some(GeoPolygon { rings })
}

fn parse_ring(value: &Value) -> Option<Vec<GeoPoint>> {
    let ring: Vec<GeoPoint> = value
        .as_array()?
        .iter()
        .filter_map(|position| {
            let position = position.as_array()?;
            let lon = position.first()?.as_f64()?;
            let lat = position.get(1)?.as_f64()?;
            (lon.is_finite() && lat.is_finite()).then_some(GeoPoint::new(lon, lat))
        })
        .collect();
    (ring.len() >= 3).then_some(ring)
}

#[cfg(test)]
mod tests {
    use super::WorldGeometry;

    #[test]
    fn loads_polygon_and_multipolygon_features() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"name": "Alpha"},
                 "geometry": {"type": "Polygon", "coordinates": [[[0,0],[10,0],[10,10],[0,0]]]}},
                {"type": "Feature", "properties": {"name": "Beta"},
                 "geometry": {"type": "MultiPolygon", "coordinates": [
                    [[[20,0],[30,0],[30,10],[20,0]]],
                    [[[40,0],[50,0,12.5],[50,10],[40,0]]]
                 ]}},
                {"type": "Feature", "properties": {}, "geometry": null}
            ]
        }"#;

        let world = WorldGeometry::from_geojson_str(json).expect("geometry");
        assert_eq!(world.len(), 2);
        assert_eq!(world.feature("ALPHA").map(|f| f.name()), Some("Alpha"));
        assert_eq!(world.feature("BETA").map(|f| f.polygons().len()), Some(2));
        assert!(!world.contains_key("Alpha"));
    }

    #[test]
    fn empty_or_broken_assets_are_errors() {
        assert!(WorldGeometry::from_geojson_str("{\"features\": []}").is_err());
        assert!(WorldGeometry::from_geojson_str("not json").is_err());
    }
}
