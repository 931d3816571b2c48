use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, warn};
use crate::{
    error::{ExplorerError, Result},
    rules::NameNormalizer,
};

/// A displayable country boundary. The shape is kept as the raw GeoJSON
/// geometry (or TopoJSON arc references) for whatever renders it.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryShape {
    pub name: String,
    /// Spelling found in the source file before normalization.
    pub source_name: String,
    pub geometry: Value,
}

/// Countries to display, keyed by canonical name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometrySet {
    shapes: BTreeMap<String, CountryShape>,
}

impl GeometrySet {
    /// Read a GeoJSON `FeatureCollection` or a TopoJSON `Topology` with a
    /// `countries` object.
    pub fn from_document(document: &Value, normalizer: &NameNormalizer) -> Result<Self> {
        let features = match document.get("type").and_then(Value::as_str) {
            Some("FeatureCollection") => document
                .get("features")
                .and_then(Value::as_array)
                .ok_or_else(|| ExplorerError::Data("FeatureCollection has no features array".into()))?
                .iter()
                .map(|feature| (feature, feature.get("geometry").cloned().unwrap_or(Value::Null)))
                .collect::<Vec<_>>(),
            Some("Topology") => document
                .pointer("/objects/countries/geometries")
                .and_then(Value::as_array)
                .ok_or_else(|| ExplorerError::Data("Topology has no objects.countries.geometries".into()))?
                .iter()
                .map(|geometry| (geometry, geometry.clone()))
                .collect::<Vec<_>>(),
            other => {
                return Err(ExplorerError::Data(format!(
                    "unsupported geometry document type: {:?}",
                    other
                )))
            }
        };

        let mut set = GeometrySet::default();
        for (feature, geometry) in features {
            let Some(source_name) = feature.pointer("/properties/name").and_then(Value::as_str) else {
                warn!("Skipping geometry feature without properties.name");
                continue;
            };
            set.insert(normalizer, source_name, geometry);
        }

        debug!("Loaded geometry for {} countries", set.len());
        Ok(set)
    }

    /// Add a shape under its normalized name. Returns `false` when the
    /// country was already present; the first shape is kept.
    pub fn insert(&mut self, normalizer: &NameNormalizer, source_name: &str, geometry: Value) -> bool {
        let name = normalizer.normalize(source_name);
        if name.is_empty() {
            warn!("Skipping geometry feature with an empty name");
            return false;
        }
        if self.shapes.contains_key(&name) {
            debug!("Duplicate geometry for {}, keeping the first", name);
            return false;
        }
        self.shapes.insert(
            name.clone(),
            CountryShape {
                name,
                source_name: source_name.to_string(),
                geometry,
            },
        );
        true
    }

    pub fn get(&self, canonical_name: &str) -> Option<&CountryShape> {
        self.shapes.get(canonical_name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.shapes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl GeometrySet {
    /// A geometry set with empty shapes, for callers that only know names.
    pub fn from_names<'a, I>(names: I, normalizer: &NameNormalizer) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut set = GeometrySet::default();
        for name in names {
            set.insert(normalizer, name, Value::Null);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_feature_collection() {
        let doc = json!({
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": { "name": "Spain" },
                  "geometry": { "type": "Polygon", "coordinates": [] } },
                { "type": "Feature", "properties": { "name": "Viet Nam" }, "geometry": null },
                { "type": "Feature", "properties": {}, "geometry": null }
            ]
        });

        let set = GeometrySet::from_document(&doc, &NameNormalizer::default()).unwrap();
        assert_eq!(set.names().collect::<Vec<_>>(), vec!["Spain", "Vietnam"]);
        assert_eq!(set.get("Vietnam").unwrap().source_name, "Viet Nam");
        assert_eq!(set.get("Spain").unwrap().geometry["type"], "Polygon");
    }

    #[test]
    fn reads_topology_countries() {
        let doc = json!({
            "type": "Topology",
            "objects": { "countries": { "type": "GeometryCollection", "geometries": [
                { "type": "Polygon", "arcs": [[0]], "properties": { "name": "Thailand" } },
                { "type": "Polygon", "arcs": [[1]], "properties": { "name": "Thailand" } }
            ]}},
            "arcs": []
        });

        let set = GeometrySet::from_document(&doc, &NameNormalizer::default()).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("Thailand").unwrap().geometry["arcs"], json!([[0]]));
    }

    #[test]
    fn rejects_unknown_document() {
        let err = GeometrySet::from_document(&json!({ "type": "Point" }), &NameNormalizer::default());
        assert!(matches!(err, Err(ExplorerError::Data(_))));
    }
}
