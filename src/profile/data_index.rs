use std::{fmt, path::Path, str::FromStr};

use ahash::{HashMap, HashMapExt};
use log::info;
use serde::Deserialize;

use crate::{
    error::{Result, RoutingError},
    graphs::EdgeId,
};

/// Registered preference indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IndexKind {
    Length,
    Green,
    PeakDistance,
    RoadType,
}

impl IndexKind {
    pub fn name(&self) -> &'static str {
        match self {
            IndexKind::Length => "length",
            IndexKind::Green => "green",
            IndexKind::PeakDistance => "peak_distance",
            IndexKind::RoadType => "road_type",
        }
    }
}

impl FromStr for IndexKind {
    type Err = RoutingError;

    fn from_str(name: &str) -> Result<IndexKind> {
        match name {
            "length" => Ok(IndexKind::Length),
            "green" => Ok(IndexKind::Green),
            "peak_distance" => Ok(IndexKind::PeakDistance),
            "road_type" => Ok(IndexKind::RoadType),
            _ => Err(RoutingError::InvalidArgument(format!(
                "no index is registered under the name {}",
                name
            ))),
        }
    }
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Deserialize)]
struct IndexRow {
    uid: EdgeId,
    value: f64,
}

/// Precomputed per-edge values of one preference index.
#[derive(Clone, Debug)]
pub struct DataIndex {
    kind: IndexKind,
    values: HashMap<EdgeId, f64>,
    scale_max: Option<f64>,
}

impl DataIndex {
    pub fn new(kind: IndexKind) -> DataIndex {
        DataIndex {
            kind,
            values: HashMap::new(),
            scale_max: None,
        }
    }

    pub fn from_values(kind: IndexKind, values: impl IntoIterator<Item = (EdgeId, f64)>) -> DataIndex {
        let mut index = DataIndex::new(kind);
        index.values.extend(values);
        index
    }

    /// Reads `uid;value` rows.
    pub fn from_csv(kind: IndexKind, path: &Path) -> Result<DataIndex> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .has_headers(false)
            .from_path(path)?;

        let mut index = DataIndex::new(kind);
        for row in reader.deserialize() {
            let IndexRow { uid, value } = row?;
            if !value.is_finite() {
                return Err(RoutingError::Parse {
                    what: format!("{} index value of edge {}", kind, uid),
                    message: format!("{} is not a finite number", value),
                });
            }
            index.values.insert(uid, value);
        }

        info!(
            "loaded {} values of index {} from {}",
            index.values.len(),
            kind,
            path.display()
        );
        Ok(index)
    }

    pub fn kind(&self) -> IndexKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, uid: EdgeId) -> Result<f64> {
        self.values
            .get(&uid)
            .copied()
            .ok_or_else(|| RoutingError::MissingIndexValue {
                index: self.name().to_string(),
                uid,
            })
    }

    /// `scale_max - value`, only defined after normalization.
    pub fn get_inverted(&self, uid: EdgeId) -> Result<f64> {
        let scale_max = self.scale_max.ok_or_else(|| {
            RoutingError::InvalidArgument(format!(
                "index {} must be normalized before inverted values are read",
                self.name()
            ))
        })?;
        Ok(scale_max - self.get(uid)?)
    }

    /// Maps all values into `[0, scale_max]`. The green index is clamped to 1
    /// and flipped, so that greener edges end up cheaper.
    pub fn normalize(&mut self, scale_max: f64) {
        match self.kind {
            IndexKind::Green => {
                for value in self.values.values_mut() {
                    *value = (1.0 - value.clamp(0.0, 1.0)) * scale_max;
                }
            }
            _ => {
                let max = self.values.values().copied().fold(0.0, f64::max);
                if max > 0.0 {
                    for value in self.values.values_mut() {
                        *value = *value / max * scale_max;
                    }
                }
            }
        }
        self.scale_max = Some(scale_max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_index_is_rejected() {
        assert_eq!("green".parse::<IndexKind>().unwrap(), IndexKind::Green);
        assert!(matches!(
            "noise".parse::<IndexKind>(),
            Err(RoutingError::InvalidArgument(_))
        ));
    }

    #[test]
    fn missing_value_is_an_error() {
        let index = DataIndex::from_values(IndexKind::Length, [(1, 4.0)]);
        assert_eq!(index.get(1).unwrap(), 4.0);
        assert!(matches!(
            index.get(2),
            Err(RoutingError::MissingIndexValue { uid: 2, .. })
        ));
    }

    #[test]
    fn normalization() {
        let mut length = DataIndex::from_values(IndexKind::Length, [(0, 50.0), (1, 200.0)]);
        length.normalize(100.0);
        assert_eq!(length.get(0).unwrap(), 25.0);
        assert_eq!(length.get(1).unwrap(), 100.0);
        assert_eq!(length.get_inverted(0).unwrap(), 75.0);

        let mut green = DataIndex::from_values(IndexKind::Green, [(0, 0.25), (1, 3.0)]);
        green.normalize(100.0);
        assert_eq!(green.get(0).unwrap(), 75.0);
        assert_eq!(green.get(1).unwrap(), 0.0);
    }
}
