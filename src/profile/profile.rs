use std::sync::Arc;

use itertools::Itertools;

use super::{DataIndex, LengthSource};
use crate::{
    error::{Result, RoutingError},
    graphs::{edge::Edge, EdgeId, Weight, MAX_EDGE_LENGTH},
};

#[derive(Clone, Debug)]
struct Property {
    index: Arc<DataIndex>,
    importance: i32,
}

/// Weighted sum of preference indices. A negative importance weights the
/// inverted index value.
#[derive(Clone, Debug, Default)]
pub struct Profile {
    properties: Vec<Property>,
}

impl Profile {
    pub fn new() -> Profile {
        Profile::default()
    }

    pub fn add_index(&mut self, index: Arc<DataIndex>, importance: i32) {
        self.properties.push(Property { index, importance });
    }

    /// e.g. `length1green2`
    pub fn name(&self) -> String {
        self.properties
            .iter()
            .map(|property| format!("{}{}", property.index.name(), property.importance))
            .collect()
    }

    pub fn raw_length(&self, uid: EdgeId) -> Result<f64> {
        let mut length = 0.0;
        for property in &self.properties {
            let (value, importance) = if property.importance >= 0 {
                (property.index.get(uid)?, property.importance)
            } else {
                (property.index.get_inverted(uid)?, -property.importance)
            };
            length += importance as f64 * value;
        }
        Ok(length)
    }
}

impl LengthSource for Profile {
    fn length(&self, edge: &Edge) -> Result<Weight> {
        let length = self.raw_length(edge.uid())?.round().max(0.0);
        if !length.is_finite() || length > MAX_EDGE_LENGTH as f64 {
            return Err(RoutingError::Parse {
                what: format!("profile {} length of edge {}", self.name(), edge.uid()),
                message: format!("{} exceeds the longest edge length", length),
            });
        }
        Ok(length as Weight)
    }
}

/// Builds one profile per combination of importance options.
#[derive(Clone, Debug, Default)]
pub struct ProfileGenerator {
    indices: Vec<(Arc<DataIndex>, Vec<i32>)>,
}

impl ProfileGenerator {
    pub fn new() -> ProfileGenerator {
        ProfileGenerator::default()
    }

    pub fn add_index(&mut self, index: DataIndex, importance_options: Vec<i32>) {
        self.indices.push((Arc::new(index), importance_options));
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn generate(&self) -> Vec<Profile> {
        if self.indices.is_empty() {
            return Vec::new();
        }

        self.indices
            .iter()
            .map(|(_, options)| options.iter().copied())
            .multi_cartesian_product()
            .map(|importances| {
                let mut profile = Profile::new();
                for ((index, _), importance) in self.indices.iter().zip(importances) {
                    profile.add_index(index.clone(), importance);
                }
                profile
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::IndexKind;

    fn indices() -> (DataIndex, DataIndex) {
        let length = DataIndex::from_values(IndexKind::Length, [(0, 10.0), (1, 4.0)]);
        let green = DataIndex::from_values(IndexKind::Green, [(0, 1.5), (1, 0.5)]);
        (length, green)
    }

    #[test]
    fn weighted_sum() {
        let (length, green) = indices();
        let mut profile = Profile::new();
        profile.add_index(Arc::new(length), 1);
        profile.add_index(Arc::new(green), 2);

        assert_eq!(profile.name(), "length1green2");
        assert_eq!(profile.length(&Edge::new(0, 1, 2, 99)).unwrap(), 13);
        assert_eq!(profile.length(&Edge::new(1, 1, 2, 99)).unwrap(), 5);
        assert!(matches!(
            profile.length(&Edge::new(2, 1, 2, 99)),
            Err(RoutingError::MissingIndexValue { uid: 2, .. })
        ));
    }

    #[test]
    fn overlong_weighted_length_is_an_error() {
        let length = DataIndex::from_values(IndexKind::Length, [(0, 3.0e9)]);
        let mut profile = Profile::new();
        profile.add_index(Arc::new(length), 2);

        assert!(matches!(
            profile.length(&Edge::new(0, 1, 2, 1)),
            Err(RoutingError::Parse { .. })
        ));
    }

    #[test]
    fn generator_builds_every_combination() {
        let (length, green) = indices();
        let mut generator = ProfileGenerator::new();
        generator.add_index(length, vec![1, 2]);
        generator.add_index(green, vec![0, 3, 5]);

        let names: Vec<_> = generator.generate().iter().map(Profile::name).collect();
        assert_eq!(names.len(), 6);
        assert_eq!(names[0], "length1green0");
        assert_eq!(names[5], "length2green5");
    }
}
