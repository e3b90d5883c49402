use crate::error::CoreError;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// One scalar per asset, kept in the column order of the table it was reduced from.
///
/// Values may be NaN; use [`PerAssetStatistic::require`] when a defined value is
/// mandatory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PerAssetStatistic {
    entries: Vec<(String, f64)>,
}

impl PerAssetStatistic {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry. A repeated name replaces the earlier value in place.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    /// Returns the value for `name`, failing if it is missing or NaN.
    pub fn require(&self, name: &str) -> Result<f64, CoreError> {
        match self.get(name) {
            None => Err(CoreError::UnknownSeries(name.to_string())),
            Some(v) if v.is_nan() => Err(CoreError::UndefinedRatio(name.to_string())),
            Some(v) => Ok(v),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Applies `f` to every value, keeping names and order.
    pub fn map<F>(&self, mut f: F) -> Self
    where
        F: FnMut(f64) -> f64,
    {
        self.iter().map(|(n, v)| (n.to_string(), f(v))).collect()
    }
}

impl FromIterator<(String, f64)> for PerAssetStatistic {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut stat = PerAssetStatistic::new();
        for (name, value) in iter {
            stat.insert(name, value);
        }
        stat
    }
}

// Serialized as an ordered map; NaN becomes `null` in JSON.
impl Serialize for PerAssetStatistic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            if value.is_nan() {
                map.serialize_entry(name, &Option::<f64>::None)?;
            } else {
                map.serialize_entry(name, value)?;
            }
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order() {
        let stat: PerAssetStatistic = vec![
            ("FB".to_string(), 0.5),
            ("AMZN".to_string(), 1.2),
        ]
        .into_iter()
        .collect();
        assert_eq!(stat.names().collect::<Vec<_>>(), vec!["FB", "AMZN"]);
    }

    #[test]
    fn require_distinguishes_missing_and_undefined() {
        let mut stat = PerAssetStatistic::new();
        stat.insert("A", 1.5);
        stat.insert("B", f64::NAN);

        assert_eq!(stat.require("A"), Ok(1.5));
        assert_eq!(stat.require("B"), Err(CoreError::UndefinedRatio("B".to_string())));
        assert_eq!(stat.require("C"), Err(CoreError::UnknownSeries("C".to_string())));
    }

    #[test]
    fn insert_replaces_existing_name() {
        let mut stat = PerAssetStatistic::new();
        stat.insert("A", 1.0);
        stat.insert("B", 2.0);
        stat.insert("A", 3.0);
        assert_eq!(stat.len(), 2);
        assert_eq!(stat.get("A"), Some(3.0));
    }

    #[test]
    fn serializes_nan_as_null() {
        let stat: PerAssetStatistic = vec![("B".to_string(), 2.0), ("A".to_string(), f64::NAN)]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&stat).unwrap();
        assert_eq!(json, r#"{"B":2.0,"A":null}"#);
    }
}
