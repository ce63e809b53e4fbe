use serde::{Deserialize, Serialize};

use crate::units::{TempUnit, format_temperature};

pub const MAX_SAVED_LOCATIONS: usize = 10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SavedLocationError {
    #[error("'{0}' is already in your saved locations")]
    Duplicate(String),
    #[error("You can save at most {max} locations. Remove one first.")]
    Full { max: usize },
    #[error("No saved location named '{0}'")]
    NotFound(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedLocation {
    pub name: String,
    pub temperature_c: f64,
    pub condition_code: i32,
    /// Unix epoch seconds.
    pub saved_at: i64,
}

impl SavedLocation {
    pub fn display_temperature(&self, unit: TempUnit) -> String {
        format_temperature(self.temperature_c, unit)
    }
}

/// Ordered list of saved locations; names are unique ignoring case.
///
/// Deserializing replays [`SavedLocations::add`], so a stored list with
/// duplicates or more than [`MAX_SAVED_LOCATIONS`] entries is rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<SavedLocation>", into = "Vec<SavedLocation>")]
pub struct SavedLocations(Vec<SavedLocation>);

impl TryFrom<Vec<SavedLocation>> for SavedLocations {
    type Error = SavedLocationError;

    fn try_from(locations: Vec<SavedLocation>) -> Result<Self, Self::Error> {
        let mut list = Self::default();
        for location in locations {
            list.add(location)?;
        }
        Ok(list)
    }
}

impl From<SavedLocations> for Vec<SavedLocation> {
    fn from(list: SavedLocations) -> Self {
        list.0
    }
}

impl SavedLocations {
    fn position(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        self.0.iter().position(|l| l.name.eq_ignore_ascii_case(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn add(&mut self, location: SavedLocation) -> Result<(), SavedLocationError> {
        if self.contains(&location.name) {
            return Err(SavedLocationError::Duplicate(location.name));
        }
        if self.0.len() >= MAX_SAVED_LOCATIONS {
            return Err(SavedLocationError::Full { max: MAX_SAVED_LOCATIONS });
        }
        self.0.push(location);
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Result<SavedLocation, SavedLocationError> {
        let idx = self
            .position(name)
            .ok_or_else(|| SavedLocationError::NotFound(name.trim().to_string()))?;
        Ok(self.0.remove(idx))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SavedLocation> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a SavedLocations {
    type Item = &'a SavedLocation;
    type IntoIter = std::slice::Iter<'a, SavedLocation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(name: &str) -> SavedLocation {
        SavedLocation {
            name: name.into(),
            temperature_c: 21.6,
            condition_code: 800,
            saved_at: 1_700_000_000,
        }
    }

    #[test]
    fn add_keeps_insertion_order() {
        let mut list = SavedLocations::default();
        list.add(loc("Dhaka")).unwrap();
        list.add(loc("London")).unwrap();

        let names: Vec<_> = list.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["Dhaka", "London"]);
    }

    #[test]
    fn duplicates_are_rejected_ignoring_case() {
        let mut list = SavedLocations::default();
        list.add(loc("London")).unwrap();

        let err = list.add(loc("london")).unwrap_err();
        assert_eq!(err, SavedLocationError::Duplicate("london".into()));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn eleventh_location_is_rejected() {
        let mut list = SavedLocations::default();
        for i in 0..MAX_SAVED_LOCATIONS {
            list.add(loc(&format!("City {i}"))).unwrap();
        }

        let err = list.add(loc("One Too Many")).unwrap_err();
        assert_eq!(err, SavedLocationError::Full { max: 10 });
        assert!(err.to_string().contains("at most 10"));
    }

    #[test]
    fn remove_by_name() {
        let mut list = SavedLocations::default();
        list.add(loc("Paris")).unwrap();

        let removed = list.remove(" PARIS ").unwrap();
        assert_eq!(removed.name, "Paris");
        assert!(list.is_empty());

        let err = list.remove("Paris").unwrap_err();
        assert_eq!(err, SavedLocationError::NotFound("Paris".into()));
    }

    #[test]
    fn building_from_a_stored_list_checks_limits() {
        let list = SavedLocations::try_from(vec![loc("Oslo"), loc("Lima")]).unwrap();
        assert_eq!(list.len(), 2);

        let err = SavedLocations::try_from(vec![loc("Oslo"), loc("OSLO")]).unwrap_err();
        assert_eq!(err, SavedLocationError::Duplicate("OSLO".into()));

        let many: Vec<_> = (0..=MAX_SAVED_LOCATIONS).map(|i| loc(&format!("City {i}"))).collect();
        let err = SavedLocations::try_from(many).unwrap_err();
        assert_eq!(err, SavedLocationError::Full { max: MAX_SAVED_LOCATIONS });
    }

    #[test]
    fn temperature_uses_requested_unit() {
        assert_eq!(loc("Rome").display_temperature(TempUnit::Metric), "22°C");
        assert_eq!(loc("Rome").display_temperature(TempUnit::Imperial), "71°F");
    }
}
