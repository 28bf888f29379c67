//! The set of streets a user has currently blocked.
//!
//! Insertion order is kept so a presentation layer can list blocks in the order
//! they were added. Lives only as long as the caller keeps it.

use crate::identifiers::StreetName;
use crate::models::types::{Result, TransitError};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct BlockedStreetSet {
    streets: Vec<StreetName>,
}

impl BlockedStreetSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Block a street.
    ///
    /// Returns `AlreadyBlocked` if it is in the set.
    pub fn add(&mut self, street: impl Into<StreetName>) -> Result<()> {
        let street = street.into();
        if self.contains(&street) {
            return Err(TransitError::AlreadyBlocked(street));
        }
        self.streets.push(street);
        Ok(())
    }

    /// Unblock a street, returning whether it was blocked
    pub fn remove(&mut self, street: &StreetName) -> bool {
        let before = self.streets.len();
        self.streets.retain(|s| s != street);
        self.streets.len() != before
    }

    pub fn clear(&mut self) {
        self.streets.clear();
    }

    pub fn contains(&self, street: &StreetName) -> bool {
        self.streets.contains(street)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StreetName> {
        self.streets.iter()
    }

    pub fn len(&self) -> usize {
        self.streets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streets.is_empty()
    }
}

/// Collects while dropping repeats
impl<S: Into<StreetName>> FromIterator<S> for BlockedStreetSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for street in iter {
            let _ = set.add(street);
        }
        set
    }
}

/// Reads a plain list of street names, dropping repeats like `collect`
#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for BlockedStreetSet {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let streets = Vec::<StreetName>::deserialize(deserializer)?;
        Ok(streets.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_contains() {
        let mut blocked = BlockedStreetSet::new();
        assert!(blocked.is_empty());

        blocked.add("Av. Norte").unwrap();
        assert!(blocked.contains(&StreetName::new("Av. Norte")));
        assert!(!blocked.contains(&StreetName::new("Calle Bolívar")));
        assert_eq!(blocked.len(), 1);
    }

    #[test]
    fn test_duplicate_add_is_rejected() {
        let mut blocked = BlockedStreetSet::new();
        blocked.add("Av. Norte").unwrap();

        let err = blocked.add("Av. Norte").unwrap_err();
        assert!(matches!(err, TransitError::AlreadyBlocked(ref s) if s.as_str() == "Av. Norte"));
        assert_eq!(blocked.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut blocked: BlockedStreetSet = ["Av. Norte", "Calle Bolívar"].into_iter().collect();

        assert!(blocked.remove(&StreetName::new("Av. Norte")));
        assert!(!blocked.remove(&StreetName::new("Av. Norte")));
        assert_eq!(blocked.iter().map(|s| s.as_str()).collect::<Vec<_>>(), vec!["Calle Bolívar"]);
    }

    #[test]
    fn test_clear() {
        let mut blocked: BlockedStreetSet = ["Av. Norte", "Calle Bolívar"].into_iter().collect();
        blocked.clear();
        assert!(blocked.is_empty());
    }

    #[test]
    fn test_collect_keeps_order_and_drops_repeats() {
        let blocked: BlockedStreetSet = ["Calle Bolívar", "Av. Norte", "Calle Bolívar"]
            .into_iter()
            .collect();

        let names: Vec<_> = blocked.iter().map(|s| s.as_str()).collect();
        assert_eq!(names, vec!["Calle Bolívar", "Av. Norte"]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_drops_repeats() {
        let blocked: BlockedStreetSet =
            serde_json::from_str(r#"["Av. Norte", "Calle Bolívar", "Av. Norte"]"#).unwrap();

        assert_eq!(blocked.len(), 2);
        let names: Vec<_> = blocked.iter().map(|s| s.as_str()).collect();
        assert_eq!(names, vec!["Av. Norte", "Calle Bolívar"]);
        assert_eq!(serde_json::to_string(&blocked).unwrap(), r#"["Av. Norte","Calle Bolívar"]"#);
    }
}
