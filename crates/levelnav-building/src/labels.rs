//! Human-readable names for grid positions.

use std::collections::HashMap;
use std::fmt;

use levelnav_core::Pos;

/// Errors raised while resolving or authoring labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelError {
    /// No position carries this label.
    Unknown(String),
    /// The label is already taken.
    Duplicate(String),
}

impl fmt::Display for LabelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(l) => write!(f, "unknown label \u{201c}{l}\u{201d}"),
            Self::Duplicate(l) => write!(f, "label \u{201c}{l}\u{201d} is already defined"),
        }
    }
}

impl std::error::Error for LabelError {}

/// Ordered label → position map. Iteration follows insertion order, which
/// is the order choices are offered to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelMap {
    entries: Vec<(String, Pos)>,
    index: HashMap<String, usize>,
}

impl LabelMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a label. Fails if the label already exists.
    pub fn insert(&mut self, label: impl Into<String>, pos: Pos) -> Result<(), LabelError> {
        let label = label.into();
        if self.index.contains_key(&label) {
            return Err(LabelError::Duplicate(label));
        }
        self.index.insert(label.clone(), self.entries.len());
        self.entries.push((label, pos));
        Ok(())
    }

    /// Position of `label`.
    pub fn resolve(&self, label: &str) -> Result<Pos, LabelError> {
        self.get(label)
            .ok_or_else(|| LabelError::Unknown(label.to_string()))
    }

    pub fn get(&self, label: &str) -> Option<Pos> {
        self.index.get(label).map(|&i| self.entries[i].1)
    }

    /// Labels attached to `pos`, in insertion order.
    pub fn labels_at(&self, pos: Pos) -> impl Iterator<Item = &str> + '_ {
        self.entries
            .iter()
            .filter(move |(_, p)| *p == pos)
            .map(|(l, _)| l.as_str())
    }

    /// All labels, in insertion order.
    pub fn options(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(l, _)| l.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Pos)> + '_ {
        self.entries.iter().map(|(l, p)| (l.as_str(), *p))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Serialized as the ordered entry list; the lookup index is rebuilt.
#[cfg(feature = "serde")]
impl serde::Serialize for LabelMap {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.entries, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for LabelMap {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries: Vec<(String, Pos)> = serde::Deserialize::deserialize(deserializer)?;
        let mut map = LabelMap::new();
        for (label, pos) in entries {
            map.insert(label, pos).map_err(serde::de::Error::custom)?;
        }
        Ok(map)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn label_map_round_trip() {
        let mut m = LabelMap::new();
        m.insert("Ex-01-01", Pos::new(2, 2, 0)).unwrap();
        m.insert("lift01", Pos::new(1, 6, 0)).unwrap();
        let json = serde_json::to_string(&m).unwrap();
        let back: LabelMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
        assert_eq!(back.resolve("lift01"), Ok(Pos::new(1, 6, 0)));
    }

    #[test]
    fn duplicate_labels_fail_to_deserialize() {
        let json = r#"[["a",{"x":0,"y":0,"level":0}],["a",{"x":1,"y":0,"level":0}]]"#;
        assert!(serde_json::from_str::<LabelMap>(json).is_err());
    }
}
