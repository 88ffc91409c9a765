use std::collections::HashMap;

use crate::errors::{SimulationError, SimulationResult};

/// Ordered set of team identifiers taking part in a tournament.
///
/// The order is kept for display and for breaking exact ties in the
/// ranking; it never decides a ranking on its own.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Roster {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl Roster {
    /// Create a roster, rejecting duplicate or missing names.
    pub fn new<I, S>(names: I) -> SimulationResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut roster = Roster {
            names: Vec::new(),
            index: HashMap::new(),
        };
        for name in names {
            let name = name.into();
            if roster.index.contains_key(&name) {
                return Err(SimulationError::DuplicateTeam(name));
            }
            roster.index.insert(name.clone(), roster.names.len());
            roster.names.push(name);
        }
        if roster.names.is_empty() {
            return Err(SimulationError::EmptyRoster);
        }
        Ok(roster)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn name(&self, idx: usize) -> &str {
        &self.names[idx]
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }
}
