use std::{collections::BTreeMap, fmt};

use crate::midi::CCNumber;

/// A stable identifier for a registered control.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ControlId(usize);

impl ControlId {
    pub fn as_usize(self) -> usize {
        self.0
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// The `CCNumber` was already bound to this control.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct AlreadyBound(pub ControlId);

/// Bijection between `CCNumber`s and `ControlId`s.
///
/// `ControlId`s are allocated in binding order, starting at 0.
#[derive(Debug, Default)]
pub struct Bindings {
    by_cc: BTreeMap<CCNumber, ControlId>,
    by_id: Vec<CCNumber>,
}

impl Bindings {
    pub fn bind(&mut self, nb: CCNumber) -> Result<ControlId, AlreadyBound> {
        if let Some(&id) = self.by_cc.get(&nb) {
            return Err(AlreadyBound(id));
        }

        let id = ControlId(self.by_id.len());
        self.by_id.push(nb);
        self.by_cc.insert(nb, id);

        Ok(id)
    }

    pub fn control(&self, nb: CCNumber) -> Option<ControlId> {
        self.by_cc.get(&nb).copied()
    }

    pub fn cc(&self, id: ControlId) -> Option<CCNumber> {
        self.by_id.get(id.0).copied()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ControlId, CCNumber)> + '_ {
        self.by_id
            .iter()
            .enumerate()
            .map(|(idx, nb)| (ControlId(idx), *nb))
    }
}
