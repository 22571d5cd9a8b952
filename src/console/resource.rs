//! Lazily fetched resource slots
//!
//! A [`RevealableResourceSet`] groups the artifacts shown together behind one
//! "show" toggle. Each [`ResourceSlot`] moves monotonically from empty to
//! requested to fulfilled and never regresses; only a fresh set (a different
//! submission) starts over.

use std::collections::BTreeMap;
use std::fmt::Debug;

use serde::Serialize;

use super::fetch::FetchOutcome;
use crate::models::ResourceData;

/// Fixed set of artifact keys a resource set is built from
pub trait ArtifactKey: Copy + Ord + Debug + Serialize + 'static {
    /// Every key, in display order
    const ALL: &'static [Self];
}

/// One lazily fetched artifact
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResourceSlot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResourceData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub requested: bool,
}

/// Where a slot is in its fetch lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotState {
    NotFetched,
    InFlight,
    Loaded,
    Failed,
}

impl ResourceSlot {
    pub fn state(&self) -> SlotState {
        match (&self.data, &self.error, self.requested) {
            (_, Some(_), _) => SlotState::Failed,
            (Some(_), None, _) => SlotState::Loaded,
            (None, None, true) => SlotState::InFlight,
            (None, None, false) => SlotState::NotFetched,
        }
    }

    /// Overwrite data and error with a fetch outcome (last writer wins)
    fn fulfill(&mut self, outcome: FetchOutcome) {
        match outcome {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(message) => {
                self.data = None;
                self.error = Some(message);
            }
        }
    }
}

/// Artifacts revealed together behind one visibility toggle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevealableResourceSet<K: ArtifactKey> {
    pub show: bool,
    slots: BTreeMap<K, ResourceSlot>,
}

impl<K: ArtifactKey> Default for RevealableResourceSet<K> {
    fn default() -> Self {
        Self {
            show: false,
            slots: K::ALL
                .iter()
                .map(|key| (*key, ResourceSlot::default()))
                .collect(),
        }
    }
}

impl<K: ArtifactKey> RevealableResourceSet<K> {
    /// Empty set with one never-fetched slot per key
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip visibility; slots are left untouched
    pub fn toggle_show(mut self) -> Self {
        self.show = !self.show;
        self
    }

    /// Mark a slot as requested
    pub fn mark_requested(mut self, key: K) -> Self {
        self.slot_mut(key).requested = true;
        self
    }

    /// Store a fetch outcome in a slot
    pub fn fulfill(mut self, key: K, outcome: FetchOutcome) -> Self {
        self.slot_mut(key).fulfill(outcome);
        self
    }

    pub fn slot(&self, key: K) -> &ResourceSlot {
        // Every key of K::ALL is inserted on construction
        &self.slots[&key]
    }

    pub fn slots(&self) -> impl Iterator<Item = (K, &ResourceSlot)> {
        self.slots.iter().map(|(key, slot)| (*key, slot))
    }

    /// Keys that are visible but have never been requested
    pub fn pending_keys(&self) -> Vec<K> {
        if !self.show {
            return Vec::new();
        }
        self.slots
            .iter()
            .filter(|(_, slot)| !slot.requested)
            .map(|(key, _)| *key)
            .collect()
    }

    fn slot_mut(&mut self, key: K) -> &mut ResourceSlot {
        self.slots.entry(key).or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
    enum Part {
        Head,
        Tail,
    }

    impl ArtifactKey for Part {
        const ALL: &'static [Self] = &[Part::Head, Part::Tail];
    }

    #[test]
    fn test_new_set_has_empty_slots() {
        let set = RevealableResourceSet::<Part>::new();

        assert!(!set.show);
        assert_eq!(set.slots().count(), 2);
        assert_eq!(set.slot(Part::Head).state(), SlotState::NotFetched);
        assert!(set.pending_keys().is_empty());
    }

    #[test]
    fn test_toggle_show_keeps_slots() {
        let set = RevealableResourceSet::<Part>::new()
            .mark_requested(Part::Head)
            .toggle_show();

        assert!(set.show);
        assert!(set.slot(Part::Head).requested);
        assert_eq!(set.pending_keys(), vec![Part::Tail]);
        assert!(!set.toggle_show().show);
    }

    #[test]
    fn test_fulfill_overwrites_previous_outcome() {
        let set = RevealableResourceSet::<Part>::new()
            .toggle_show()
            .mark_requested(Part::Head);
        assert_eq!(set.slot(Part::Head).state(), SlotState::InFlight);

        let set = set.fulfill(Part::Head, Err("storage unavailable".to_string()));
        assert_eq!(set.slot(Part::Head).state(), SlotState::Failed);

        let set = set
            .mark_requested(Part::Head)
            .fulfill(Part::Head, Ok(ResourceData::text("first")));
        let set = set.fulfill(Part::Head, Ok(ResourceData::text("second")));

        let slot = set.slot(Part::Head);
        assert_eq!(slot.state(), SlotState::Loaded);
        assert_eq!(slot.data.as_ref().map(|d| d.data.as_str()), Some("second"));
        assert!(slot.error.is_none());
        assert!(slot.requested);
    }
}
