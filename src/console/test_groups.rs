//! Scored test groups of an IOI problem
//!
//! Groups are referenced by name, not by position. A group may only require
//! groups placed before it whose scoring type is `Complete`; every mutation
//! drops references that stopped being valid and keeps each requirement list
//! sorted by the position of the referenced group.

use serde::Serialize;

use crate::constants::group_actions;
use crate::error::{AppError, AppResult};
use crate::models::{FeedbackType, ScoringType, TestGroup};

/// Sub-action of a group intent; values are raw form input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupAction {
    AddGroup,
    SetName(String),
    SetFirstTest(String),
    SetLastTest(String),
    SetScoringType(String),
    SetFeedbackType(String),
    SetScore(String),
    SetTestScore(String),
    AddRequired(String),
    RemoveRequired(String),
    RemoveGroup,
}

impl GroupAction {
    /// Build an action from its wire name and raw value
    pub fn parse(name: &str, value: Option<String>) -> AppResult<Self> {
        let value = value.unwrap_or_default();
        let action = match name {
            group_actions::ADD_GROUP => Self::AddGroup,
            group_actions::NAME => Self::SetName(value),
            group_actions::FIRST_TEST => Self::SetFirstTest(value),
            group_actions::LAST_TEST => Self::SetLastTest(value),
            group_actions::SCORING_TYPE => Self::SetScoringType(value),
            group_actions::FEEDBACK_TYPE => Self::SetFeedbackType(value),
            group_actions::SCORE => Self::SetScore(value),
            group_actions::TEST_SCORE => Self::SetTestScore(value),
            group_actions::ADD_REQUIRED => Self::AddRequired(value),
            group_actions::REMOVE_REQUIRED => Self::RemoveRequired(value),
            group_actions::REMOVE_GROUP => Self::RemoveGroup,
            other => return Err(AppError::InvalidGroupAction(other.to_string())),
        };
        Ok(action)
    }
}

/// Ordered test groups of one problem
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TestGroupCollection {
    groups: Vec<TestGroup>,
}

impl From<Vec<TestGroup>> for TestGroupCollection {
    fn from(groups: Vec<TestGroup>) -> Self {
        Self { groups }
    }
}

impl TestGroupCollection {
    pub fn groups(&self) -> &[TestGroup] {
        &self.groups
    }

    pub fn into_inner(self) -> Vec<TestGroup> {
        self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Apply one group action. `index` is ignored by `AddGroup`.
    pub fn apply(&self, index: Option<usize>, action: &GroupAction) -> AppResult<Self> {
        let index = match (action, index) {
            // The new group lands at the previous length
            (GroupAction::AddGroup, _) => self.groups.len(),
            (_, Some(index)) => {
                self.check_index(index)?;
                index
            }
            (_, None) => {
                return Err(AppError::InvalidIntent(format!(
                    "group action {action:?} needs a group index"
                )));
            }
        };

        // Candidates are computed against the state before the mutation
        if let GroupAction::AddRequired(name) = action {
            if !self.eligible_requirement_candidates(index)?.contains(name) {
                return Err(AppError::InvalidIntent(format!(
                    "group {name:?} can not be required by group {index}"
                )));
            }
        }

        let mut next = self.clone();
        match action {
            GroupAction::AddGroup => next.groups.push(TestGroup::default()),
            GroupAction::SetName(name) => next.set_name(index, name),
            GroupAction::SetFirstTest(raw) => {
                if let Some(test) = parse_int(raw) {
                    next.groups[index].first_test = test;
                }
            }
            GroupAction::SetLastTest(raw) => {
                if let Some(test) = parse_int(raw) {
                    next.groups[index].last_test = test;
                }
            }
            GroupAction::SetScoringType(raw) => {
                if let Some(scoring_type) = parse_code::<ScoringType>(raw) {
                    next.set_scoring_type(index, scoring_type);
                }
            }
            GroupAction::SetFeedbackType(raw) => {
                if let Some(feedback_type) = parse_code::<FeedbackType>(raw) {
                    next.groups[index].feedback_type = feedback_type;
                }
            }
            GroupAction::SetScore(raw) => {
                let group = &mut next.groups[index];
                clear_scores(group);
                group.score = parse_score(raw);
            }
            GroupAction::SetTestScore(raw) => {
                let group = &mut next.groups[index];
                clear_scores(group);
                group.test_score = parse_score(raw);
            }
            GroupAction::AddRequired(name) => {
                next.groups[index].required_group_names.push(name.clone());
            }
            GroupAction::RemoveRequired(name) => {
                let required = &mut next.groups[index].required_group_names;
                if let Some(position) = required.iter().position(|n| n == name) {
                    required.remove(position);
                }
            }
            GroupAction::RemoveGroup => {
                let name = next.groups[index].name.clone();
                next.purge_requirement(index, &name);
                next.groups.remove(index);
            }
        }

        next.sort_requirements();
        Ok(next)
    }

    /// Names group `index` may additionally require
    ///
    /// Only named groups strictly before `index` with `Complete` scoring that
    /// are not required yet.
    pub fn eligible_requirement_candidates(&self, index: usize) -> AppResult<Vec<String>> {
        self.check_index(index)?;
        let group = &self.groups[index];

        Ok(self.groups[..index]
            .iter()
            .filter(|candidate| !candidate.name.is_empty())
            .filter(|candidate| candidate.scoring_type == ScoringType::Complete)
            .filter(|candidate| !group.requires(&candidate.name))
            .map(|candidate| candidate.name.clone())
            .collect())
    }

    /// Drop every requirement a mutation could never have produced
    ///
    /// Keeps, per group, the first mention of each named `Complete` group
    /// placed before it, sorted by position.
    pub fn normalize_requirements(&self) -> Self {
        let mut next = self.clone();
        for index in 0..next.groups.len() {
            let mut kept: Vec<String> = Vec::new();
            for name in &self.groups[index].required_group_names {
                let eligible = self.groups[..index].iter().any(|candidate| {
                    !candidate.name.is_empty()
                        && &candidate.name == name
                        && candidate.scoring_type == ScoringType::Complete
                });
                if eligible && !kept.contains(name) {
                    kept.push(name.clone());
                } else {
                    tracing::debug!(group = index, required = %name, "Dropping invalid requirement");
                }
            }
            next.groups[index].required_group_names = kept;
        }
        next.sort_requirements();
        next
    }

    /// Rename group `index`; a name already taken by another group is ignored
    fn set_name(&mut self, index: usize, name: &str) {
        let old_name = self.groups[index].name.clone();
        if old_name == name {
            return;
        }
        let taken = !name.is_empty()
            && self
                .groups
                .iter()
                .enumerate()
                .any(|(i, group)| i != index && group.name == name);
        if taken {
            tracing::debug!(group = index, %name, "Ignoring rename to a name already in use");
            return;
        }
        self.purge_requirement(index, &old_name);
        self.groups[index].name = name.to_string();
    }

    fn set_scoring_type(&mut self, index: usize, scoring_type: ScoringType) {
        if scoring_type != ScoringType::Complete {
            let name = self.groups[index].name.clone();
            self.purge_requirement(index, &name);
        }
        let group = &mut self.groups[index];
        if group.scoring_type != scoring_type {
            clear_scores(group);
        }
        group.scoring_type = scoring_type;
    }

    /// Drop `name` from the requirement lists of every group but `owner`
    fn purge_requirement(&mut self, owner: usize, name: &str) {
        for (i, group) in self.groups.iter_mut().enumerate() {
            if i != owner {
                group.required_group_names.retain(|required| required != name);
            }
        }
    }

    fn sort_requirements(&mut self) {
        let positions: Vec<String> = self.groups.iter().map(|g| g.name.clone()).collect();
        let position = |name: &String| {
            positions
                .iter()
                .position(|n| n == name)
                .unwrap_or(usize::MAX)
        };

        for group in &mut self.groups {
            group
                .required_group_names
                .sort_by(|a, b| position(a).cmp(&position(b)));
        }
    }

    fn check_index(&self, index: usize) -> AppResult<()> {
        if index >= self.groups.len() {
            return Err(AppError::InvalidIndex {
                index,
                len: self.groups.len(),
            });
        }
        Ok(())
    }
}

fn clear_scores(group: &mut TestGroup) {
    group.score = None;
    group.test_score = None;
}

fn parse_int(raw: &str) -> Option<u64> {
    raw.trim().parse().ok()
}

fn parse_score(raw: &str) -> Option<f64> {
    if raw.is_empty() {
        return None;
    }
    raw.trim().parse().ok()
}

fn parse_code<T: TryFrom<u8>>(raw: &str) -> Option<T> {
    raw.trim().parse::<u8>().ok().and_then(|code| T::try_from(code).ok())
}
