//! Name ↔ index resolution for one group.

use crate::error::{Side, ValidationError};
use crate::preferences::Group;
use std::collections::HashMap;

/// The members of one group, resolved to dense indices in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    side: Side,
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl Roster {
    /// Builds a roster from a group, rejecting repeated member names.
    pub fn from_group(group: &Group, side: Side) -> Result<Self, ValidationError> {
        let mut names = Vec::with_capacity(group.len());
        let mut index = HashMap::with_capacity(group.len());
        for name in group.names() {
            if index.insert(name.to_string(), names.len()).is_some() {
                return Err(ValidationError::DuplicateMember {
                    side,
                    name: name.to_string(),
                });
            }
            names.push(name.to_string());
        }
        Ok(Self { side, names, index })
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Index of `name`, if it is a member.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Like [`index_of`](Self::index_of), but reports an unknown name.
    pub fn require(&self, name: &str) -> Result<usize, ValidationError> {
        self.index_of(name).ok_or_else(|| ValidationError::UnknownMember {
            side: self.side,
            name: name.to_string(),
        })
    }

    /// Name at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn name(&self, index: usize) -> &str {
        &self.names[index]
    }

    /// Names in input order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_follow_input_order() {
        let group = Group::new()
            .with_member("beth", Vec::<(i64, &str)>::new())
            .with_member("cindy", Vec::<(i64, &str)>::new());
        let roster = Roster::from_group(&group, Side::Partners).unwrap();

        assert_eq!(roster.index_of("beth"), Some(0));
        assert_eq!(roster.index_of("cindy"), Some(1));
        assert_eq!(roster.index_of("anna"), None);
        assert_eq!(roster.name(1), "cindy");
        assert_eq!(roster.side(), Side::Partners);
    }

    #[test]
    fn test_duplicate_member_rejected() {
        let group = Group::new()
            .with_member("john", [(1, "beth")])
            .with_member("john", [(1, "anna")]);
        let err = Roster::from_group(&group, Side::Proposers).unwrap_err();

        assert_eq!(
            err,
            ValidationError::DuplicateMember {
                side: Side::Proposers,
                name: "john".into()
            }
        );
    }

    #[test]
    fn test_require_reports_side() {
        let roster = Roster::from_group(&Group::new(), Side::Partners).unwrap();
        assert!(roster.is_empty());
        assert!(matches!(
            roster.require("anna"),
            Err(ValidationError::UnknownMember {
                side: Side::Partners,
                ..
            })
        ));
    }
}
