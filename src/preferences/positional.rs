//! Positional preference rows with an explicit index base.

use super::{Group, MemberPreferences};
use crate::error::ValidationError;
use std::fmt;

/// How opponent indices in positional rows are numbered.
///
/// There is no detection: a row such as `[1, 2]` is valid under both
/// bases, so the caller must say which one is meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum IndexBase {
    /// Opponents are numbered `0..n`.
    Zero,
    /// Opponents are numbered `1..=n`.
    One,
}

impl IndexBase {
    fn to_offset(self, index: usize, len: usize) -> Option<usize> {
        let offset = match self {
            IndexBase::Zero => index,
            IndexBase::One => index.checked_sub(1)?,
        };
        (offset < len).then_some(offset)
    }
}

impl fmt::Display for IndexBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexBase::Zero => f.write_str("0-based"),
            IndexBase::One => f.write_str("1-based"),
        }
    }
}

impl Group {
    /// Builds a group from positional rows.
    ///
    /// `rows[i]` lists the opponents of `members[i]` best first, as indices
    /// into `opponents` numbered according to `base`. Each opponent's rank
    /// is its 1-based position in the row, so positional input never
    /// contains ties. Repeated indices are left for the normalizer to reject.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_matching::preferences::{Group, IndexBase};
    ///
    /// let group = Group::from_positional(
    ///     &["microsoft", "amazon"],
    ///     &["mary", "kevin", "john"],
    ///     &[vec![2, 1, 3], vec![1, 2, 3]],
    ///     IndexBase::One,
    /// )
    /// .unwrap();
    /// assert_eq!(group.members()[0].ranked[0], (1, "kevin".to_string()));
    /// ```
    pub fn from_positional<M, O>(
        members: &[M],
        opponents: &[O],
        rows: &[Vec<usize>],
        base: IndexBase,
    ) -> Result<Self, ValidationError>
    where
        M: AsRef<str>,
        O: AsRef<str>,
    {
        if rows.len() != members.len() {
            return Err(ValidationError::RowCountMismatch {
                expected: members.len(),
                found: rows.len(),
            });
        }

        members
            .iter()
            .zip(rows)
            .map(|(member, row)| {
                let owner = member.as_ref();
                let ranked = row
                    .iter()
                    .enumerate()
                    .map(|(position, &index)| {
                        let offset = base.to_offset(index, opponents.len()).ok_or_else(|| {
                            ValidationError::IndexOutOfRange {
                                owner: owner.to_string(),
                                index,
                                base,
                                len: opponents.len(),
                            }
                        })?;
                        Ok((position as i64 + 1, opponents[offset].as_ref().to_string()))
                    })
                    .collect::<Result<Vec<_>, ValidationError>>()?;
                Ok::<_, ValidationError>(MemberPreferences {
                    name: owner.to_string(),
                    ranked,
                })
            })
            .collect()
    }
}
