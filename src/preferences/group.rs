//! Raw preference input.

/// One member's raw preferences: a name and its `(rank, opponent)` pairs.
///
/// Ranks are positive integers where lower is better. Entries sharing a
/// rank are tied. The order of entries is significant: it breaks ties
/// between opponents of equal rank.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemberPreferences {
    /// Member identity.
    pub name: String,
    /// `(rank, opponent)` pairs in the order supplied.
    pub ranked: Vec<(i64, String)>,
}

impl MemberPreferences {
    pub fn new<N, I, S>(name: N, ranked: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (i64, S)>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            ranked: ranked.into_iter().map(|(r, s)| (r, s.into())).collect(),
        }
    }
}

/// A named group of members, in input order.
///
/// Input order matters: proposers are first enqueued in this order, and
/// results are reported in it.
///
/// # Examples
///
/// ```
/// use u_matching::preferences::Group;
///
/// let proposers = Group::new()
///     .with_member("john", [(1, "beth"), (2, "cindy"), (2, "anna")])
///     .with_member("bill", [(1, "cindy"), (2, "beth"), (3, "anna")]);
/// assert_eq!(proposers.len(), 2);
/// assert_eq!(proposers.names().collect::<Vec<_>>(), vec!["john", "bill"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Group {
    members: Vec<MemberPreferences>,
}

impl Group {
    /// Creates an empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a member with its `(rank, opponent)` pairs.
    pub fn with_member<N, I, S>(mut self, name: N, ranked: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = (i64, S)>,
        S: Into<String>,
    {
        self.push(MemberPreferences::new(name, ranked));
        self
    }

    /// Appends a member.
    pub fn push(&mut self, member: MemberPreferences) {
        self.members.push(member);
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member names in input order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|m| m.name.as_str())
    }

    /// Members in input order.
    pub fn members(&self) -> &[MemberPreferences] {
        &self.members
    }
}

impl FromIterator<MemberPreferences> for Group {
    fn from_iter<T: IntoIterator<Item = MemberPreferences>>(iter: T) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

impl Extend<MemberPreferences> for Group {
    fn extend<T: IntoIterator<Item = MemberPreferences>>(&mut self, iter: T) {
        self.members.extend(iter);
    }
}
