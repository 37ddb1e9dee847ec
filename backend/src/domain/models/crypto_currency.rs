use std::fmt;

/// A cryptocurrency row as the domain sees it.
///
/// The total is not stored; see [`CryptoCurrency::total_votes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CryptoCurrency {
    pub id: i64,
    pub name: String,
    pub up_vote: i64,
    pub down_vote: i64,
}

impl CryptoCurrency {
    /// A freshly created record: both counters start at zero.
    pub fn new(id: i64, name: String) -> Self {
        Self {
            id,
            name,
            up_vote: 0,
            down_vote: 0,
        }
    }

    pub fn total_votes(&self) -> i64 {
        self.up_vote + self.down_vote
    }
}

/// Which counter a vote touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoteKind {
    UpVote,
    DownVote,
}

impl VoteKind {
    /// Storage column incremented by this vote
    pub fn column(self) -> &'static str {
        match self {
            VoteKind::UpVote => "up_vote",
            VoteKind::DownVote => "down_vote",
        }
    }
}

impl fmt::Display for VoteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoteKind::UpVote => write!(f, "upvote"),
            VoteKind::DownVote => write!(f, "downvote"),
        }
    }
}
