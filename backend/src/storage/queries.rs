//! SQL shared by the MySQL and SQLite repositories.
//!
//! Both engines accept `?` placeholders and the same DML for this table, so
//! only the table definitions differ per backend.

use crate::domain::models::VoteKind;

pub const SELECT_ALL: &str = r#"
    SELECT id, name, up_vote, down_vote
    FROM crypto_vote
    ORDER BY id ASC
"#;

pub const SELECT_BY_ID: &str = r#"
    SELECT id, name, up_vote, down_vote
    FROM crypto_vote
    WHERE id = ?
"#;

pub const COUNT_BY_ID: &str = "SELECT COUNT(*) FROM crypto_vote WHERE id = ?";

pub const COUNT_BY_NAME: &str = "SELECT COUNT(*) FROM crypto_vote WHERE name = ?";

pub const INSERT: &str = "INSERT INTO crypto_vote (name, up_vote, down_vote) VALUES (?, 0, 0)";

pub const DELETE_BY_ID: &str = "DELETE FROM crypto_vote WHERE id = ?";

const INCREMENT_UP_VOTE: &str = "UPDATE crypto_vote SET up_vote = up_vote + 1 WHERE id = ?";

const INCREMENT_DOWN_VOTE: &str =
    "UPDATE crypto_vote SET down_vote = down_vote + 1 WHERE id = ?";

/// Relative increment for one counter; the id is the only bound parameter.
pub fn increment_vote(kind: VoteKind) -> &'static str {
    let sql = match kind {
        VoteKind::UpVote => INCREMENT_UP_VOTE,
        VoteKind::DownVote => INCREMENT_DOWN_VOTE,
    };
    debug_assert!(sql.contains(kind.column()), "{sql} does not touch {}", kind.column());
    sql
}
