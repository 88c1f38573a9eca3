use serde::{Deserialize, Serialize};

/// Plain structural copy of a session, the shape that goes to and from storage.
///
/// `grid` is optional so a record holding only a best score starts a fresh board.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<Vec<Vec<u32>>>,
    #[serde(default)]
    pub score: u64,
    #[serde(default)]
    pub best_score: u64,
}

impl SessionSnapshot {
    pub fn best_only(best_score: u64) -> Self {
        SessionSnapshot {
            grid: None,
            score: 0,
            best_score,
        }
    }
}
