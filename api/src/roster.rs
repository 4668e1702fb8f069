use crate::TrackedPlayer;

/// The hand-maintained tracked roster. Only the upstream id and the Korean
/// display name are kept here; everything else is resolved live.
pub const TRACKED_PLAYERS: &[TrackedPlayer] = &[
    TrackedPlayer { mlb_id: 673490, name_kr: "김하성" },
    TrackedPlayer { mlb_id: 808982, name_kr: "이정후" },
    TrackedPlayer { mlb_id: 808975, name_kr: "김혜성" },
    TrackedPlayer { mlb_id: 678225, name_kr: "배지환" },
    TrackedPlayer { mlb_id: 660271, name_kr: "오타니 쇼헤이" },
    TrackedPlayer { mlb_id: 808970, name_kr: "고우석" },
    TrackedPlayer { mlb_id: 800231, name_kr: "조원빈" },
    TrackedPlayer { mlb_id: 815794, name_kr: "장현석" },
    TrackedPlayer { mlb_id: 683425, name_kr: "최현일" },
    TrackedPlayer { mlb_id: 805870, name_kr: "엄형찬" },
    TrackedPlayer { mlb_id: 834605, name_kr: "김성준" },
    TrackedPlayer { mlb_id: 829748, name_kr: "이현승" },
    TrackedPlayer { mlb_id: 806739, name_kr: "김준석" },
];

/// Korean display name for an upstream id, `""` when the id is not tracked.
pub fn korean_name(mlb_id: u32) -> &'static str {
    TRACKED_PLAYERS
        .iter()
        .find(|p| p.mlb_id == mlb_id)
        .map(|p| p.name_kr)
        .unwrap_or("")
}

pub fn tracked_ids() -> Vec<u32> {
    TRACKED_PLAYERS.iter().map(|p| p.mlb_id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn korean_name_resolves_tracked_ids() {
        assert_eq!(korean_name(673490), "김하성");
        assert_eq!(korean_name(660271), "오타니 쇼헤이");
    }

    #[test]
    fn korean_name_is_empty_for_unknown_ids() {
        assert_eq!(korean_name(1), "");
    }

    #[test]
    fn roster_ids_are_unique() {
        let mut ids = tracked_ids();
        ids.sort_unstable();
        let before = ids.len();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }
}
