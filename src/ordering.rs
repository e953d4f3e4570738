//! Group ordering engine.
//!
//! Produces the deterministic total order over groups that the allocator
//! consumes. The ordering key, most significant first: early-morning groups,
//! operator-priority groups, ascending academic level, descending student
//! count (larger groups claim large rooms before smaller residual groups
//! compete), lexicographic group id. Pure and stable: the same inputs yield
//! the same sequence regardless of session arrival order.

use std::collections::{BTreeMap, HashSet};

use crate::config::EngineConfig;
use crate::models::{ClassSession, Group, GroupId};

/// Sort key for one group, ordered by `Ord` derivation.
///
/// Booleans are inverted so that `true` sorts first; the student count is
/// inverted so that larger groups sort first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct GroupKey {
    not_early_morning: bool,
    not_priority: bool,
    level: u8,
    inverse_size: i64,
    id: GroupId,
}

/// Orders distinct group ids for allocation.
///
/// `sessions` may arrive in any order; only groups with at least one session
/// appear in the result. Groups missing from `groups` are still ordered,
/// with level 0 and size 0.
pub fn order_groups(
    sessions: &[ClassSession],
    groups: &BTreeMap<GroupId, Group>,
    priority_groups: &HashSet<GroupId>,
    config: &EngineConfig,
) -> Vec<GroupId> {
    let mut early: HashSet<&str> = HashSet::new();
    let mut seen: Vec<GroupId> = Vec::new();
    let mut known: HashSet<&str> = HashSet::new();

    for session in sessions {
        if !known.contains(session.group_id.as_str()) {
            known.insert(&session.group_id);
            seen.push(session.group_id.clone());
        }
        if config.is_early_start(session.start) {
            early.insert(&session.group_id);
        }
    }

    let mut keyed: Vec<(GroupKey, GroupId)> = seen
        .into_iter()
        .map(|id| {
            let (level, size) = groups
                .get(&id)
                .map(|g| (g.level, g.student_count))
                .unwrap_or((0, 0));
            let key = GroupKey {
                not_early_morning: !early.contains(id.as_str()),
                not_priority: !priority_groups.contains(&id),
                level,
                inverse_size: -(size as i64),
                id: id.clone(),
            };
            (key, id)
        })
        .collect();

    keyed.sort();
    keyed.into_iter().map(|(_, id)| id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TimeOfDay, Weekday};

    fn session(group: &str, start_hour: u16) -> ClassSession {
        ClassSession::new(
            group,
            "X",
            Weekday::Mon,
            TimeOfDay::hm(start_hour, 0),
            TimeOfDay::hm(start_hour + 2, 0),
            20,
        )
    }

    fn group(id: &str, level: u8, size: u32) -> (GroupId, Group) {
        (
            id.to_string(),
            Group::new(id, size).with_attributes(0, level, 1),
        )
    }

    fn groups(entries: Vec<(GroupId, Group)>) -> BTreeMap<GroupId, Group> {
        entries.into_iter().collect()
    }

    #[test]
    fn test_early_morning_first() {
        let sessions = vec![session("201", 12), session("102", 8)];
        let map = groups(vec![group("201", 2, 20), group("102", 1, 20)]);
        let order = order_groups(&sessions, &map, &HashSet::new(), &EngineConfig::default());
        assert_eq!(order, vec!["102".to_string(), "201".to_string()]);
    }

    #[test]
    fn test_priority_before_level() {
        // Neither early-morning; 802 is priority despite higher level
        let sessions = vec![session("101", 12), session("802", 12)];
        let map = groups(vec![group("101", 1, 20), group("802", 8, 20)]);
        let priority: HashSet<GroupId> = ["802".to_string()].into();
        let order = order_groups(&sessions, &map, &priority, &EngineConfig::default());
        assert_eq!(order, vec!["802".to_string(), "101".to_string()]);
    }

    #[test]
    fn test_level_then_size_then_id() {
        let sessions = vec![
            session("303", 12),
            session("301", 12),
            session("102", 12),
            session("101", 12),
        ];
        let map = groups(vec![
            group("303", 3, 35),
            group("301", 3, 35),
            group("102", 1, 20),
            group("101", 1, 30),
        ]);
        let order = order_groups(&sessions, &map, &HashSet::new(), &EngineConfig::default());
        // Level 1 first; within level 1 larger 101 first; within level 3
        // equal sizes break lexicographically.
        assert_eq!(
            order,
            vec![
                "101".to_string(),
                "102".to_string(),
                "301".to_string(),
                "303".to_string()
            ]
        );
    }

    #[test]
    fn test_deterministic_under_input_permutation() {
        let map = groups(vec![
            group("101", 1, 30),
            group("102", 1, 20),
            group("301", 3, 35),
        ]);
        let a = vec![session("101", 8), session("102", 12), session("301", 12)];
        let b = vec![session("301", 12), session("101", 8), session("102", 12)];
        let cfg = EngineConfig::default();
        let order_a = order_groups(&a, &map, &HashSet::new(), &cfg);
        let order_b = order_groups(&b, &map, &HashSet::new(), &cfg);
        assert_eq!(order_a, order_b);
        assert_eq!(order_a[0], "101"); // the only early-morning group
    }

    #[test]
    fn test_early_morning_requires_exact_start() {
        // 09:30 is not in the default early set
        let sessions = vec![session("201", 12), {
            let mut s = session("102", 9);
            s.start = TimeOfDay::hm(9, 30);
            s
        }];
        let map = groups(vec![group("201", 2, 20), group("102", 1, 20)]);
        let order = order_groups(&sessions, &map, &HashSet::new(), &EngineConfig::default());
        // 102 still wins, but on level, not on early-morning
        assert_eq!(order[0], "102");

        let early: Vec<_> = sessions
            .iter()
            .filter(|s| EngineConfig::default().is_early_start(s.start))
            .collect();
        assert!(early.is_empty());
    }

    #[test]
    fn test_unknown_group_still_ordered() {
        let sessions = vec![session("VIR", 12), session("101", 12)];
        let map = groups(vec![group("101", 1, 30)]);
        let order = order_groups(&sessions, &map, &HashSet::new(), &EngineConfig::default());
        // Unknown group gets level 0 → sorts before level 1
        assert_eq!(order, vec!["VIR".to_string(), "101".to_string()]);
    }
}
