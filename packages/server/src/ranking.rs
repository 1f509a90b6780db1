//! Derived, non-persisted ranked view over a contest's results.
//!
//! One computation backs the leaderboard page, the rank endpoint, and the
//! best-effort rank reported after a submission. It is recomputed on demand
//! from a point-in-time read and takes no locks; a contest observed
//! mid-update is acceptable because the view is advisory, not a source of
//! truth.

use std::collections::HashMap;

use contracts::contests::{BestAttempt, LeaderboardEntry};

use crate::entity::{contest_result, user};

/// Select a user's best attempt: higher wpm wins, then higher accuracy.
/// Remaining ties keep the earliest attempt. Consistency deliberately plays
/// no part (pending product clarification).
pub fn best_attempt(results: &[contest_result::Model]) -> Option<&contest_result::Model> {
    results.iter().reduce(|best, current| {
        if current.wpm > best.wpm || (current.wpm == best.wpm && current.acc > best.acc) {
            current
        } else {
            best
        }
    })
}

/// Build the full ranked view for a contest.
///
/// `results` holds every attempt for the contest in stored (attempt) order;
/// `profiles` maps user ids to their profile rows. Users without a profile
/// row get a placeholder name and omitted discord/premium fields.
pub fn ranked_view(
    results: &[contest_result::Model],
    profiles: &HashMap<i32, user::Model>,
) -> Vec<LeaderboardEntry> {
    let mut by_user: HashMap<i32, Vec<&contest_result::Model>> = HashMap::new();
    for result in results {
        by_user.entry(result.user_id).or_default().push(result);
    }

    let mut entries: Vec<LeaderboardEntry> = Vec::with_capacity(by_user.len());
    for (user_id, attempts) in by_user {
        let Some(best) = best_attempt_from_refs(&attempts) else {
            continue;
        };

        let profile = profiles.get(&user_id);
        entries.push(LeaderboardEntry {
            wpm: best.wpm,
            raw_wpm: best.raw_wpm,
            cpm: best.cpm,
            acc: best.acc,
            consistency: best.consistency,
            timestamp: best.timestamp,
            user_id,
            name: profile
                .map(|p| p.display_name.clone())
                .unwrap_or_else(|| "Unknown".into()),
            discord_id: profile.and_then(|p| p.discord_id.clone()),
            discord_avatar: profile.and_then(|p| p.discord_avatar.clone()),
            is_premium: profile.map(|p| p.is_premium),
            rank: 0, // assigned below, after sorting the full set
            best_attempt: BestAttempt {
                wpm: best.wpm,
                raw_wpm: best.raw_wpm,
                cpm: best.cpm,
                acc: best.acc,
                consistency: best.consistency,
                timestamp: best.timestamp,
                test_duration: best.test_duration,
                attempt_number: best.attempt_number,
            },
            total_attempts: attempts.len() as u64,
        });
    }

    // Cross-user ordering: wpm descending, ties by earlier submission.
    entries.sort_by(|a, b| {
        b.wpm
            .partial_cmp(&a.wpm)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.timestamp.cmp(&b.timestamp))
    });

    for (index, entry) in entries.iter_mut().enumerate() {
        entry.rank = index as u32 + 1;
    }

    entries
}

/// Find a user's entry in the full ranked view.
pub fn user_entry(entries: &[LeaderboardEntry], user_id: i32) -> Option<&LeaderboardEntry> {
    entries.iter().find(|e| e.user_id == user_id)
}

/// Slice one page out of the full entry set.
pub fn page<T: Clone>(entries: &[T], offset: usize, limit: usize) -> Vec<T> {
    entries
        .iter()
        .skip(offset)
        .take(limit)
        .cloned()
        .collect()
}

fn best_attempt_from_refs<'a>(
    attempts: &[&'a contest_result::Model],
) -> Option<&'a contest_result::Model> {
    attempts.iter().copied().reduce(|best, current| {
        if current.wpm > best.wpm || (current.wpm == best.wpm && current.acc > best.acc) {
            current
        } else {
            best
        }
    })
}
