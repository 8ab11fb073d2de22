use chrono::{DateTime, Duration, NaiveDate, Utc};

use super::track::StreakTrack;

/// Grace-period availability at the moment a track is advanced.
///
/// The grace timestamp is shared across all of a user's tracks, but only
/// grace-eligible tracks may spend it.
#[derive(Debug, Clone, Copy)]
pub struct GraceOutlook {
    pub eligible: bool,
    pub last_used_at: Option<DateTime<Utc>>,
    pub now: DateTime<Utc>,
    pub cooldown: Duration,
}

impl GraceOutlook {
    pub fn unavailable(now: DateTime<Utc>) -> Self {
        Self {
            eligible: false,
            last_used_at: None,
            now,
            cooldown: Duration::zero(),
        }
    }

    fn available(&self) -> bool {
        if !self.eligible {
            return false;
        }
        match self.last_used_at {
            None => true,
            Some(used_at) => self.now.signed_duration_since(used_at) >= self.cooldown,
        }
    }
}

/// Result of advancing one track by one activity event.
#[derive(Debug, Clone, Copy)]
pub struct TrackTransition {
    pub track: StreakTrack,
    /// The grace period was spent on this transition; the caller must
    /// persist the new grace timestamp.
    pub grace_consumed: bool,
    /// Today newly counted as an active day for this track.
    pub counted_day: bool,
    /// The streak was reset to 1 after an unforgiven gap.
    pub broke: bool,
}

impl TrackTransition {
    fn unchanged(track: StreakTrack) -> Self {
        Self {
            track,
            grace_consumed: false,
            counted_day: false,
            broke: false,
        }
    }
}

/// Pure state machine mapping (previous track, today) to a new track.
///
/// All comparisons are on calendar dates; resolving "today" in the user's
/// timezone is the caller's responsibility.
pub struct StreakTransitionEngine;

impl StreakTransitionEngine {
    pub fn advance(track: &StreakTrack, today: NaiveDate, grace: &GraceOutlook) -> TrackTransition {
        let last = match track.last_active_date {
            None => {
                // First-ever activity on this track.
                return TrackTransition {
                    track: StreakTrack {
                        count: 1,
                        cycle: 1,
                        last_active_date: Some(today),
                    },
                    grace_consumed: false,
                    counted_day: true,
                    broke: false,
                };
            }
            Some(last) => last,
        };

        // Same-day calls are no-ops, and a date earlier than the last
        // active day must not move last_active_date backwards.
        if today <= last {
            return TrackTransition::unchanged(*track);
        }

        let gap = (today - last).num_days();

        if gap == 1 {
            return TrackTransition {
                track: StreakTrack {
                    count: track.count + 1,
                    cycle: track.cycle,
                    last_active_date: Some(today),
                },
                grace_consumed: false,
                counted_day: true,
                broke: false,
            };
        }

        if gap == 2 && grace.available() {
            return TrackTransition {
                track: StreakTrack {
                    count: track.count + 1,
                    cycle: track.cycle,
                    last_active_date: Some(today),
                },
                grace_consumed: true,
                counted_day: true,
                broke: false,
            };
        }

        // Unforgiven gap: the streak breaks. A single isolated active day
        // is not a completed attempt, so it does not advance the cycle.
        let cycle = if track.count > 1 {
            track.cycle + 1
        } else {
            track.cycle
        };

        TrackTransition {
            track: StreakTrack {
                count: 1,
                cycle,
                last_active_date: Some(today),
            },
            grace_consumed: false,
            counted_day: true,
            broke: true,
        }
    }
}
