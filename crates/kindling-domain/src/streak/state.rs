use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::engine::{GraceOutlook, StreakTransitionEngine, TrackTransition};
use super::track::{StreakKind, StreakTrack};
use crate::shared::UserId;

/// Per-user streak record: three independent tracks, the shared grace
/// timestamp, and the lifetime active-day counter.
///
/// Created lazily on a user's first activity event and never deleted;
/// `reset` zeroes the tracks while retaining the row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserStreakState {
    user_id: UserId,
    presence: StreakTrack,
    kindness: StreakTrack,
    response: StreakTrack,
    grace_period_used_at: Option<DateTime<Utc>>,
    total_active_days: u32,
    version: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserStreakState {
    pub fn new(user_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            presence: StreakTrack::empty(),
            kindness: StreakTrack::empty(),
            response: StreakTrack::empty(),
            grace_period_used_at: None,
            total_active_days: 0,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        user_id: UserId,
        presence: StreakTrack,
        kindness: StreakTrack,
        response: StreakTrack,
        grace_period_used_at: Option<DateTime<Utc>>,
        total_active_days: u32,
        version: i64,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            presence,
            kindness,
            response,
            grace_period_used_at,
            total_active_days,
            version,
            created_at,
            updated_at,
        }
    }

    /// Advance one track to `today`, spending the shared grace period when
    /// the transition consumes it and counting presence days toward the
    /// lifetime total.
    pub fn advance(
        &mut self,
        kind: StreakKind,
        today: NaiveDate,
        now: DateTime<Utc>,
        grace_cooldown: Duration,
    ) -> TrackTransition {
        let grace = GraceOutlook {
            eligible: kind.grace_eligible(),
            last_used_at: self.grace_period_used_at,
            now,
            cooldown: grace_cooldown,
        };

        let transition = StreakTransitionEngine::advance(self.track(kind), today, &grace);

        *self.track_mut(kind) = transition.track;
        if transition.grace_consumed {
            self.grace_period_used_at = Some(now);
        }
        if transition.counted_day && kind == StreakKind::Presence {
            self.total_active_days += 1;
        }
        if transition.counted_day {
            self.updated_at = now;
        }

        transition
    }

    /// Zero all tracks and the grace timestamp (account reset). The
    /// lifetime counter and ledger history are retained.
    pub fn reset(&mut self, now: DateTime<Utc>) {
        self.presence = StreakTrack::empty();
        self.kindness = StreakTrack::empty();
        self.response = StreakTrack::empty();
        self.grace_period_used_at = None;
        self.updated_at = now;
    }

    /// All three tracks were active on the given calendar day.
    pub fn balanced_day(&self, date: NaiveDate) -> bool {
        self.presence.active_on(date)
            && self.kindness.active_on(date)
            && self.response.active_on(date)
    }

    pub fn track(&self, kind: StreakKind) -> &StreakTrack {
        match kind {
            StreakKind::Presence => &self.presence,
            StreakKind::Kindness => &self.kindness,
            StreakKind::Response => &self.response,
        }
    }

    fn track_mut(&mut self, kind: StreakKind) -> &mut StreakTrack {
        match kind {
            StreakKind::Presence => &mut self.presence,
            StreakKind::Kindness => &mut self.kindness,
            StreakKind::Response => &mut self.response,
        }
    }

    // Getters
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn presence(&self) -> &StreakTrack {
        &self.presence
    }

    pub fn kindness(&self) -> &StreakTrack {
        &self.kindness
    }

    pub fn response(&self) -> &StreakTrack {
        &self.response
    }

    pub fn grace_period_used_at(&self) -> Option<DateTime<Utc>> {
        self.grace_period_used_at
    }

    pub fn total_active_days(&self) -> u32 {
        self.total_active_days
    }

    pub fn version(&self) -> i64 {
        self.version
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
