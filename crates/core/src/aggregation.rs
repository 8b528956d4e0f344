// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use leadflow_domain::{Lead, LeadStatus, Team, User};

/// Read-only roll-up for one team.
///
/// Derived from the actual member and lead collections, never from the
/// team's denormalized counters, so it can be recomputed on demand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeamSummary {
    /// Number of users currently on the team.
    pub member_count: usize,
    /// Number of leads belonging to the team.
    pub lead_count: usize,
    /// Number of the team's leads with status `qualified`.
    pub converted_leads: usize,
    /// `converted_leads / lead_count * 100`, one decimal, 0 when
    /// `lead_count` is 0.
    pub conversion_rate: f64,
}

/// Read-only roll-up for one sales manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagerSummary {
    /// Number of teams owned by the manager.
    pub team_count: usize,
}

/// Per-status lead counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LeadStatistics {
    /// Leads with status `new`.
    pub new: usize,
    /// Leads with status `in_progress`.
    pub in_progress: usize,
    /// Leads with status `follow_up_1`.
    pub follow_up_1: usize,
    /// Leads with status `follow_up_2`.
    pub follow_up_2: usize,
    /// Leads with status `follow_up_3`.
    pub follow_up_3: usize,
    /// Leads with status `qualified`.
    pub qualified: usize,
    /// Leads with status `not_interested`.
    pub not_interested: usize,
    /// Leads with status `completed`.
    pub completed: usize,
    /// Total lead count.
    pub total: usize,
}

/// Rounds a percentage to one decimal place.
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Computes a percentage rate, defined as 0 when the denominator is 0.
fn percentage(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    round_one_decimal(numerator as f64 / denominator as f64 * 100.0)
}

/// Computes the roll-up summary for a team.
///
/// Pure and idempotent: identical inputs produce identical outputs, no
/// side effects. The `team` argument is accepted for symmetry with the
/// other summaries; all figures come from the passed collections.
#[must_use]
pub fn team_summary(_team: &Team, members: &[User], leads: &[Lead]) -> TeamSummary {
    let converted: usize = leads
        .iter()
        .filter(|lead| lead.status == LeadStatus::Qualified)
        .count();

    TeamSummary {
        member_count: members.len(),
        lead_count: leads.len(),
        converted_leads: converted,
        conversion_rate: percentage(converted, leads.len()),
    }
}

/// Computes the roll-up summary for a sales manager.
///
/// Counts the teams in `teams` owned by `manager`. Pure and idempotent.
#[must_use]
pub fn manager_summary(manager: &User, teams: &[Team]) -> ManagerSummary {
    let team_count: usize = teams
        .iter()
        .filter(|team| Some(team.manager_id) == manager.user_id)
        .count();

    ManagerSummary { team_count }
}

/// Computes a member's conversion rate from their denormalized counters.
///
/// `leads_qualified / lead_count * 100`, one decimal, 0 when
/// `lead_count` is 0 or negative.
#[must_use]
pub fn member_conversion_rate(user: &User) -> f64 {
    if user.lead_count <= 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    round_one_decimal(user.leads_qualified as f64 / user.lead_count as f64 * 100.0)
}

/// Finds the member with the highest conversion rate.
///
/// Ties are broken by first occurrence in input order: a later member
/// must be strictly better to take the lead. Returns `None` for an
/// empty roster.
#[must_use]
pub fn top_performer(members: &[User]) -> Option<&User> {
    let mut best: Option<(&User, f64)> = None;
    for member in members {
        let rate: f64 = member_conversion_rate(member);
        match best {
            Some((_, best_rate)) if rate <= best_rate => {}
            _ => best = Some((member, rate)),
        }
    }
    best.map(|(member, _)| member)
}

/// Counts leads per status.
///
/// Pure and idempotent; every lead lands in exactly one bucket.
#[must_use]
pub fn lead_statistics(leads: &[Lead]) -> LeadStatistics {
    let mut stats: LeadStatistics = LeadStatistics::default();
    for lead in leads {
        match lead.status {
            LeadStatus::New => stats.new += 1,
            LeadStatus::InProgress => stats.in_progress += 1,
            LeadStatus::FollowUp1 => stats.follow_up_1 += 1,
            LeadStatus::FollowUp2 => stats.follow_up_2 += 1,
            LeadStatus::FollowUp3 => stats.follow_up_3 += 1,
            LeadStatus::Qualified => stats.qualified += 1,
            LeadStatus::NotInterested => stats.not_interested += 1,
            LeadStatus::Completed => stats.completed += 1,
        }
        stats.total += 1;
    }
    stats
}
