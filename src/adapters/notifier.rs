use crate::core::Notifier;
use crate::domain::model::{CandidateProfile, JobProfile, MatchRun, Notification, ShortlistEntry};
use chrono::{NaiveDate, NaiveDateTime};

pub const DEFAULT_SENDER: &str = "HR Team";

/// 面試邀請信
#[derive(Debug, Clone)]
pub struct InterviewInvitationNotifier {
    sender: String,
    slots: Vec<NaiveDateTime>,
}

impl InterviewInvitationNotifier {
    pub fn new(sender: impl Into<String>, slots: Vec<NaiveDateTime>) -> Self {
        Self {
            sender: sender.into(),
            slots,
        }
    }

    pub fn default_slots() -> Vec<NaiveDateTime> {
        [(11, 10, 0), (12, 14, 30)]
            .iter()
            .filter_map(|&(day, hour, minute)| {
                NaiveDate::from_ymd_opt(2025, 4, day)?.and_hms_opt(hour, minute, 0)
            })
            .collect()
    }

    fn format_slot(slot: &NaiveDateTime) -> String {
        slot.format("%B %-d, %-I:%M %p").to_string()
    }
}

impl Default for InterviewInvitationNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_SENDER, Self::default_slots())
    }
}

impl Notifier for InterviewInvitationNotifier {
    fn compose(
        &self,
        job: &JobProfile,
        candidate: &CandidateProfile,
        entry: &ShortlistEntry,
    ) -> Option<Notification> {
        if candidate.email.trim().is_empty() {
            tracing::warn!(
                "⚠️ Candidate {} has no email address, skipping invitation for job {}",
                candidate.id,
                job.id
            );
            return None;
        }

        let name = if candidate.name.is_empty() {
            "Candidate"
        } else {
            candidate.name.as_str()
        };
        let slots: Vec<String> = self
            .slots
            .iter()
            .map(|slot| format!("  • {}", Self::format_slot(slot)))
            .collect();

        let body = format!(
            "Dear {},\n\n\
             You’ve been shortlisted for the {} position. \
             Please confirm your availability for an interview on:\n\n\
             {}\n\n\
             Regards,\n\
             {}\n",
            name,
            job.title,
            slots.join("\n"),
            self.sender
        );

        Some(Notification {
            job_id: entry.job_id,
            candidate_id: entry.candidate_id,
            recipient: candidate.email.trim().to_string(),
            subject: format!("Interview Invitation – {} Role", job.title),
            body,
        })
    }
}

/// 為入選名單中每一組配對產生通知
pub fn compose_notifications<N: Notifier + ?Sized>(run: &MatchRun, notifier: &N) -> Vec<Notification> {
    run.shortlisted_pairs()
        .filter_map(|(job, candidate, entry)| notifier.compose(job, candidate, entry))
        .collect()
}
