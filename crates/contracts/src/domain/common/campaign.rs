//! Validity window shared by promotions and vouchers.

use chrono::NaiveDate;

use crate::shared::validation::parse_date;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignPhase {
    NotStarted,
    Active,
    Expired,
    Disabled,
}

impl CampaignPhase {
    /// Date checks win over the stored flag; unparseable dates count as open-ended
    pub fn of(start: &str, end: &str, active: bool, today: NaiveDate) -> Self {
        if parse_date(start).is_some_and(|start| today < start) {
            return CampaignPhase::NotStarted;
        }
        if parse_date(end).is_some_and(|end| today > end) {
            return CampaignPhase::Expired;
        }
        if active {
            CampaignPhase::Active
        } else {
            CampaignPhase::Disabled
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CampaignPhase::NotStarted => "Chưa bắt đầu",
            CampaignPhase::Active => "Đang diễn ra",
            CampaignPhase::Expired => "Đã kết thúc",
            CampaignPhase::Disabled => "Tạm dừng",
        }
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            CampaignPhase::NotStarted => "status-pending",
            CampaignPhase::Active => "status-active",
            CampaignPhase::Expired => "status-expired",
            CampaignPhase::Disabled => "status-inactive",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        assert_eq!(CampaignPhase::of("2025-07-01", "2025-07-31", true, today), CampaignPhase::NotStarted);
        assert_eq!(CampaignPhase::of("2025-05-01", "2025-06-14", true, today), CampaignPhase::Expired);
        assert_eq!(CampaignPhase::of("2025-06-01", "2025-06-15", true, today), CampaignPhase::Active);
        assert_eq!(CampaignPhase::of("2025-06-01", "2025-06-30", false, today), CampaignPhase::Disabled);
        assert_eq!(CampaignPhase::of("", "", true, today), CampaignPhase::Active);
    }
}
