//! Static dataset behind the consumer-survey dashboard: highlights from
//! 1,000 affluent US consumers surveyed in September 2025.

pub const RESPONDENTS: u32 = 1_000;
pub const FIELDED: &str = "Sep 2025";

pub struct KeyMetric {
    pub label: &'static str,
    pub value: &'static str,
    pub note: &'static str,
}

pub const KEY_METRICS: &[KeyMetric] = &[
    KeyMetric {
        label: "Positive Interest",
        value: "86%",
        note: "Broad appeal across affluent consumers.",
    },
    KeyMetric {
        label: "High-Intent Users",
        value: "56%",
        note: "Would use regularly.",
    },
    KeyMetric {
        label: "Daily Use Intent",
        value: "20%",
        note: "Daily habit potential, rare in fintech.",
    },
    KeyMetric {
        label: "Problem-Solution Fit",
        value: "99%",
        note: "Multiple use cases per user (avg 2.0).",
    },
    KeyMetric {
        label: "Card Choice Impact",
        value: "67%",
        note: "Feature influences issuer selection.",
    },
    KeyMetric {
        label: "Avg Problems Solved",
        value: "2.0",
        note: "Per respondent across use cases.",
    },
];

pub struct SurveySlice {
    pub label: &'static str,
    pub pct: u32,
}

pub const INTEREST_LEVELS: &[SurveySlice] = &[
    SurveySlice { label: "Extremely", pct: 20 },
    SurveySlice { label: "Very", pct: 36 },
    SurveySlice { label: "Moderately", pct: 29 },
    SurveySlice { label: "Slightly", pct: 10 },
    SurveySlice { label: "Not", pct: 4 },
];

/// Multi-select: percentages intentionally sum past 100.
pub const USE_CASES: &[SurveySlice] = &[
    SurveySlice { label: "Spending analysis", pct: 64 },
    SurveySlice { label: "Fraud detection", pct: 49 },
    SurveySlice { label: "Recall purchases", pct: 47 },
    SurveySlice { label: "Returns & warranties", pct: 37 },
];

pub const CARD_IMPACT: &[SurveySlice] = &[
    SurveySlice { label: "Deal-breaker", pct: 1 },
    SurveySlice { label: "Major", pct: 25 },
    SurveySlice { label: "Moderate", pct: 42 },
    SurveySlice { label: "Minor", pct: 26 },
    SurveySlice { label: "No impact", pct: 6 },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_select_slices_cover_respondents() {
        let interest: u32 = INTEREST_LEVELS.iter().map(|s| s.pct).sum();
        assert!((95..=100).contains(&interest), "interest sums to {interest}");
        let impact: u32 = CARD_IMPACT.iter().map(|s| s.pct).sum();
        assert_eq!(impact, 100);
    }

    #[test]
    fn test_use_cases_average_two_per_respondent() {
        let total: u32 = USE_CASES.iter().map(|s| s.pct).sum();
        let avg = total as f64 / 100.0;
        assert!((1.8..=2.2).contains(&avg), "avg use cases {avg}");
    }

    #[test]
    fn test_key_metrics_present() {
        assert_eq!(KEY_METRICS.len(), 6);
        assert!(KEY_METRICS.iter().any(|m| m.label == "Positive Interest"));
    }
}
