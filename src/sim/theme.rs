//! Visual themes and score-driven progression

use serde::{Deserialize, Serialize};

use crate::consts::POINTS_PER_LEVEL;

/// Named visual mode, selected purely from score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    StreetMorning,
    StreetNight,
    NeonAvenue,
    HyperSpeed,
    /// Festive override for every fourth level
    MerryMode,
}

/// Score thresholds for the ordinary progression, highest first
const TIERS: [(u64, Theme); 4] = [
    (5000, Theme::HyperSpeed),
    (2500, Theme::NeonAvenue),
    (1000, Theme::StreetNight),
    (0, Theme::StreetMorning),
];

impl Theme {
    pub const ALL: [Theme; 5] = [
        Theme::StreetMorning,
        Theme::StreetNight,
        Theme::NeonAvenue,
        Theme::HyperSpeed,
        Theme::MerryMode,
    ];

    /// Pick the theme for a score.
    ///
    /// `level = score / 1000`; when `level + 1` is a multiple of four the
    /// Merry override wins, otherwise the highest tier reached applies.
    pub fn for_score(score: u64) -> Self {
        let level = score / POINTS_PER_LEVEL;
        if (level + 1) % 4 == 0 {
            return Theme::MerryMode;
        }
        TIERS
            .iter()
            .find(|(threshold, _)| score >= *threshold)
            .map(|&(_, theme)| theme)
            .unwrap_or(Theme::StreetMorning)
    }

    /// Neon, hyper and merry themes switch on streamers, disco sky and fast lights
    pub fn is_party(self) -> bool {
        matches!(
            self,
            Theme::NeonAvenue | Theme::HyperSpeed | Theme::MerryMode
        )
    }

    /// Identifier used for the page's CSS class
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::StreetMorning => "street-morning",
            Theme::StreetNight => "street-night",
            Theme::NeonAvenue => "neon-avenue",
            Theme::HyperSpeed => "hyper-speed",
            Theme::MerryMode => "merry-mode",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_of_run_is_morning() {
        assert_eq!(Theme::for_score(0), Theme::StreetMorning);
        assert_eq!(Theme::for_score(999), Theme::StreetMorning);
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(Theme::for_score(1000), Theme::StreetNight);
        assert_eq!(Theme::for_score(2499), Theme::StreetNight);
        assert_eq!(Theme::for_score(2500), Theme::NeonAvenue);
        assert_eq!(Theme::for_score(2999), Theme::NeonAvenue);
    }

    #[test]
    fn test_fourth_level_is_merry() {
        assert_eq!(Theme::for_score(3000), Theme::MerryMode);
        assert_eq!(Theme::for_score(3999), Theme::MerryMode);
        assert_eq!(Theme::for_score(4000), Theme::NeonAvenue);
        assert_eq!(Theme::for_score(7000), Theme::MerryMode);
        assert_eq!(Theme::for_score(11_500), Theme::MerryMode);
    }

    #[test]
    fn test_hyper_speed_from_5000() {
        assert_eq!(Theme::for_score(5000), Theme::HyperSpeed);
        assert_eq!(Theme::for_score(6999), Theme::HyperSpeed);
        assert_eq!(Theme::for_score(8000), Theme::HyperSpeed);
    }

    #[test]
    fn test_for_score_is_pure() {
        for score in (0..20_000).step_by(37) {
            assert_eq!(Theme::for_score(score), Theme::for_score(score));
        }
    }

    #[test]
    fn test_party_themes() {
        let party: Vec<_> = Theme::ALL.iter().filter(|t| t.is_party()).collect();
        assert_eq!(
            party,
            [&Theme::NeonAvenue, &Theme::HyperSpeed, &Theme::MerryMode]
        );
    }
}
