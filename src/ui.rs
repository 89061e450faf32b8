//! HUD and menu helpers shared by the page glue

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::consts::POINTS_PER_LEVEL;

/// A selectable runner on the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerProfile {
    pub name: &'static str,
    /// CSS color of the avatar bubble
    pub avatar_color: &'static str,
}

pub const PLAYERS: [PlayerProfile; 2] = [
    PlayerProfile {
        name: "Lily",
        avatar_color: "#F472B6",
    },
    PlayerProfile {
        name: "Theo",
        avatar_color: "#60A5FA",
    },
];

/// Used when no profile was picked
pub const GUEST_NAME: &str = "Guest";

pub fn profile(name: &str) -> Option<&'static PlayerProfile> {
    PLAYERS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

/// Battery gauge percentage: progress through the current 1000-point level
pub fn battery_level(score: u64) -> f32 {
    ((score % POINTS_PER_LEVEL) as f32 / 10.0).min(100.0)
}

pub const DEATH_MESSAGES: [&str; 33] = [
    "Why was 6 afraid of 7? Because 7 ate 9!",
    "Emotional Damage!",
    "Yeet!",
    "Mission Failed!",
    "Yule be sorry!",
    "Sleigh it ain't so!",
    "Oh deer...",
    "That was cold.",
    "Up to snow good?",
    "Rest in Peas (and carrots).",
    "You've been elf-ed.",
    "Snow way you missed that!",
    "Not very ice.",
    "Clause for concern.",
    "Wait for the myrrh-acle.",
    "Don't get your tinsel in a tangle.",
    "Birch, please.",
    "Fleece Navidad!",
    "Check your elf before you wreck your elf.",
    "Hold on for deer life!",
    "That bit.",
    "Oh snap! (Ginger-snap)",
    "Feeling pine?",
    "Mistle-toast.",
    "Bah humbug!",
    "Fir sure!",
    "Ice to meet you!",
    "There's snow place like home.",
    "Sleigh my name, sleigh my name.",
    "You crack me up.",
    "But wait, there's myrrh!",
    "Rebel without a Claus.",
    "Make it rein!",
];

/// Pick the crash screen quip
pub fn death_message(rng: &mut impl Rng) -> &'static str {
    DEATH_MESSAGES.choose(rng).copied().unwrap_or("Bah humbug!")
}

/// Format a timestamp as a relative date string
#[cfg(target_arch = "wasm32")]
pub fn format_date(timestamp: f64) -> String {
    relative_date(js_sys::Date::now() - timestamp)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn format_date(_timestamp: f64) -> String {
    "N/A".to_string()
}

/// Human wording for an age in milliseconds
pub fn relative_date(age_ms: f64) -> String {
    let mins = (age_ms / 60_000.0).floor() as i64;
    let hours = mins / 60;
    let days = hours / 24;

    match (days, hours, mins) {
        (1, _, _) => "Yesterday".to_string(),
        (d, _, _) if d > 1 => format!("{} days ago", d),
        (_, 1, _) => "1 hour ago".to_string(),
        (_, h, _) if h > 1 => format!("{} hours ago", h),
        (_, _, 1) => "1 min ago".to_string(),
        (_, _, m) if m > 1 => format!("{} mins ago", m),
        _ => "Just now".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_battery_tracks_level_progress() {
        assert_eq!(battery_level(0), 0.0);
        assert_eq!(battery_level(500), 50.0);
        assert_eq!(battery_level(999), 99.9);
        assert_eq!(battery_level(1000), 0.0);
        assert_eq!(battery_level(3250), 25.0);
    }

    #[test]
    fn test_profiles() {
        assert_eq!(profile("lily").map(|p| p.avatar_color), Some("#F472B6"));
        assert_eq!(profile("Theo").map(|p| p.avatar_color), Some("#60A5FA"));
        assert!(profile(GUEST_NAME).is_none());
    }

    #[test]
    fn test_death_message_from_list() {
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..20 {
            assert!(DEATH_MESSAGES.contains(&death_message(&mut rng)));
        }
    }

    #[test]
    fn test_relative_dates() {
        assert_eq!(relative_date(5_000.0), "Just now");
        assert_eq!(relative_date(90_000.0), "1 min ago");
        assert_eq!(relative_date(3.0 * 3_600_000.0), "3 hours ago");
        assert_eq!(relative_date(30.0 * 3_600_000.0), "Yesterday");
        assert_eq!(relative_date(5.0 * 86_400_000.0), "5 days ago");
    }
}
