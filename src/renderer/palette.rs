//! Per-theme colors

use super::vertex::{Color, rgb};
use crate::sim::Theme;

/// Base colors of a theme
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub sky: Color,
    pub ground: Color,
    pub road_marking: Color,
    pub accent: Color,
}

impl Palette {
    pub const fn of(theme: Theme) -> Self {
        match theme {
            Theme::StreetMorning => Palette {
                sky: rgb(0x87CEEB),
                ground: rgb(0x78716C),
                road_marking: rgb(0xD6D3D1),
                accent: rgb(0xFFFFFF),
            },
            Theme::StreetNight => Palette {
                sky: rgb(0x1E1B4B),
                ground: rgb(0x44403C),
                road_marking: rgb(0xA8A29E),
                accent: rgb(0xF0F9FF),
            },
            Theme::NeonAvenue => Palette {
                sky: rgb(0x312E81),
                ground: rgb(0x27272A),
                road_marking: rgb(0xE879F9),
                accent: rgb(0xE879F9),
            },
            Theme::HyperSpeed => Palette {
                sky: rgb(0x000000),
                ground: rgb(0xEF4444),
                road_marking: rgb(0xF87171),
                accent: rgb(0xFBBF24),
            },
            Theme::MerryMode => Palette {
                sky: rgb(0x2E1065),
                ground: rgb(0x4C1D95),
                road_marking: rgb(0xF472B6),
                accent: rgb(0xFDE047),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_theme_has_distinct_ground() {
        let grounds: Vec<Color> = Theme::ALL.iter().map(|t| Palette::of(*t).ground).collect();
        for (i, a) in grounds.iter().enumerate() {
            for b in &grounds[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_morning_sky() {
        assert_eq!(Palette::of(Theme::StreetMorning).sky, rgb(0x87CEEB));
    }
}
