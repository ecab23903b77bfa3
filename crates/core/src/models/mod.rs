//! Shared domain models.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable identifier assigned to a game when it enters the library.
///
/// Ids are unique for the lifetime of the process; the library hands them
/// out sequentially and never reuses one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GameId(pub u64);

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The seven rating criteria, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum Criterion {
    Story,
    Context,
    Atmosphere,
    Gameplay,
    Visual,
    Sound,
    Personal,
}

impl Criterion {
    /// Canonical ordering used by the editor and the details panel.
    pub const ALL: [Criterion; 7] = [
        Criterion::Story,
        Criterion::Context,
        Criterion::Atmosphere,
        Criterion::Gameplay,
        Criterion::Visual,
        Criterion::Sound,
        Criterion::Personal,
    ];

    /// Human-readable label for the criterion.
    pub fn label(self) -> &'static str {
        match self {
            Criterion::Story => "Story & meaning",
            Criterion::Context => "Context & lore",
            Criterion::Atmosphere => "Space & atmosphere",
            Criterion::Gameplay => "Gameplay interaction",
            Criterion::Visual => "Visual expression",
            Criterion::Sound => "Sound environment",
            Criterion::Personal => "Personal impression",
        }
    }

    /// Fixed weight of the criterion in the composite score. Weights sum to 1.0.
    pub fn weight(self) -> f64 {
        match self {
            Criterion::Story => 0.20,
            Criterion::Context => 0.10,
            Criterion::Atmosphere => 0.15,
            Criterion::Gameplay => 0.25,
            Criterion::Visual => 0.10,
            Criterion::Sound => 0.10,
            Criterion::Personal => 0.10,
        }
    }
}

/// A rating across the seven criteria. Every field is in 1..=10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct GameRating {
    pub story: u8,
    pub context: u8,
    pub atmosphere: u8,
    pub gameplay: u8,
    pub visual: u8,
    pub sound: u8,
    pub personal: u8,
}

impl Default for GameRating {
    /// Mid-scale rating (all fives) used to seed the editor for unrated games.
    fn default() -> Self {
        Self::uniform(5)
    }
}

impl GameRating {
    /// Build a rating with every criterion set to the same value.
    pub fn uniform(value: u8) -> Self {
        Self {
            story: value,
            context: value,
            atmosphere: value,
            gameplay: value,
            visual: value,
            sound: value,
            personal: value,
        }
    }

    /// Read the value for a single criterion.
    pub fn get(&self, criterion: Criterion) -> u8 {
        match criterion {
            Criterion::Story => self.story,
            Criterion::Context => self.context,
            Criterion::Atmosphere => self.atmosphere,
            Criterion::Gameplay => self.gameplay,
            Criterion::Visual => self.visual,
            Criterion::Sound => self.sound,
            Criterion::Personal => self.personal,
        }
    }

    /// Write the value for a single criterion. Callers are expected to keep
    /// values within 1..=10; the editor clamps before calling this.
    pub fn set(&mut self, criterion: Criterion, value: u8) {
        let slot = match criterion {
            Criterion::Story => &mut self.story,
            Criterion::Context => &mut self.context,
            Criterion::Atmosphere => &mut self.atmosphere,
            Criterion::Gameplay => &mut self.gameplay,
            Criterion::Visual => &mut self.visual,
            Criterion::Sound => &mut self.sound,
            Criterion::Personal => &mut self.personal,
        };
        *slot = value;
    }

    /// True when every field lies within the valid 1..=10 range.
    pub fn is_valid(&self) -> bool {
        Criterion::ALL
            .iter()
            .all(|&criterion| (1..=10).contains(&self.get(criterion)))
    }
}

/// A game tracked in the library.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    /// Unique id, assigned at creation and stable afterwards.
    pub id: GameId,
    /// Non-empty title.
    pub title: String,
    /// Release year.
    pub year: i32,
    /// Cover image reference; defaults to the configured placeholder.
    pub image_url: String,
    /// Free-form description, may be empty.
    pub description: String,
    /// Rating across the seven criteria; `None` means unrated.
    pub rating: Option<GameRating>,
    /// When the game was added to the library.
    pub added_at: DateTime<Utc>,
}

impl Game {
    /// True when the game carries a rating.
    pub fn is_rated(&self) -> bool {
        self.rating.is_some()
    }
}

/// User-entered fields for a new library entry.
#[derive(Debug, Clone, Default)]
#[allow(missing_docs)]
pub struct GameDraft {
    pub title: String,
    pub year: i32,
    pub image_url: Option<String>,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_one() {
        let total: f64 = Criterion::ALL.iter().map(|c| c.weight()).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn default_rating_is_mid_scale() {
        let rating = GameRating::default();
        for criterion in Criterion::ALL {
            assert_eq!(rating.get(criterion), 5);
        }
        assert!(rating.is_valid());
    }

    #[test]
    fn get_and_set_cover_every_criterion() {
        let mut rating = GameRating::uniform(1);
        for (idx, criterion) in Criterion::ALL.into_iter().enumerate() {
            rating.set(criterion, idx as u8 + 2);
        }
        assert_eq!(rating.story, 2);
        assert_eq!(rating.context, 3);
        assert_eq!(rating.atmosphere, 4);
        assert_eq!(rating.gameplay, 5);
        assert_eq!(rating.visual, 6);
        assert_eq!(rating.sound, 7);
        assert_eq!(rating.personal, 8);
    }

    #[test]
    fn out_of_range_fields_are_invalid() {
        let mut rating = GameRating::default();
        rating.story = 0;
        assert!(!rating.is_valid());
        rating.story = 11;
        assert!(!rating.is_valid());
    }
}
