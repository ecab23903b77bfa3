//! Rating editor state machine.
//!
//! The editor dialog is either closed (no `RatingEditor` exists) or open with
//! a seeded buffer. Adjustments mutate only the buffer; the stored game is
//! untouched until the buffer is committed via `Library::save_rating`.
//! Dropping the editor discards the buffer, which is all "cancel" means.

use tracing::debug;

use crate::models::{Criterion, Game, GameId, GameRating};

/// Lowest value a criterion can take.
pub const MIN_VALUE: u8 = 1;
/// Highest value a criterion can take.
pub const MAX_VALUE: u8 = 10;

/// An open rating dialog: the target game plus the uncommitted edit buffer.
#[derive(Debug, Clone)]
pub struct RatingEditor {
    game_id: GameId,
    buffer: GameRating,
}

impl RatingEditor {
    /// Open the editor for a game, seeding the buffer from its existing
    /// rating or from the all-fives default when it is unrated.
    pub fn open(game: &Game) -> Self {
        let buffer = game.rating.unwrap_or_default();
        debug!(id = %game.id, title = %game.title, seeded = game.rating.is_some(), "Rating editor opened");
        Self {
            game_id: game.id,
            buffer,
        }
    }

    /// Id of the game the buffer belongs to.
    pub fn game_id(&self) -> GameId {
        self.game_id
    }

    /// The current uncommitted buffer.
    pub fn buffer(&self) -> &GameRating {
        &self.buffer
    }

    /// Set one criterion, clamping to 1..=10.
    pub fn set(&mut self, criterion: Criterion, value: u8) {
        self.buffer
            .set(criterion, value.clamp(MIN_VALUE, MAX_VALUE));
    }

    /// Nudge one criterion by a signed delta, clamping to 1..=10.
    pub fn adjust(&mut self, criterion: Criterion, delta: i8) {
        let current = self.buffer.get(criterion) as i16;
        let next = (current + delta as i16).clamp(MIN_VALUE as i16, MAX_VALUE as i16);
        self.buffer.set(criterion, next as u8);
    }

    /// Consume the editor, yielding the buffer for `Library::save_rating`.
    pub fn into_rating(self) -> GameRating {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn game(rating: Option<GameRating>) -> Game {
        Game {
            id: GameId(7),
            title: "Disco Elysium".to_string(),
            year: 2019,
            image_url: String::new(),
            description: String::new(),
            rating,
            added_at: Utc::now(),
        }
    }

    #[test]
    fn seeds_from_existing_rating() {
        let rating = GameRating::uniform(8);
        let editor = RatingEditor::open(&game(Some(rating)));
        assert_eq!(editor.buffer(), &rating);
        assert_eq!(editor.game_id(), GameId(7));
    }

    #[test]
    fn seeds_all_fives_for_unrated_games() {
        let editor = RatingEditor::open(&game(None));
        assert_eq!(editor.buffer(), &GameRating::uniform(5));
    }

    #[test]
    fn adjust_clamps_at_both_ends() {
        let mut editor = RatingEditor::open(&game(None));
        for _ in 0..20 {
            editor.adjust(Criterion::Story, 1);
        }
        assert_eq!(editor.buffer().story, 10);
        for _ in 0..20 {
            editor.adjust(Criterion::Story, -1);
        }
        assert_eq!(editor.buffer().story, 1);
    }

    #[test]
    fn set_clamps_out_of_range_values() {
        let mut editor = RatingEditor::open(&game(None));
        editor.set(Criterion::Sound, 0);
        assert_eq!(editor.buffer().sound, 1);
        editor.set(Criterion::Sound, 12);
        assert_eq!(editor.buffer().sound, 10);
        editor.set(Criterion::Sound, 7);
        assert_eq!(editor.buffer().sound, 7);
    }

    #[test]
    fn editing_never_touches_the_game_until_commit() {
        let original = game(Some(GameRating::uniform(3)));
        let mut editor = RatingEditor::open(&original);
        editor.set(Criterion::Gameplay, 10);
        assert_eq!(original.rating, Some(GameRating::uniform(3)));

        let committed = editor.into_rating();
        assert_eq!(committed.gameplay, 10);
        assert_eq!(committed.story, 3);
    }
}
