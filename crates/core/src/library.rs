//! In-memory library state store.
//!
//! The library owns the ordered collection of games and is only ever mutated
//! through the named actions below. All state is process-local; nothing is
//! persisted.

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{Game, GameDraft, GameId, GameRating};

/// Errors reported by library actions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LibraryError {
    /// The referenced game is not (or no longer) in the library.
    #[error("no game with id {0} in the library")]
    UnknownGame(GameId),
}

/// Year selection for the read-side projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YearFilter {
    /// Every game, in insertion order.
    #[default]
    All,
    /// Only games released in the given year.
    Year(i32),
}

impl YearFilter {
    fn matches(self, game: &Game) -> bool {
        match self {
            YearFilter::All => true,
            YearFilter::Year(year) => game.year == year,
        }
    }
}

/// Derived collection counts for the header display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct LibraryCounts {
    pub total: usize,
    pub rated: usize,
    pub unrated: usize,
}

/// Ordered, append-only collection of games.
#[derive(Debug)]
pub struct Library {
    games: Vec<Game>,
    next_id: u64,
    placeholder_image: String,
}

impl Library {
    /// Empty library. Drafts added without an image reference fall back to
    /// the given placeholder.
    pub fn new(placeholder_image: impl Into<String>) -> Self {
        Self {
            games: Vec::new(),
            next_id: 0,
            placeholder_image: placeholder_image.into(),
        }
    }

    /// Library seeded with the two demo entries shipped with the original
    /// tracker: one rated, one still waiting for a verdict.
    pub fn with_samples(placeholder_image: &str) -> Self {
        let mut library = Self::new(placeholder_image);
        if let Some(id) = library.add_game(GameDraft {
            title: "The Witcher 3: Wild Hunt".to_string(),
            year: 2015,
            image_url: None,
            description: "Epic RPG with a deep story and an open world".to_string(),
        }) {
            let _ = library.save_rating(
                id,
                GameRating {
                    story: 9,
                    context: 10,
                    atmosphere: 10,
                    gameplay: 8,
                    visual: 9,
                    sound: 9,
                    personal: 10,
                },
            );
        }
        library.add_game(GameDraft {
            title: "Cyberpunk 2077".to_string(),
            year: 2020,
            image_url: None,
            description: "Futuristic RPG set in a cyberpunk world".to_string(),
        });
        library
    }

    /// Append a new game built from the draft, assigning a fresh id.
    /// Drafts without an image reference get the library's placeholder.
    ///
    /// Returns `None` without touching the collection when the title is empty
    /// or whitespace-only; the UI is expected to keep the action disabled in
    /// that case rather than treat this as an error.
    pub fn add_game(&mut self, draft: GameDraft) -> Option<GameId> {
        let title = draft.title.trim();
        if title.is_empty() {
            debug!("add_game rejected: empty title");
            return None;
        }

        let id = GameId(self.next_id);
        self.next_id += 1;
        let game = Game {
            id,
            title: title.to_string(),
            year: draft.year,
            image_url: draft
                .image_url
                .unwrap_or_else(|| self.placeholder_image.clone()),
            description: draft.description,
            rating: None,
            added_at: Utc::now(),
        };
        info!(%id, title = %game.title, year = game.year, "Game added");
        self.games.push(game);
        Some(id)
    }

    /// Replace the rating of an existing game wholesale. Callers keep the
    /// fields within 1..=10; the editor clamps before committing.
    pub fn save_rating(&mut self, id: GameId, rating: GameRating) -> Result<(), LibraryError> {
        debug_assert!(rating.is_valid(), "rating fields must be within 1..=10");
        let game = self
            .games
            .iter_mut()
            .find(|game| game.id == id)
            .ok_or(LibraryError::UnknownGame(id))?;
        game.rating = Some(rating);
        info!(%id, title = %game.title, "Rating saved");
        Ok(())
    }

    /// Look up a game by id.
    pub fn game(&self, id: GameId) -> Option<&Game> {
        self.games.iter().find(|game| game.id == id)
    }

    /// The full collection in insertion order.
    pub fn games(&self) -> &[Game] {
        &self.games
    }

    /// Read-side projection of the collection under a year filter,
    /// preserving insertion order.
    pub fn filter(&self, filter: YearFilter) -> Vec<&Game> {
        self.games
            .iter()
            .filter(|game| filter.matches(game))
            .collect()
    }

    /// Total / rated / unrated counts over the whole collection.
    pub fn counts(&self) -> LibraryCounts {
        let total = self.games.len();
        let rated = self.games.iter().filter(|game| game.is_rated()).count();
        LibraryCounts {
            total,
            rated,
            unrated: total - rated,
        }
    }

    /// Distinct release years, newest first, for the year selector.
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.games.iter().map(|game| game.year).collect();
        years.sort_unstable_by(|a, b| b.cmp(a));
        years.dedup();
        years
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLACEHOLDER: &str = "/placeholder.svg";

    fn draft(title: &str, year: i32) -> GameDraft {
        GameDraft {
            title: title.to_string(),
            year,
            image_url: None,
            description: String::new(),
        }
    }

    #[test]
    fn add_game_appends_unrated_entry() {
        let mut library = Library::new(PLACEHOLDER);
        let id = library.add_game(draft("Outer Wilds", 2019)).expect("id");
        assert_eq!(library.games().len(), 1);
        let game = library.game(id).expect("game");
        assert_eq!(game.title, "Outer Wilds");
        assert_eq!(game.year, 2019);
        assert!(game.rating.is_none());
    }

    #[test]
    fn missing_image_falls_back_to_the_placeholder() {
        let mut library = Library::new(PLACEHOLDER);
        let id = library.add_game(draft("Outer Wilds", 2019)).unwrap();
        assert_eq!(library.game(id).unwrap().image_url, PLACEHOLDER);

        let id = library
            .add_game(GameDraft {
                title: "Hades".to_string(),
                year: 2020,
                image_url: Some("/covers/hades.png".to_string()),
                description: String::new(),
            })
            .unwrap();
        assert_eq!(library.game(id).unwrap().image_url, "/covers/hades.png");
    }

    #[test]
    fn add_game_with_empty_title_is_a_no_op() {
        let mut library = Library::new(PLACEHOLDER);
        assert_eq!(library.add_game(draft("", 2020)), None);
        assert_eq!(library.add_game(draft("   ", 2020)), None);
        assert!(library.games().is_empty());
    }

    #[test]
    fn ids_are_unique_and_order_is_preserved() {
        let mut library = Library::new(PLACEHOLDER);
        let a = library.add_game(draft("A", 2001)).unwrap();
        let b = library.add_game(draft("B", 2002)).unwrap();
        let c = library.add_game(draft("C", 2003)).unwrap();
        assert_ne!(a, b);
        assert_ne!(b, c);
        let titles: Vec<&str> = library
            .games()
            .iter()
            .map(|game| game.title.as_str())
            .collect();
        assert_eq!(titles, ["A", "B", "C"]);
    }

    #[test]
    fn save_rating_replaces_wholesale() {
        let mut library = Library::new(PLACEHOLDER);
        let id = library.add_game(draft("Hades", 2020)).unwrap();
        let first = GameRating::uniform(4);
        library.save_rating(id, first).unwrap();
        assert_eq!(library.game(id).unwrap().rating, Some(first));

        let second = GameRating::uniform(9);
        library.save_rating(id, second).unwrap();
        assert_eq!(library.game(id).unwrap().rating, Some(second));
    }

    #[test]
    fn save_rating_for_stale_id_reports_unknown_game() {
        let mut library = Library::new(PLACEHOLDER);
        let err = library
            .save_rating(GameId(42), GameRating::default())
            .unwrap_err();
        assert_eq!(err, LibraryError::UnknownGame(GameId(42)));
    }

    #[test]
    fn filter_all_equals_unfiltered_collection() {
        let mut library = Library::new(PLACEHOLDER);
        library.add_game(draft("A", 2001));
        library.add_game(draft("B", 2002));
        library.add_game(draft("C", 2001));
        let all = library.filter(YearFilter::All);
        assert_eq!(all.len(), library.games().len());
        for (filtered, original) in all.iter().zip(library.games()) {
            assert_eq!(filtered.id, original.id);
        }
    }

    #[test]
    fn filter_by_year_keeps_only_matches_in_order() {
        let mut library = Library::new(PLACEHOLDER);
        library.add_game(draft("A", 2001));
        library.add_game(draft("B", 2002));
        library.add_game(draft("C", 2001));
        let hits = library.filter(YearFilter::Year(2001));
        let titles: Vec<&str> = hits.iter().map(|game| game.title.as_str()).collect();
        assert_eq!(titles, ["A", "C"]);
        assert!(library.filter(YearFilter::Year(1999)).is_empty());
    }

    #[test]
    fn counts_track_rated_and_unrated() {
        let mut library = Library::new(PLACEHOLDER);
        let id = library.add_game(draft("A", 2001)).unwrap();
        library.add_game(draft("B", 2002));
        library.save_rating(id, GameRating::default()).unwrap();
        let counts = library.counts();
        assert_eq!(counts.total, 2);
        assert_eq!(counts.rated, 1);
        assert_eq!(counts.unrated, 1);
    }

    #[test]
    fn years_are_distinct_and_newest_first() {
        let mut library = Library::new(PLACEHOLDER);
        library.add_game(draft("A", 2001));
        library.add_game(draft("B", 2010));
        library.add_game(draft("C", 2001));
        library.add_game(draft("D", 2005));
        assert_eq!(library.years(), vec![2010, 2005, 2001]);
    }

    #[test]
    fn sample_library_matches_the_original_seed() {
        let library = Library::with_samples("/placeholder.svg");
        assert_eq!(library.games().len(), 2);
        let counts = library.counts();
        assert_eq!(counts.rated, 1);
        assert_eq!(counts.unrated, 1);
        let witcher = &library.games()[0];
        assert_eq!(witcher.title, "The Witcher 3: Wild Hunt");
        assert_eq!(witcher.image_url, "/placeholder.svg");
        let rating = witcher.rating.expect("seeded rating");
        assert_eq!(crate::score::composite_score(&rating), 91);
    }
}
