//! Hint resolution and scoring.
//!
//! A submission is read-only until the completion service has answered and
//! the answer has been judged; the only write is the single conditional
//! commit in [`GameRepo::record_correct_guess`].

mod completion;
mod forbidden;
mod resolver;

use std::sync::Arc;

use charades_domain::{Character, GameId, MatchKind};

use crate::infrastructure::ports::{CatalogRepo, CorrectGuess, GameRepo, RandomPort, RepoError};

pub use completion::{
    build_guess_prompt, sanitize_guess, CompletionError, GuessRequester, GUESS_MAX_TOKENS,
    GUESS_TEMPERATURE, GUESS_TOP_P,
};
pub use forbidden::forbidden_words_in;
pub use resolver::{names_match, resolve, Resolution};

/// Default upper bound on hint length, in characters.
pub const DEFAULT_MAX_HINT_CHARS: usize = 500;

/// Container for hint use cases.
pub struct HintUseCases {
    pub submit: Arc<SubmitHint>,
}

impl HintUseCases {
    pub fn new(submit: Arc<SubmitHint>) -> Self {
        Self { submit }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HintError {
    #[error("gameId and hint are required")]
    MissingFields,
    #[error("Hint cannot exceed {max} characters")]
    HintTooLong { max: usize },
    #[error("Game not found: {0}")]
    GameNotFound(GameId),
    #[error("Game is not active")]
    GameNotActive(GameId),
    #[error("No target character found")]
    NoTarget(GameId),
    #[error("Hint contains forbidden words")]
    ForbiddenWords,
    #[error(transparent)]
    Completion(#[from] CompletionError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// What a submission produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintOutcome {
    /// The completion answer, or the resolved character's name when the
    /// answer was only matched loosely.
    pub guess: String,
    pub is_correct: bool,
    pub target: Character,
    pub guessed_character: Option<Character>,
    pub match_kind: Option<MatchKind>,
    pub game_completed: bool,
    pub points_awarded: u32,
}

pub struct SubmitHint {
    games: Arc<dyn GameRepo>,
    catalog: Arc<dyn CatalogRepo>,
    requester: GuessRequester,
    random: Arc<dyn RandomPort>,
    max_hint_chars: usize,
}

impl SubmitHint {
    pub fn new(
        games: Arc<dyn GameRepo>,
        catalog: Arc<dyn CatalogRepo>,
        requester: GuessRequester,
        random: Arc<dyn RandomPort>,
        max_hint_chars: usize,
    ) -> Self {
        Self {
            games,
            catalog,
            requester,
            random,
            max_hint_chars,
        }
    }

    pub async fn execute(&self, game_id: GameId, hint: &str) -> Result<HintOutcome, HintError> {
        let hint = hint.trim();
        if hint.is_empty() {
            return Err(HintError::MissingFields);
        }
        if hint.chars().count() > self.max_hint_chars {
            return Err(HintError::HintTooLong {
                max: self.max_hint_chars,
            });
        }

        let game = self
            .games
            .get(game_id)
            .await?
            .ok_or(HintError::GameNotFound(game_id))?;
        if !game.is_active() {
            return Err(HintError::GameNotActive(game_id));
        }
        let target_id = game.current_target().ok_or(HintError::NoTarget(game_id))?;

        let theme_characters = self.catalog.list_characters_in_theme(game.theme_id).await?;
        let target = match theme_characters.iter().find(|c| c.id == target_id) {
            Some(character) => character.clone(),
            None => self
                .catalog
                .get_character(target_id)
                .await?
                .ok_or(HintError::NoTarget(game_id))?,
        };

        let blocked = forbidden_words_in(hint, &theme_characters);
        if !blocked.is_empty() {
            tracing::info!(game_id = %game_id, words = ?blocked, "Hint rejected for forbidden words");
            return Err(HintError::ForbiddenWords);
        }

        let catalog = self.catalog.list_characters().await?;
        let priority_names: Vec<&str> = theme_characters.iter().map(|c| c.name.as_str()).collect();
        let all_names: Vec<&str> = catalog.iter().map(|c| c.name.as_str()).collect();

        let answer = self
            .requester
            .request_guess(&priority_names, &all_names, hint)
            .await
            .inspect_err(|e| tracing::warn!(game_id = %game_id, error = %e, "Completion failed"))?;

        let is_correct = names_match(&answer, &target.name);

        let resolution = resolve(&answer, &catalog, self.random.as_ref());
        let guess = match resolution {
            Some(r) if !r.kind.is_direct() => r.character.name.clone(),
            _ => answer.clone(),
        };

        let mut points_awarded = 0;
        let mut game_completed = false;
        if is_correct {
            let commit = self
                .games
                .record_correct_guess(&CorrectGuess {
                    game_id,
                    character_id: target.id,
                    user_id: game.user_id,
                    points: target.points,
                })
                .await?;
            if commit.applied {
                points_awarded = target.points;
            } else {
                tracing::info!(
                    game_id = %game_id,
                    character_id = %target.id,
                    "Character already guessed by a concurrent submission, no points awarded"
                );
            }
            game_completed = commit.game_completed;
        }

        tracing::info!(
            game_id = %game_id,
            target = %target.name,
            answer = %answer,
            match_kind = ?resolution.map(|r| r.kind),
            is_correct,
            points_awarded,
            game_completed,
            "Hint resolved"
        );

        Ok(HintOutcome {
            guess,
            is_correct,
            guessed_character: resolution.map(|r| r.character.clone()),
            match_kind: resolution.map(|r| r.kind),
            target,
            game_completed,
            points_awarded,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedRandom;
    use crate::infrastructure::ports::{
        GuessCommit, LlmError, LlmResponse, MockCatalogRepo, MockGameRepo, MockLlmPort,
    };
    use charades_domain::{
        CharacterId, ForbiddenWordText, Game, GameCharacterProgress, GameStatus, ThemeId, UserId,
    };
    use chrono::Utc;

    const GAME: GameId = GameId::from_i64(7);
    const USER: UserId = UserId::from_i64(3);
    const THEME: ThemeId = ThemeId::from_i64(1);

    fn gandalf() -> Character {
        Character::new(CharacterId::from_i64(1), THEME, "Gandalf", "/uploads/gandalf.png")
            .with_points(10)
            .with_forbidden_word(ForbiddenWordText::new("balrog").expect("valid"))
    }

    fn frodo() -> Character {
        Character::new(CharacterId::from_i64(2), THEME, "Frodo", "/uploads/frodo.png")
            .with_forbidden_word(ForbiddenWordText::new("cape").expect("valid"))
    }

    fn mario() -> Character {
        Character::new(CharacterId::from_i64(3), ThemeId::from_i64(2), "Mario", "/uploads/mario.png")
    }

    fn game(status: GameStatus, progress: &[(i64, bool)]) -> Game {
        Game {
            id: GAME,
            user_id: USER,
            theme_id: THEME,
            status,
            created_at: Utc::now(),
            progress: progress
                .iter()
                .map(|(id, guessed)| GameCharacterProgress {
                    game_id: GAME,
                    character_id: CharacterId::from_i64(*id),
                    guessed: *guessed,
                })
                .collect(),
        }
    }

    fn catalog_repo() -> MockCatalogRepo {
        let mut catalog = MockCatalogRepo::new();
        catalog
            .expect_list_characters_in_theme()
            .withf(|id| *id == THEME)
            .returning(|_| Ok(vec![gandalf(), frodo()]));
        catalog
            .expect_list_characters()
            .returning(|| Ok(vec![frodo(), gandalf(), mario()]));
        catalog
    }

    fn game_repo(game_state: Game) -> MockGameRepo {
        let mut games = MockGameRepo::new();
        games
            .expect_get()
            .withf(|id| *id == GAME)
            .returning(move |_| Ok(Some(game_state.clone())));
        games
    }

    fn answering(text: &'static str) -> MockLlmPort {
        let mut llm = MockLlmPort::new();
        llm.expect_generate()
            .times(1)
            .returning(move |_| Ok(LlmResponse::text(text)));
        llm
    }

    fn use_case(games: MockGameRepo, catalog: MockCatalogRepo, llm: MockLlmPort) -> SubmitHint {
        SubmitHint::new(
            Arc::new(games),
            Arc::new(catalog),
            GuessRequester::new(Arc::new(llm)),
            Arc::new(FixedRandom(0)),
            DEFAULT_MAX_HINT_CHARS,
        )
    }

    #[tokio::test]
    async fn correct_guess_of_last_character_completes_game_and_awards_points() {
        let mut games = game_repo(game(GameStatus::Active, &[(1, false)]));
        games
            .expect_record_correct_guess()
            .withf(|g| {
                g.game_id == GAME
                    && g.character_id == CharacterId::from_i64(1)
                    && g.user_id == USER
                    && g.points == 10
            })
            .times(1)
            .returning(|_| {
                Ok(GuessCommit {
                    applied: true,
                    game_completed: true,
                })
            });

        let outcome = use_case(games, catalog_repo(), answering("Gandalf"))
            .execute(GAME, "Tall wizard with staff")
            .await
            .expect("outcome");

        assert!(outcome.is_correct);
        assert_eq!(outcome.guess, "Gandalf");
        assert_eq!(outcome.target.name, "Gandalf");
        assert_eq!(outcome.target.image_url, "/uploads/gandalf.png");
        assert!(outcome.game_completed);
        assert_eq!(outcome.points_awarded, 10);
        assert_eq!(outcome.match_kind, Some(MatchKind::Exact));
        assert_eq!(
            outcome.guessed_character.map(|c| c.image_url),
            Some("/uploads/gandalf.png".to_string())
        );
    }

    #[tokio::test]
    async fn correct_guess_with_characters_left_keeps_game_active() {
        let mut games = game_repo(game(GameStatus::Active, &[(1, false), (2, false)]));
        games.expect_record_correct_guess().times(1).returning(|_| {
            Ok(GuessCommit {
                applied: true,
                game_completed: false,
            })
        });

        let outcome = use_case(games, catalog_repo(), answering("Gandalf the Grey"))
            .execute(GAME, "Grey traveller")
            .await
            .expect("outcome");

        assert!(outcome.is_correct);
        assert!(!outcome.game_completed);
        assert_eq!(outcome.match_kind, Some(MatchKind::Contained));
        assert_eq!(outcome.guess, "Gandalf the Grey");
    }

    #[tokio::test]
    async fn wrong_guess_changes_nothing() {
        let mut games = game_repo(game(GameStatus::Active, &[(1, false)]));
        games.expect_record_correct_guess().never();

        let outcome = use_case(games, catalog_repo(), answering("Mario"))
            .execute(GAME, "Plumber in red")
            .await
            .expect("outcome");

        assert!(!outcome.is_correct);
        assert!(!outcome.game_completed);
        assert_eq!(outcome.points_awarded, 0);
        assert_eq!(outcome.target.name, "Gandalf");
        assert_eq!(
            outcome.guessed_character.map(|c| c.name),
            Some("Mario".to_string())
        );
    }

    #[tokio::test]
    async fn loose_answer_is_replaced_by_resolved_name() {
        let mut games = game_repo(game(GameStatus::Active, &[(1, false)]));
        games.expect_record_correct_guess().never();

        let outcome = use_case(games, catalog_repo(), answering("Fordo"))
            .execute(GAME, "Small fellow with hairy feet")
            .await
            .expect("outcome");

        assert_eq!(outcome.guess, "Frodo");
        assert_eq!(outcome.match_kind, Some(MatchKind::Fuzzy));
        assert!(!outcome.is_correct);
    }

    #[tokio::test]
    async fn forbidden_word_of_any_theme_character_blocks_without_completion_call() {
        let mut games = game_repo(game(GameStatus::Active, &[(1, false)]));
        games.expect_record_correct_guess().never();
        let mut catalog = MockCatalogRepo::new();
        catalog
            .expect_list_characters_in_theme()
            .returning(|_| Ok(vec![gandalf(), frodo()]));
        catalog.expect_list_characters().never();
        let mut llm = MockLlmPort::new();
        llm.expect_generate().never();

        let result = use_case(games, catalog, llm)
            .execute(GAME, "He wears a CAPE")
            .await;

        assert!(matches!(result, Err(HintError::ForbiddenWords)));
    }

    #[tokio::test]
    async fn completed_game_is_rejected_before_any_lookup() {
        let games = game_repo(game(GameStatus::Completed, &[(1, true)]));
        let mut catalog = MockCatalogRepo::new();
        catalog.expect_list_characters_in_theme().never();
        let mut llm = MockLlmPort::new();
        llm.expect_generate().never();

        let result = use_case(games, catalog, llm).execute(GAME, "wizard").await;

        assert!(matches!(result, Err(HintError::GameNotActive(_))));
    }

    #[tokio::test]
    async fn unknown_game_is_not_found() {
        let mut games = MockGameRepo::new();
        games.expect_get().returning(|_| Ok(None));

        let result = use_case(games, MockCatalogRepo::new(), MockLlmPort::new())
            .execute(GAME, "wizard")
            .await;

        assert!(matches!(result, Err(HintError::GameNotFound(id)) if id == GAME));
    }

    #[tokio::test]
    async fn blank_or_oversized_hints_are_rejected() {
        let uc = use_case(MockGameRepo::new(), MockCatalogRepo::new(), MockLlmPort::new());

        assert!(matches!(
            uc.execute(GAME, "   ").await,
            Err(HintError::MissingFields)
        ));
        assert!(matches!(
            uc.execute(GAME, &"a".repeat(DEFAULT_MAX_HINT_CHARS + 1)).await,
            Err(HintError::HintTooLong { .. })
        ));
    }

    #[tokio::test]
    async fn game_without_unguessed_rows_has_no_target() {
        let games = game_repo(game(GameStatus::Active, &[(1, true)]));

        let result = use_case(games, MockCatalogRepo::new(), MockLlmPort::new())
            .execute(GAME, "wizard-free hint")
            .await;

        assert!(matches!(result, Err(HintError::NoTarget(_))));
    }

    #[tokio::test]
    async fn completion_failure_leaves_state_untouched() {
        let mut games = game_repo(game(GameStatus::Active, &[(1, false)]));
        games.expect_record_correct_guess().never();
        let mut llm = MockLlmPort::new();
        llm.expect_generate()
            .returning(|_| Err(LlmError::RequestFailed("timeout".to_string())));

        let result = use_case(games, catalog_repo(), llm)
            .execute(GAME, "Grey traveller")
            .await;

        assert!(matches!(result, Err(HintError::Completion(_))));
    }

    #[tokio::test]
    async fn resubmission_after_concurrent_win_awards_nothing() {
        let mut games = game_repo(game(GameStatus::Active, &[(1, false)]));
        games.expect_record_correct_guess().times(1).returning(|_| {
            Ok(GuessCommit {
                applied: false,
                game_completed: true,
            })
        });

        let outcome = use_case(games, catalog_repo(), answering("Gandalf"))
            .execute(GAME, "Grey traveller")
            .await
            .expect("outcome");

        assert!(outcome.is_correct);
        assert_eq!(outcome.points_awarded, 0);
        assert!(outcome.game_completed);
    }
}
