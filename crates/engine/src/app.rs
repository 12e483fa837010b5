//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::ports::{
    BlobStorePort, CatalogRepo, GameRepo, LlmPort, RandomPort, UserRepo,
};
use crate::infrastructure::sqlite::SqliteRepositories;
use crate::use_cases::catalog::{CatalogUseCases, CharacterOps, ThemeOps, UploadCharacter};
use crate::use_cases::hint::{GuessRequester, HintUseCases, SubmitHint};
use crate::use_cases::leaderboard::Leaderboard;
use crate::use_cases::session::{RandomCharacter, RegisterUser, SessionUseCases, StartGame};

/// Main application state.
///
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub use_cases: UseCases,
}

/// Container for the repository ports.
#[derive(Clone)]
pub struct Repositories {
    pub catalog: Arc<dyn CatalogRepo>,
    pub user: Arc<dyn UserRepo>,
    pub game: Arc<dyn GameRepo>,
}

impl From<SqliteRepositories> for Repositories {
    fn from(repos: SqliteRepositories) -> Self {
        Self {
            catalog: repos.catalog,
            user: repos.user,
            game: repos.game,
        }
    }
}

/// Container for all use cases.
pub struct UseCases {
    pub hint: HintUseCases,
    pub session: SessionUseCases,
    pub catalog: CatalogUseCases,
    pub leaderboard: Arc<Leaderboard>,
}

impl App {
    pub fn new(
        repos: Repositories,
        llm: Arc<dyn LlmPort>,
        blobs: Arc<dyn BlobStorePort>,
        random: Arc<dyn RandomPort>,
        max_hint_chars: usize,
    ) -> Self {
        let hint = HintUseCases::new(Arc::new(SubmitHint::new(
            repos.game.clone(),
            repos.catalog.clone(),
            GuessRequester::new(llm),
            random.clone(),
            max_hint_chars,
        )));

        let session = SessionUseCases::new(
            Arc::new(RegisterUser::new(repos.user.clone())),
            Arc::new(StartGame::new(
                repos.user.clone(),
                repos.catalog.clone(),
                repos.game.clone(),
            )),
            Arc::new(RandomCharacter::new(repos.catalog.clone(), random)),
        );

        let catalog = CatalogUseCases::new(
            Arc::new(ThemeOps::new(repos.catalog.clone())),
            Arc::new(CharacterOps::new(repos.catalog.clone())),
            Arc::new(UploadCharacter::new(repos.catalog.clone(), blobs)),
        );

        let leaderboard = Arc::new(Leaderboard::new(repos.user, repos.game, repos.catalog));

        Self {
            use_cases: UseCases {
                hint,
                session,
                catalog,
                leaderboard,
            },
        }
    }
}
