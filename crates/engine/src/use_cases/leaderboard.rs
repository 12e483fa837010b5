//! Leaderboard use case.
//!
//! Top users by score, each with a win rate (completed games over all games,
//! as a percentage with two decimals) and the theme they played most.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use charades_domain::{Game, GameStatus, ThemeId, User};

use crate::infrastructure::ports::{CatalogRepo, GameRepo, RepoError, UserRepo};

/// How many users the board shows.
pub const LEADERBOARD_SIZE: u32 = 10;

/// Shown when a user has no games.
pub const NO_FAVORITE_THEME: &str = "None";

#[derive(Debug, thiserror::Error)]
pub enum LeaderboardError {
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Standing {
    pub user: User,
    pub win_rate: f64,
    pub favorite_theme: String,
}

pub struct Leaderboard {
    users: Arc<dyn UserRepo>,
    games: Arc<dyn GameRepo>,
    catalog: Arc<dyn CatalogRepo>,
}

impl Leaderboard {
    pub fn new(
        users: Arc<dyn UserRepo>,
        games: Arc<dyn GameRepo>,
        catalog: Arc<dyn CatalogRepo>,
    ) -> Self {
        Self {
            users,
            games,
            catalog,
        }
    }

    pub async fn execute(&self) -> Result<Vec<Standing>, LeaderboardError> {
        let top = self.users.top_by_score(LEADERBOARD_SIZE).await?;
        let theme_names: HashMap<ThemeId, String> = self
            .catalog
            .list_themes()
            .await?
            .into_iter()
            .map(|summary| (summary.theme.id, summary.theme.name))
            .collect();

        let mut standings = Vec::with_capacity(top.len());
        for user in top {
            let games = self.games.list_for_user(user.id).await?;
            standings.push(Standing {
                win_rate: win_rate(&games),
                favorite_theme: favorite_theme(&games)
                    .and_then(|id| theme_names.get(&id).cloned())
                    .unwrap_or_else(|| NO_FAVORITE_THEME.to_string()),
                user,
            });
        }
        Ok(standings)
    }
}

fn win_rate(games: &[Game]) -> f64 {
    if games.is_empty() {
        return 0.0;
    }
    let completed = games
        .iter()
        .filter(|g| g.status == GameStatus::Completed)
        .count();
    let rate = completed as f64 / games.len() as f64 * 100.0;
    (rate * 100.0).round() / 100.0
}

/// Most-played theme; ties go to the lowest theme id.
fn favorite_theme(games: &[Game]) -> Option<ThemeId> {
    let mut counts: BTreeMap<ThemeId, usize> = BTreeMap::new();
    for game in games {
        *counts.entry(game.theme_id).or_default() += 1;
    }

    let mut best: Option<(ThemeId, usize)> = None;
    for (theme_id, count) in counts {
        if best.map_or(true, |(_, max)| count > max) {
            best = Some((theme_id, count));
        }
    }
    best.map(|(theme_id, _)| theme_id)
}
