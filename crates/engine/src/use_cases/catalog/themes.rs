use std::sync::Arc;

use charades_domain::{NewTheme, Theme, ThemeId, ThemeName, ThemeSummary};

use super::CatalogError;
use crate::infrastructure::ports::CatalogRepo;

/// Theme operations.
pub struct ThemeOps {
    catalog: Arc<dyn CatalogRepo>,
}

impl ThemeOps {
    pub fn new(catalog: Arc<dyn CatalogRepo>) -> Self {
        Self { catalog }
    }

    pub async fn list(&self) -> Result<Vec<ThemeSummary>, CatalogError> {
        Ok(self.catalog.list_themes().await?)
    }

    pub async fn create(
        &self,
        name: &str,
        image_url: Option<&str>,
    ) -> Result<Theme, CatalogError> {
        let name = ThemeName::new(name)?;
        let mut theme = NewTheme::new(name);
        if let Some(url) = image_url {
            theme = theme.with_image_url(url);
        }

        let created = self.catalog.create_theme(&theme).await.map_err(|e| {
            if e.is_constraint_violation() {
                CatalogError::DuplicateTheme(theme.name.to_string())
            } else {
                CatalogError::Repo(e)
            }
        })?;

        tracing::info!(theme_id = %created.id, name = %created.name, "Theme created");
        Ok(created)
    }

    /// Deletes the theme with its characters, their forbidden words and games.
    pub async fn delete(&self, id: ThemeId) -> Result<(), CatalogError> {
        if !self.catalog.delete_theme(id).await? {
            return Err(CatalogError::ThemeNotFound(id));
        }
        tracing::info!(theme_id = %id, "Theme deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{MockCatalogRepo, RepoError};

    #[tokio::test]
    async fn create_trims_name_and_drops_blank_image() {
        let mut catalog = MockCatalogRepo::new();
        catalog
            .expect_create_theme()
            .withf(|t| t.name.as_str() == "Anime" && t.image_url.is_none())
            .times(1)
            .returning(|t| {
                Ok(Theme {
                    id: ThemeId::from_i64(1),
                    name: t.name.to_string(),
                    image_url: t.image_url.clone(),
                })
            });

        let theme = ThemeOps::new(Arc::new(catalog))
            .create("  Anime ", Some("  "))
            .await
            .expect("theme");
        assert_eq!(theme.name, "Anime");
    }

    #[tokio::test]
    async fn duplicate_name_is_a_conflict() {
        let mut catalog = MockCatalogRepo::new();
        catalog
            .expect_create_theme()
            .returning(|_| Err(RepoError::constraint("UNIQUE constraint failed: themes.name")));

        let result = ThemeOps::new(Arc::new(catalog)).create("Anime", None).await;
        assert!(matches!(result, Err(CatalogError::DuplicateTheme(name)) if name == "Anime"));
    }

    #[tokio::test]
    async fn blank_name_is_invalid() {
        let result = ThemeOps::new(Arc::new(MockCatalogRepo::new()))
            .create(" ", None)
            .await;
        assert!(matches!(result, Err(CatalogError::Validation(_))));
    }

    #[tokio::test]
    async fn deleting_missing_theme_is_not_found() {
        let mut catalog = MockCatalogRepo::new();
        catalog.expect_delete_theme().returning(|_| Ok(false));

        let result = ThemeOps::new(Arc::new(catalog))
            .delete(ThemeId::from_i64(5))
            .await;
        assert!(matches!(result, Err(CatalogError::ThemeNotFound(_))));
    }
}
