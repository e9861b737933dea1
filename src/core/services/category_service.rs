use std::collections::HashSet;

use crate::domain::{default_categories, Category};

use super::{ServiceError, ServiceResult};

pub struct CategoryService;

impl CategoryService {
    /// User categories first, then defaults; the first category with a given name wins.
    pub fn merge(user: &[Category], defaults: &[Category]) -> Vec<Category> {
        let mut seen = HashSet::new();
        user.iter()
            .chain(defaults)
            .filter(|category| seen.insert(category.name.clone()))
            .cloned()
            .collect()
    }

    /// Every category visible to a user: their own plus the shared defaults.
    pub fn catalogue(user: &[Category]) -> Vec<Category> {
        Self::merge(user, &default_categories())
    }

    /// Suggests a category for a transaction description using category keywords.
    pub fn suggest<'a>(categories: &'a [Category], description: &str) -> Option<&'a Category> {
        categories
            .iter()
            .find(|category| category.matches_description(description))
    }

    /// Rejects a name already used by another visible category (case-insensitive).
    pub fn validate_name(
        visible: &[Category],
        editing: Option<&str>,
        name: &str,
    ) -> ServiceResult<()> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ServiceError::Invalid("Category name is required".into()));
        }
        let taken = visible.iter().any(|category| {
            Some(category.id.as_str()) != editing && category.name.eq_ignore_ascii_case(trimmed)
        });
        if taken {
            return Err(ServiceError::Invalid(format!(
                "Category `{trimmed}` already exists"
            )));
        }
        Ok(())
    }
}
