//! Spending and income categories, including the shared defaults.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::common::Identifiable;

/// Labels transactions for budgeting and reporting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    /// `None` for default categories shared by every user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub name: String,
    pub parent: CategoryGroup,
    pub color: String,
    pub icon: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub is_default: bool,
}

impl Category {
    /// Creates a category owned by `user_id`.
    pub fn new(
        user_id: impl Into<String>,
        name: impl Into<String>,
        parent: CategoryGroup,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: Some(user_id.into()),
            name: name.into(),
            parent,
            color: parent.default_color().into(),
            icon: "pricetag".into(),
            keywords: Vec::new(),
            is_default: false,
        }
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Returns `true` when any keyword appears as a whole word in `description`.
    pub fn matches_description(&self, description: &str) -> bool {
        let lowered = description.to_lowercase();
        let words: Vec<&str> = lowered
            .split(|ch: char| !ch.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .collect();
        self.keywords.iter().any(|keyword| {
            let keyword = keyword.to_lowercase();
            words.iter().any(|word| *word == keyword)
        })
    }

    fn shared(
        id: &str,
        name: &str,
        parent: CategoryGroup,
        color: &str,
        icon: &str,
        keywords: &[&str],
    ) -> Self {
        Self {
            id: id.into(),
            user_id: None,
            name: name.into(),
            parent,
            color: color.into(),
            icon: icon.into(),
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
            is_default: true,
        }
    }
}

impl Identifiable for Category {
    fn id(&self) -> &str {
        &self.id
    }
}


/// Top-level grouping a category rolls up into.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CategoryGroup {
    Income,
    Expenses,
}

impl CategoryGroup {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Some(CategoryGroup::Income),
            "expense" | "expenses" => Some(CategoryGroup::Expenses),
            _ => None,
        }
    }

    fn default_color(self) -> &'static str {
        match self {
            CategoryGroup::Income => "#4CAF50",
            CategoryGroup::Expenses => "#636E72",
        }
    }
}

impl fmt::Display for CategoryGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CategoryGroup::Income => "Income",
            CategoryGroup::Expenses => "Expenses",
        };
        f.write_str(label)
    }
}

/// The shared categories available to every user.
pub fn default_categories() -> Vec<Category> {
    use CategoryGroup::{Expenses, Income};

    vec![
        Category::shared(
            "income",
            "Income",
            Income,
            "#4CAF50",
            "trending-up",
            &["salary", "wage", "payment", "income", "earnings"],
        ),
        Category::shared(
            "food",
            "Food & Dining",
            Expenses,
            "#FF6B6B",
            "restaurant",
            &["food", "restaurant", "grocery", "dining", "meal"],
        ),
        Category::shared(
            "utilities",
            "Utilities",
            Expenses,
            "#4ECDC4",
            "flash",
            &["electricity", "water", "gas", "internet", "phone"],
        ),
        Category::shared(
            "transportation",
            "Transportation",
            Expenses,
            "#45B7D1",
            "car",
            &["fuel", "uber", "taxi", "bus", "train"],
        ),
        Category::shared(
            "education",
            "Education",
            Expenses,
            "#96CEB4",
            "school",
            &["books", "tuition", "course", "school", "college"],
        ),
        Category::shared(
            "healthcare",
            "Healthcare",
            Expenses,
            "#FFEAA7",
            "medical",
            &["medical", "doctor", "pharmacy", "health", "medicine"],
        ),
        Category::shared(
            "entertainment",
            "Entertainment",
            Expenses,
            "#A78BFA",
            "game-controller",
            &["movie", "game", "concert", "show", "entertainment"],
        ),
        Category::shared(
            "shopping",
            "Shopping",
            Expenses,
            "#FF9F43",
            "bag",
            &["clothes", "shoes", "accessories", "shopping", "retail"],
        ),
        Category::shared(
            "housing",
            "Housing",
            Expenses,
            "#6C5CE7",
            "home",
            &["rent", "mortgage", "home", "apartment", "housing"],
        ),
        Category::shared(
            "insurance",
            "Insurance",
            Expenses,
            "#00B894",
            "shield-checkmark",
            &["insurance", "policy", "coverage", "protection"],
        ),
        Category::shared(
            "investment",
            "Investment",
            Income,
            "#FDCB6E",
            "trending-up",
            &["investment", "dividend", "interest", "profit", "return"],
        ),
        Category::shared(
            "gifts",
            "Gifts",
            Expenses,
            "#E84393",
            "gift",
            &["gift", "present", "donation", "charity"],
        ),
        Category::shared(
            "travel",
            "Travel",
            Expenses,
            "#74B9FF",
            "airplane",
            &["travel", "vacation", "trip", "hotel", "flight"],
        ),
        Category::shared(
            "personal",
            "Personal Care",
            Expenses,
            "#FD79A8",
            "cut",
            &["beauty", "spa", "salon", "personal", "care"],
        ),
        Category::shared(
            "business",
            "Business",
            Expenses,
            "#636E72",
            "briefcase",
            &["business", "office", "work", "professional"],
        ),
    ]
}
