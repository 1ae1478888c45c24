//! Category - 記事カテゴリと絞り込みフィルタ
//!
//! カテゴリは writer / reader 間で交差する唯一の controlled vocabulary。
//! 文字列表現は大文字小文字を含め完全一致で扱う（serde の variant 名そのまま）。
//!
//! "Home" はクライアント側の「絞り込みなし」センチネルであり、
//! カテゴリとしては存在しない（保存されない）。型レベルで分離するため
//! `CategoryFilter` に持たせている。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A publishable article category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    News,
    Fashion,
    Gadgets,
    Lifestyle,
    Video,
}

impl Category {
    /// All publishable categories, in navigation order.
    pub const ALL: [Category; 5] = [
        Category::News,
        Category::Fashion,
        Category::Gadgets,
        Category::Lifestyle,
        Category::Video,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::News => "News",
            Category::Fashion => "Fashion",
            Category::Gadgets => "Gadgets",
            Category::Lifestyle => "Lifestyle",
            Category::Video => "Video",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ();

    /// Exact-case match only. `"Home"` is not a category (see `CategoryFilter`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or(())
    }
}

/// A reader-side category filter. `Home` means "no filter".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    Home,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::Home => true,
            CategoryFilter::Only(wanted) => *wanted == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::Home => f.write_str("Home"),
            CategoryFilter::Only(c) => c.fmt(f),
        }
    }
}
