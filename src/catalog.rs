use std::collections::HashSet;

use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;

const CURRICULUM_JSON: &str = include_str!("../assets/curriculum.json");

/// Icons the curriculum file is allowed to reference. Parsing fails on
/// anything else, so a typo in the asset is caught at startup instead of
/// rendering a broken glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum IconKind {
    Briefcase,
    Plane,
    PenTool,
    MessageCircle,
    BookOpen,
    Zap,
    Heart,
    Snowflake,
    Shirt,
}

impl IconKind {
    /// Material Symbols glyph name.
    pub fn glyph(self) -> &'static str {
        match self {
            IconKind::Briefcase => "work",
            IconKind::Plane => "flight",
            IconKind::PenTool => "edit",
            IconKind::MessageCircle => "chat_bubble",
            IconKind::BookOpen => "menu_book",
            IconKind::Zap => "bolt",
            IconKind::Heart => "favorite",
            IconKind::Snowflake => "ac_unit",
            IconKind::Shirt => "checkroom",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
    #[serde(default)]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Unit {
    pub id: String,
    pub title: String,
    pub core_concept: String,
    #[serde(default)]
    pub vocabulary: Vec<String>,
    #[serde(default)]
    pub grammar: Option<String>,
    #[serde(default)]
    pub use_case: Option<String>,
    #[serde(default)]
    pub challenge: Option<String>,
    pub exercises: Vec<Exercise>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Phase {
    pub id: String,
    pub title: String,
    pub level: String,
    pub units: Vec<Unit>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LibraryTopic {
    pub id: String,
    pub title: String,
    pub description: String,
    pub lessons_count: i64,
    pub icon: IconKind,
    pub color: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub icon: IconKind,
    pub color: String,
    /// Buying this item restores one life on top of the gem charge.
    #[serde(default)]
    pub grants_life: bool,
}

/// The full course content, embedded at compile time and validated once at
/// startup. Immutable for the lifetime of the process.
#[derive(Debug, Deserialize)]
pub struct Catalog {
    pub phases: Vec<Phase>,
    pub library_topics: Vec<LibraryTopic>,
    pub store_items: Vec<StoreItem>,
}

impl Catalog {
    pub fn load() -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(CURRICULUM_JSON)?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for unit in self.units() {
            if !seen.insert(unit.id.as_str()) {
                return Err(eyre!("duplicate unit id '{}' in curriculum", unit.id));
            }
            for exercise in &unit.exercises {
                if exercise.correct_answer >= exercise.options.len() {
                    return Err(eyre!(
                        "exercise '{}': correct_answer {} out of range for {} options",
                        exercise.id,
                        exercise.correct_answer,
                        exercise.options.len()
                    ));
                }
            }
        }
        let mut seen_items = HashSet::new();
        for item in &self.store_items {
            if !seen_items.insert(item.id.as_str()) {
                return Err(eyre!("duplicate store item id '{}'", item.id));
            }
        }
        Ok(())
    }

    /// All units in course order, flattened across phases.
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.phases.iter().flat_map(|p| p.units.iter())
    }

    pub fn units_count(&self) -> usize {
        self.units().count()
    }

    pub fn unit(&self, unit_id: &str) -> Option<&Unit> {
        self.units().find(|u| u.id == unit_id)
    }

    /// The first unit in course order the user has no progress record for.
    /// Returns `None` once every unit has been attempted.
    pub fn next_unit<'a>(&'a self, attempted: &HashSet<String>) -> Option<&'a Unit> {
        self.units().find(|u| !attempted.contains(&u.id))
    }

    pub fn store_item(&self, item_id: &str) -> Option<&StoreItem> {
        self.store_items.iter().find(|i| i.id == item_id)
    }
}
