//! Skill records and the views derived from them.
//!
//! - `Skill` - a curriculum unit as reported in a language's progress
//! - `TopicFilter` - learned / golden / reviewable topic selection
//! - `DependencyOrders` - longest-prerequisite-chain depth per skill

mod dependency;

pub use dependency::*;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// Strength value of a mastered ("golden") skill.
pub const GOLDEN_STRENGTH: f64 = 1.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Skill {
    pub id: Option<String>,
    pub name: String,
    pub title: String,
    /// Names of prerequisite skills, in platform order.
    pub dependencies_name: Vec<String>,
    pub learned: bool,
    pub strength: f64,
    pub words: Vec<String>,
}

impl Skill {
    pub fn is_golden(&self) -> bool {
        self.learned && self.strength == GOLDEN_STRENGTH
    }

    pub fn is_reviewable(&self) -> bool {
        self.learned && self.strength < GOLDEN_STRENGTH
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum TopicFilter {
    /// Learned skills.
    Known,
    /// Skills not yet learned.
    Unknown,
    /// Learned and fully mastered.
    Golden,
    /// Learned but below full strength.
    Reviewable,
}

impl TopicFilter {
    pub fn matches(&self, skill: &Skill) -> bool {
        match self {
            Self::Known => skill.learned,
            Self::Unknown => !skill.learned,
            Self::Golden => skill.is_golden(),
            Self::Reviewable => skill.is_reviewable(),
        }
    }

    /// Titles of the skills this filter selects, in skill order.
    pub fn titles(&self, skills: &[Skill]) -> Vec<String> {
        skills
            .iter()
            .filter(|skill| self.matches(skill))
            .map(|skill| skill.title.clone())
            .collect()
    }
}
