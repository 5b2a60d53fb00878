use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::skill::Skill;

/// Profile document returned by the profile-by-username endpoint.
///
/// Every field the platform may omit is optional or defaulted; a snapshot is
/// replaced wholesale on refresh and never patched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSnapshot {
    pub id: Option<u64>,
    pub username: Option<String>,
    pub bio: Option<String>,
    pub fullname: Option<String>,
    pub avatar: Option<String>,
    pub created: Option<String>,
    pub admin: Option<bool>,
    pub ui_language: Option<String>,
    pub learning_language: Option<String>,
    pub learning_language_string: Option<String>,
    pub daily_goal: Option<u32>,
    pub site_streak: Option<u32>,
    pub streak_extended_today: Option<bool>,
    pub languages: Vec<Language>,
    /// Only the active learning language has an entry here.
    pub language_data: HashMap<String, LanguageProgress>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Language {
    /// Abbreviation, e.g. `hv`.
    pub language: String,
    /// Display name, e.g. `High Valyrian`.
    pub language_string: String,
    pub learning: bool,
    pub current_learning: bool,
    pub points: Option<u64>,
    pub level: Option<u32>,
    pub streak: Option<u32>,
    pub sentences_translated: Option<u64>,
    pub to_next_level: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageProgress {
    pub language: String,
    pub language_string: String,
    pub streak: Option<u32>,
    pub level: Option<u32>,
    pub level_progress: Option<u64>,
    pub level_percent: Option<u32>,
    pub level_points: Option<u64>,
    pub level_left: Option<u64>,
    pub next_level: Option<u32>,
    pub num_skills_learned: Option<u32>,
    pub points: Option<u64>,
    pub fluency_score: Option<f64>,
    pub skills: Vec<Skill>,
}

/// `LanguageProgress` without its skill list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSummary {
    pub language: String,
    pub language_string: String,
    pub streak: Option<u32>,
    pub level: Option<u32>,
    pub level_progress: Option<u64>,
    pub level_percent: Option<u32>,
    pub level_points: Option<u64>,
    pub level_left: Option<u64>,
    pub next_level: Option<u32>,
    pub num_skills_learned: Option<u32>,
    pub points: Option<u64>,
    pub fluency_score: Option<f64>,
}

impl LanguageProgress {
    pub fn summary(&self) -> ProgressSummary {
        ProgressSummary {
            language: self.language.clone(),
            language_string: self.language_string.clone(),
            streak: self.streak,
            level: self.level,
            level_progress: self.level_progress,
            level_percent: self.level_percent,
            level_points: self.level_points,
            level_left: self.level_left,
            next_level: self.next_level,
            num_skills_learned: self.num_skills_learned,
            points: self.points,
            fluency_score: self.fluency_score,
        }
    }

    /// Deduplicated, sorted words of every learned skill.
    pub fn known_words(&self) -> Vec<String> {
        let mut words: Vec<String> = self
            .skills
            .iter()
            .filter(|skill| skill.learned)
            .flat_map(|skill| skill.words.iter().cloned())
            .collect();
        words.sort();
        words.dedup();
        words
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserInfo {
    pub username: Option<String>,
    pub bio: Option<String>,
    pub id: Option<u64>,
    pub learning_language_string: Option<String>,
    pub created: Option<String>,
    pub admin: Option<bool>,
    pub fullname: Option<String>,
    pub avatar: Option<String>,
    pub ui_language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreakInfo {
    pub daily_goal: Option<u32>,
    pub site_streak: Option<u32>,
    pub streak_extended_today: Option<bool>,
}

impl UserSnapshot {
    pub fn is_active(&self, abbr: &str) -> bool {
        self.language_data.contains_key(abbr)
    }

    /// Languages the user is learning, as display names or abbreviations.
    pub fn learning_languages(&self, abbreviations: bool) -> Vec<String> {
        self.languages
            .iter()
            .filter(|lang| lang.learning)
            .map(|lang| {
                if abbreviations {
                    lang.language.clone()
                } else {
                    lang.language_string.clone()
                }
            })
            .collect()
    }

    pub fn language_from_abbr(&self, abbr: &str) -> Option<&str> {
        self.languages
            .iter()
            .find(|lang| lang.language == abbr)
            .map(|lang| lang.language_string.as_str())
    }

    /// Case-insensitive lookup by display name.
    pub fn abbreviation_of(&self, name: &str) -> Option<&str> {
        self.languages
            .iter()
            .find(|lang| lang.language_string.eq_ignore_ascii_case(name))
            .map(|lang| lang.language.as_str())
    }

    pub fn language_details(&self, name: &str) -> Option<&Language> {
        self.languages.iter().find(|lang| lang.language_string == name)
    }

    /// Abbreviation of the language currently being learned.
    pub fn current_learning_abbr(&self) -> Option<&str> {
        if let Some(abbr) = self.learning_language.as_deref() {
            return Some(abbr);
        }
        if let Some(name) = self.learning_language_string.as_deref()
            && let Some(abbr) = self.abbreviation_of(name)
        {
            return Some(abbr);
        }
        self.languages
            .iter()
            .find(|lang| lang.current_learning)
            .map(|lang| lang.language.as_str())
    }

    pub fn user_info(&self) -> UserInfo {
        UserInfo {
            username: self.username.clone(),
            bio: self.bio.clone(),
            id: self.id,
            learning_language_string: self.learning_language_string.clone(),
            created: self.created.clone(),
            admin: self.admin,
            fullname: self.fullname.clone(),
            avatar: self.avatar.clone(),
            ui_language: self.ui_language.clone(),
        }
    }

    pub fn streak_info(&self) -> StreakInfo {
        StreakInfo {
            daily_goal: self.daily_goal,
            site_streak: self.site_streak,
            streak_extended_today: self.streak_extended_today,
        }
    }
}
