use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Level types that introduce no new vocabulary.
pub const SKIPPED_LEVEL_TYPES: [&str; 2] = ["chest", "unit_review"];

/// The `currentCourse` selection of a profile-by-id lookup.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseData {
    pub current_course: Option<Course>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub path_sectioned: Vec<PathSection>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathSection {
    pub completed_units: usize,
    pub units: Vec<PathUnit>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PathUnit {
    pub levels: Vec<PathLevel>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathLevel {
    #[serde(rename = "type")]
    pub level_type: String,
    pub finished_sessions: u32,
    pub path_level_client_data: LevelClientData,
}

/// Carries either one skill id or a list of them.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelClientData {
    pub skill_id: Option<String>,
    pub skill_ids: Option<Vec<String>>,
}

impl LevelClientData {
    fn skill_ids(&self) -> Option<Vec<&str>> {
        if let Some(id) = self.skill_id.as_deref() {
            return Some(vec![id]);
        }
        self.skill_ids
            .as_ref()
            .map(|ids| ids.iter().map(|id| id.as_str()).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillRef {
    pub id: String,
}

/// One entry of the progressed-skills manifest sent with each vocabulary page request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressedSkill {
    pub finished_levels: u32,
    pub finished_sessions: u32,
    pub skill_id: SkillRef,
}

/// Build the manifest from the completed units of every course-path section.
///
/// A vocabulary-bearing level without `skillId` or `skillIds` is a
/// `MissingField` error.
pub fn build_manifest(course: &Course) -> Result<Vec<ProgressedSkill>> {
    let mut manifest = Vec::new();

    for section in &course.path_sectioned {
        for unit in section.units.iter().take(section.completed_units) {
            for level in &unit.levels {
                if SKIPPED_LEVEL_TYPES.contains(&level.level_type.as_str()) {
                    continue;
                }
                let ids = level.path_level_client_data.skill_ids().ok_or_else(|| {
                    Error::MissingField(format!(
                        "pathLevelClientData.skillId of {} level",
                        level.level_type
                    ))
                })?;
                for id in ids {
                    manifest.push(ProgressedSkill {
                        finished_levels: 1,
                        finished_sessions: level.finished_sessions,
                        skill_id: SkillRef { id: id.to_string() },
                    });
                }
            }
        }
    }

    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn course() -> Course {
        serde_json::from_value(json!({
            "pathSectioned": [
                {
                    "completedUnits": 1,
                    "units": [
                        {"levels": [
                            {"type": "skill", "finishedSessions": 4, "pathLevelClientData": {"skillId": "s1"}},
                            {"type": "chest", "finishedSessions": 0, "pathLevelClientData": {}},
                            {"type": "practice", "finishedSessions": 2, "pathLevelClientData": {"skillIds": ["s1", "s2"]}},
                            {"type": "unit_review", "finishedSessions": 1, "pathLevelClientData": {"skillIds": ["s1", "s2"]}}
                        ]},
                        {"levels": [
                            {"type": "skill", "finishedSessions": 1, "pathLevelClientData": {"skillId": "s3"}}
                        ]}
                    ]
                },
                {
                    "completedUnits": 0,
                    "units": [
                        {"levels": [
                            {"type": "skill", "finishedSessions": 0, "pathLevelClientData": {"skillId": "s9"}}
                        ]}
                    ]
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_manifest_from_completed_units() {
        let manifest = build_manifest(&course()).unwrap();
        let ids: Vec<&str> = manifest.iter().map(|m| m.skill_id.id.as_str()).collect();
        assert_eq!(ids, vec!["s1", "s1", "s2"]);
        assert_eq!(manifest[0].finished_sessions, 4);
        assert_eq!(manifest[1].finished_sessions, 2);
        assert!(manifest.iter().all(|m| m.finished_levels == 1));
    }

    #[test]
    fn test_completed_units_beyond_unit_list() {
        let course: Course = serde_json::from_value(json!({
            "pathSectioned": [{"completedUnits": 5, "units": [
                {"levels": [{"type": "skill", "finishedSessions": 3, "pathLevelClientData": {"skillId": "only"}}]}
            ]}]
        }))
        .unwrap();
        assert_eq!(build_manifest(&course).unwrap().len(), 1);
    }

    #[test]
    fn test_skill_level_without_skill_id() {
        let course: Course = serde_json::from_value(json!({
            "pathSectioned": [{"completedUnits": 1, "units": [
                {"levels": [{"type": "skill", "finishedSessions": 3, "pathLevelClientData": {}}]}
            ]}]
        }))
        .unwrap();
        assert!(matches!(build_manifest(&course), Err(Error::MissingField(_))));
    }

    #[test]
    fn test_course_missing_required_fields() {
        for value in [
            json!({}),
            json!({"pathSectioned": [{"units": []}]}),
            json!({"pathSectioned": [{"completedUnits": 1}]}),
            json!({"pathSectioned": [{"completedUnits": 1, "units": [{}]}]}),
            json!({"pathSectioned": [{"completedUnits": 1, "units": [{"levels": [
                {"finishedSessions": 1, "pathLevelClientData": {"skillId": "s1"}}
            ]}]}]}),
            json!({"pathSectioned": [{"completedUnits": 1, "units": [{"levels": [
                {"type": "skill", "pathLevelClientData": {"skillId": "s1"}}
            ]}]}]}),
            json!({"pathSectioned": [{"completedUnits": 1, "units": [{"levels": [
                {"type": "skill", "finishedSessions": 1}
            ]}]}]}),
        ] {
            assert!(
                serde_json::from_value::<Course>(value.clone()).is_err(),
                "accepted {}",
                value
            );
        }
    }

    #[test]
    fn test_manifest_wire_format() {
        let entry = ProgressedSkill {
            finished_levels: 1,
            finished_sessions: 6,
            skill_id: SkillRef { id: "abc".into() },
        };
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({"finishedLevels": 1, "finishedSessions": 6, "skillId": {"id": "abc"}})
        );
    }
}
