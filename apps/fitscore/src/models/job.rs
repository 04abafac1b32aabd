use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Upstream job identifier.
pub type JobId = i64;

/// Seniority band on an ordered scale: junior < mid-level < senior < management.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RoleLevel {
    #[serde(rename = "junior")]
    Junior,
    #[default]
    #[serde(rename = "mid-level", alias = "mid")]
    MidLevel,
    #[serde(rename = "senior")]
    Senior,
    #[serde(rename = "management")]
    Management,
}

impl RoleLevel {
    pub const ALL: [RoleLevel; 4] = [
        RoleLevel::Junior,
        RoleLevel::MidLevel,
        RoleLevel::Senior,
        RoleLevel::Management,
    ];

    pub fn rank(self) -> u8 {
        match self {
            RoleLevel::Junior => 0,
            RoleLevel::MidLevel => 1,
            RoleLevel::Senior => 2,
            RoleLevel::Management => 3,
        }
    }

    /// Number of steps between two levels on the scale.
    pub fn distance(self, other: RoleLevel) -> u8 {
        self.rank().abs_diff(other.rank())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RoleLevel::Junior => "junior",
            RoleLevel::MidLevel => "mid-level",
            RoleLevel::Senior => "senior",
            RoleLevel::Management => "management",
        }
    }
}

/// What a job asks for. Fetched once per scoring call from the job profile service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobRequirements {
    #[serde(default)]
    pub mandatory_skills: BTreeSet<String>,
    #[serde(default)]
    pub preferred_skills: BTreeSet<String>,
    #[serde(default)]
    pub role_level: RoleLevel,
    #[serde(default)]
    pub technical_focus: Vec<String>,
}

impl JobRequirements {
    /// True when the job carries nothing to match against. This is what a
    /// failed or not-found lookup degrades to.
    pub fn is_empty(&self) -> bool {
        self.mandatory_skills.is_empty()
            && self.preferred_skills.is_empty()
            && self.technical_focus.is_empty()
    }
}
