use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Canonical resume document (JSON Resume dialect).
///
/// Optional sections and fields are skipped during serialization so the
/// emitted YAML only contains what the source document actually provided.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resume {
    #[serde(default)]
    pub meta: Meta,
    pub basics: Basics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<SkillGroup>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work: Option<Vec<Work>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education: Option<Vec<Education>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<Project>>,
}

/// Rendering hints that are not part of the resume content itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    /// Section name -> whether themes should start the section on a new page.
    #[serde(default)]
    pub breaks_before: BTreeMap<String, bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Basics {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub profiles: Vec<Profile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(rename = "countryCode", skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}

/// A social profile, e.g. a Github or Linkedin account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub network: String,
    pub username: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Work {
    pub name: String,
    pub position: String,
    #[serde(rename = "startDate")]
    pub start_date: String,
    #[serde(rename = "endDate", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub institution: String,
    pub area: String,
    #[serde(rename = "startDate")]
    pub start_date: String,
    #[serde(rename = "endDate", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// A named group of related skills, e.g. "Languages".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillGroup {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

/// Version marker carried by legacy documents.
pub const LEGACY_VERSION: &str = "0.0.1";

/// Legacy resumy document (the ad hoc YAML shape used before the switch to
/// the JSON Resume schema). Only deserialized, never written back out.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyDocument {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub profile: Option<LegacyProfile>,
    #[serde(default)]
    pub skills: Option<LegacySection<LegacySkillGroup>>,
    #[serde(default)]
    pub job_experience: Option<LegacySection<LegacyJob>>,
    #[serde(default)]
    pub education: Option<LegacySection<LegacyEducation>>,
    #[serde(default)]
    pub projects: Option<LegacySection<LegacyProject>>,
}

/// Every legacy section shares the same wrapper shape.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacySection<T> {
    #[serde(default)]
    pub include_page_break: bool,
    pub content: Vec<T>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyProfile {
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub portfolio_url: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub github_username: Option<String>,
    #[serde(default)]
    pub linkedin_username: Option<String>,
}

/// Legacy dates are year plus an optional three-letter month abbreviation.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyDate {
    pub year: i32,
    #[serde(default)]
    pub month: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegacyJob {
    pub company_name: String,
    pub title: String,
    #[serde(rename = "from")]
    pub start: LegacyDate,
    #[serde(rename = "to", default)]
    pub end: Option<LegacyDate>,
    #[serde(default)]
    pub present: bool,
    #[serde(default)]
    pub description: Vec<String>,
}

// Legacy education entries reuse the job field names.
#[derive(Debug, Clone, Deserialize)]
pub struct LegacyEducation {
    pub company_name: String,
    pub title: String,
    #[serde(rename = "from")]
    pub start: LegacyDate,
    #[serde(rename = "to", default)]
    pub end: Option<LegacyDate>,
    #[serde(default)]
    pub present: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegacySkillGroup {
    pub title: String,
    pub content: Vec<LegacySkill>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegacySkill {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegacyProject {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub skills: Vec<LegacySkill>,
}
