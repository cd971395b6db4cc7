//! Legacy-to-canonical format normalization.
//!
//! A legacy document (version 0.0.1) is mapped field by field onto the JSON
//! Resume schema. The mapping is pure: no I/O, no partial results, and every
//! legacy array maps 1:1 onto a canonical array in the same order.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::error::{Error, Result};
use crate::model::{
    Basics, Education, LegacyDate, LegacyDocument, LegacyEducation, LegacyJob, LegacyProfile,
    LegacyProject, LegacySkillGroup, Location, Meta, Profile, Project, Resume, SkillGroup, Work,
    LEGACY_VERSION,
};

/// Social networks recognized in a legacy profile, and how to expand a
/// username into a canonical profile entry.
struct ProfileNetwork {
    network: &'static str,
    base_url: &'static str,
    username: fn(&LegacyProfile) -> Option<&str>,
}

static PROFILE_NETWORKS: &[ProfileNetwork] = &[
    ProfileNetwork {
        network: "Github",
        base_url: "https://github.com/",
        username: |p| p.github_username.as_deref(),
    },
    ProfileNetwork {
        network: "Linkedin",
        base_url: "https://www.linkedin.com/",
        username: |p| p.linkedin_username.as_deref(),
    },
];

/// Whether a loaded YAML document is in the legacy resumy format.
pub fn is_legacy(doc: &serde_yaml::Value) -> bool {
    doc.get("version").and_then(serde_yaml::Value::as_str) == Some(LEGACY_VERSION)
}

/// Convert a legacy document into a canonical one.
///
/// Fails with [`Error::SchemaMismatch`] when a legacy field required by the
/// canonical schema is absent, and with [`Error::InvalidMonth`] on an
/// unparseable month abbreviation.
pub fn normalize(doc: &LegacyDocument) -> Result<Resume> {
    let profile = doc.profile.as_ref().ok_or_else(|| Error::missing("profile"))?;
    let firstname = profile
        .firstname
        .as_deref()
        .ok_or_else(|| Error::missing("profile.firstname"))?;
    let lastname = profile
        .lastname
        .as_deref()
        .ok_or_else(|| Error::missing("profile.lastname"))?;

    let location = if profile.city.is_some() || profile.country.is_some() {
        Some(Location {
            city: profile.city.clone(),
            country_code: profile.country.clone(),
        })
    } else {
        None
    };

    let profiles = PROFILE_NETWORKS
        .iter()
        .filter_map(|entry| {
            (entry.username)(profile).map(|username| Profile {
                network: entry.network.to_string(),
                username: username.to_string(),
                url: format!("{}{}", entry.base_url, username),
            })
        })
        .collect();

    // Canonical section name, and whether the legacy section asked for a
    // page break before it.
    let mut breaks_before = BTreeMap::new();
    let break_flags = [
        ("skills", doc.skills.as_ref().map(|s| s.include_page_break)),
        ("work", doc.job_experience.as_ref().map(|s| s.include_page_break)),
        ("education", doc.education.as_ref().map(|s| s.include_page_break)),
        ("projects", doc.projects.as_ref().map(|s| s.include_page_break)),
    ];
    for (section, flag) in break_flags {
        if flag == Some(true) {
            breaks_before.insert(section.to_string(), true);
        }
    }

    let skills = doc
        .skills
        .as_ref()
        .map(|section| section.content.iter().map(map_skill_group).collect());
    let work = doc
        .job_experience
        .as_ref()
        .map(|section| section.content.iter().map(map_job).collect::<Result<Vec<_>>>())
        .transpose()?;
    let education = doc
        .education
        .as_ref()
        .map(|section| {
            section
                .content
                .iter()
                .map(map_education)
                .collect::<Result<Vec<_>>>()
        })
        .transpose()?;
    let projects = doc
        .projects
        .as_ref()
        .map(|section| section.content.iter().map(map_project).collect());

    Ok(Resume {
        meta: Meta { breaks_before },
        basics: Basics {
            name: format!("{firstname} {lastname}"),
            email: profile.email.clone(),
            phone: profile.phone.clone(),
            url: profile.portfolio_url.clone(),
            location,
            profiles,
        },
        skills,
        work,
        education,
        projects,
    })
}

fn map_skill_group(group: &LegacySkillGroup) -> SkillGroup {
    SkillGroup {
        name: group.title.clone(),
        keywords: group.content.iter().map(|s| s.name.clone()).collect(),
    }
}

fn map_job(job: &LegacyJob) -> Result<Work> {
    Ok(Work {
        name: job.company_name.clone(),
        position: job.title.clone(),
        start_date: iso_date(&job.start)?,
        end_date: end_date(job.end.as_ref(), job.present)?,
        highlights: job.description.clone(),
    })
}

fn map_education(edu: &LegacyEducation) -> Result<Education> {
    Ok(Education {
        institution: edu.company_name.clone(),
        area: edu.title.clone(),
        start_date: iso_date(&edu.start)?,
        end_date: end_date(edu.end.as_ref(), edu.present)?,
    })
}

fn map_project(project: &LegacyProject) -> Project {
    Project {
        name: project.name.clone(),
        description: project.description.clone(),
        url: project.url.clone(),
        keywords: project.skills.iter().map(|s| s.name.clone()).collect(),
    }
}

/// An entry still marked `present` has no end date, whatever `to` says.
fn end_date(end: Option<&LegacyDate>, present: bool) -> Result<Option<String>> {
    match end {
        Some(date) if !present => Ok(Some(iso_date(date)?)),
        _ => Ok(None),
    }
}

/// Legacy dates only carry a year and an optional month; days are pinned to
/// the first and a missing month means January.
fn iso_date(date: &LegacyDate) -> Result<String> {
    let month = match &date.month {
        Some(name) => month_number(name)?,
        None => 1,
    };
    Ok(format!("{:04}-{:02}-01", date.year, month))
}

fn month_number(name: &str) -> Result<u32> {
    NaiveDate::parse_from_str(&format!("{name} 1 2000"), "%b %d %Y")
        .map(|d| d.month())
        .map_err(|_| Error::InvalidMonth(name.to_string()))
}
