//! Competition roster handling.
//!
//! The roster is the closed set of participating schools. It is reference
//! configuration, never inferred from event data: a school with no wins
//! still appears in every standings output at score 0, and a winner entry
//! whose school is not on the roster contributes nothing.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A participating school. The name doubles as the identity key that
/// winner entries are matched against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct School {
    pub name: String,
    /// Accent color tag consumed by presentation surfaces
    #[serde(default)]
    pub color: String,
}

/// Closed school roster with declaration order preserved.
#[derive(Debug, Clone)]
pub struct Roster {
    schools: Vec<School>,
    index: HashMap<String, usize>,
}

impl Roster {
    pub fn new(schools: Vec<School>) -> Self {
        let mut kept: Vec<School> = Vec::with_capacity(schools.len());
        let mut index: HashMap<String, usize> = HashMap::with_capacity(schools.len());
        for school in schools {
            if index.contains_key(&school.name) {
                warn!(school = %school.name, "duplicate roster entry ignored");
                continue;
            }
            index.insert(school.name.clone(), kept.len());
            kept.push(school);
        }
        Self { schools: kept, index }
    }

    /// The built-in fest roster.
    pub fn builtin() -> Self {
        let schools = BUILTIN_SCHOOLS
            .iter()
            .map(|(name, color)| School {
                name: (*name).to_string(),
                color: (*color).to_string(),
            })
            .collect();
        Self::new(schools)
    }

    /// Load a roster override from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read roster file: {}", path.display()))?;
        let schools = parse_roster(&content)
            .with_context(|| format!("Failed to parse roster file: {}", path.display()))?;
        if schools.is_empty() {
            bail!("Roster file contains no schools: {}", path.display());
        }
        Ok(Self::new(schools))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&School> {
        self.index.get(name).map(|&i| &self.schools[i])
    }

    pub fn len(&self) -> usize {
        self.schools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schools.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &School> {
        self.schools.iter()
    }
}

/// Parse a roster document: either a bare array of schools or an
/// object wrapping one under a "schools" field.
fn parse_roster(content: &str) -> Result<Vec<School>> {
    if let Ok(schools) = serde_json::from_str::<Vec<School>>(content) {
        return Ok(schools);
    }

    #[derive(Deserialize)]
    struct RosterFile {
        schools: Vec<School>,
    }

    let wrapper: RosterFile =
        serde_json::from_str(content).context("Expected an array of schools or {\"schools\": [...]}")?;
    Ok(wrapper.schools)
}

/// Name and accent color of every school in the fest.
const BUILTIN_SCHOOLS: &[(&str, &str)] = &[
    ("OUR LADY OF MERCY SCHOOL", "red"),
    ("KRISTUJYOTHI INTERNATIONAL SCHOOL", "blue"),
    ("JEEVAS CMI CENTRAL SCHOOL ALUVA", "green"),
    ("DON BOSCO CENTRAL SCHOOL ALUVA", "yellow"),
    ("AUXILIUM SCHOOL KIDANGOOR, ANGAMALY", "purple"),
    ("DON BOSCO SENIOR SECONDARY SCHOOL VADUTHALA", "indigo"),
    ("MARIAM THRESIA PUBLIC SCHOOL", "pink"),
    ("VIMALA CENTRAL SCHOOL PERUMBAVOOR", "orange"),
    ("CHAVARA INTERNATIONAL VAZHAKULAM", "teal"),
    ("ANITA PUBLIC SCHOOL THANNIPUZHA", "cyan"),
    ("SEVENTH DAY ADVENTIST HIGHER SECONDARY SCHOOL KALOOR", "emerald"),
    ("VIMALAGIRI INTERNATIONAL SCHOOL MUVATTUPUZHA", "lime"),
    ("SANTHOME CENTRAL SCHOOL MOOKKANNOOR", "amber"),
    ("MARY WARD ENGLISH MEDIUM SCHOOL", "rose"),
    ("MAR ATHANASIUS INTERNATIONAL SCHOOL KOTHAMANGALAM", "violet"),
    ("VIDYA VIKAS SCHOOL", "fuchsia"),
    ("JNANODAYA CENTRAL SCHOOL", "sky"),
    ("AUXILIUM ENGLISH MEDIUM SCHOOL", "slate"),
    ("ST. PATRICKS ACADEMY", "stone"),
];
