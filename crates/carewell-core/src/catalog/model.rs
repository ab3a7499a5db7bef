//! Catalog domain models.
//!
//! Routine guides are immutable, built once at startup, and looked up by a
//! typed key. Steps are fixed at build time and never mutated.

use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{Display, EnumIter, IntoStaticStr};

/// The three care categories the catalog covers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum CareType {
    OrganCare,
    Massage,
    Stretch,
}

impl CareType {
    /// Directory name used when addressing bundled audio assets.
    pub fn asset_dir(&self) -> &'static str {
        self.into()
    }
}

/// Organs covered by the organ-care meditations.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum OrganKind {
    Kidney,
    Liver,
    Stomach,
    Pancreas,
    Intestine,
}

/// Body parts covered by the massage guides.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum MassagePart {
    Neck,
    Shoulder,
    Back,
    Foot,
    FullBody,
}

/// Complaints addressed by the stretch routines.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum StretchTarget {
    ShoulderPain,
    BackPain,
    EyeStrain,
    FullBody,
}

/// A stable key identifying exactly one routine in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "key", rename_all = "kebab-case")]
pub enum RoutineKey {
    OrganCare(OrganKind),
    Massage(MassagePart),
    Stretch(StretchTarget),
}

impl RoutineKey {
    /// The care category this key belongs to.
    pub fn care_type(&self) -> CareType {
        match self {
            Self::OrganCare(_) => CareType::OrganCare,
            Self::Massage(_) => CareType::Massage,
            Self::Stretch(_) => CareType::Stretch,
        }
    }

    /// The kebab-case subtype slug, as persisted in session records and
    /// used in audio asset file names.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::OrganCare(organ) => (*organ).into(),
            Self::Massage(part) => (*part).into(),
            Self::Stretch(target) => (*target).into(),
        }
    }
}

impl fmt::Display for RoutineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.care_type(), self.slug())
    }
}

/// How a routine signals that a step has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CueKind {
    /// A bundled audio narration spanning the whole step; the step is done
    /// when playback ends.
    Audio,
    /// Step narration followed by a fixed countdown: the narration plays
    /// first (when audio is available), then the countdown runs for the
    /// step's duration. The step is done when the timer reaches zero.
    Timer,
}

/// One instruction unit within a routine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Instruction text shown (and narrated) for this step.
    pub instruction: String,
    /// Step duration in seconds. For audio-cued steps this is the nominal
    /// narration length, used as the fallback when audio cannot play.
    pub duration_secs: u32,
}

/// An immutable guided routine: a named, ordered sequence of steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineGuide {
    pub key: RoutineKey,
    pub name: String,
    pub description: String,
    pub steps: Vec<Step>,
    pub benefits: Vec<String>,
    /// Advance trigger used for every step of this routine.
    pub cue: CueKind,
}

impl RoutineGuide {
    /// Number of steps in this routine.
    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }

    /// Nominal total duration in seconds (sum of step durations).
    pub fn total_secs(&self) -> u32 {
        self.steps.iter().map(|step| step.duration_secs).sum()
    }
}
