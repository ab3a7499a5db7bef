//! Routine catalog: static, read-only guide definitions.
//!
//! # Module Structure
//!
//! - `model`: catalog domain types (`CareType`, `RoutineKey`, `RoutineGuide`, ...)
//! - `data`: the built-in guide content

mod data;
mod model;

pub use model::{
    CareType, CueKind, MassagePart, OrganKind, RoutineGuide, RoutineKey, Step, StretchTarget,
};

/// Looks up the guide for a routine key.
///
/// The catalog covers every `RoutineKey` variant, so this lookup is total.
pub fn guide(key: RoutineKey) -> &'static RoutineGuide {
    data::CATALOG
        .iter()
        .find(|guide| guide.key == key)
        // Safe: `every_routine_key_has_a_guide` in data.rs pins this invariant.
        .expect("catalog covers every routine key")
}

/// Lists all guides belonging to one care category, in catalog order.
pub fn guides_for(care_type: CareType) -> Vec<&'static RoutineGuide> {
    data::CATALOG
        .iter()
        .filter(|guide| guide.key.care_type() == care_type)
        .collect()
}

/// Lists every guide in the catalog.
pub fn all_guides() -> impl Iterator<Item = &'static RoutineGuide> {
    data::CATALOG.iter()
}
