//! Export request model
//!
//! An [`ExportRequest`] describes what the export dialog must look like
//! before a plan is submitted: which content categories are selected and
//! which single destination is active. It is expressed as an ordered list
//! of [`Toggle`]s so the exporter can apply and check every step.

use super::ids::DestinationName;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Content category offered by the export dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentCategory {
    /// CT / MR image series
    Images,
    /// Structure set (contours)
    StructureSet,
    /// RT plan object
    Plan,
    /// Summed plan dose
    TotalPlanDose,
    /// Per-beam dose
    BeamDose,
    /// Spatial registrations
    Registrations,
}

impl ContentCategory {
    /// Categories selected when the configuration does not list any
    pub fn defaults() -> Vec<ContentCategory> {
        vec![
            ContentCategory::Images,
            ContentCategory::StructureSet,
            ContentCategory::TotalPlanDose,
        ]
    }

    /// Wire name used in configuration files and by the automation bridge
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentCategory::Images => "images",
            ContentCategory::StructureSet => "structure_set",
            ContentCategory::Plan => "plan",
            ContentCategory::TotalPlanDose => "total_plan_dose",
            ContentCategory::BeamDose => "beam_dose",
            ContentCategory::Registrations => "registrations",
        }
    }
}

impl fmt::Display for ContentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "images" => Ok(ContentCategory::Images),
            "structure_set" => Ok(ContentCategory::StructureSet),
            "plan" => Ok(ContentCategory::Plan),
            "total_plan_dose" => Ok(ContentCategory::TotalPlanDose),
            "beam_dose" => Ok(ContentCategory::BeamDose),
            "registrations" => Ok(ContentCategory::Registrations),
            other => Err(format!(
                "Unknown content category '{other}'. Must be one of: images, structure_set, plan, total_plan_dose, beam_dose, registrations"
            )),
        }
    }
}

/// A single setting change in the export dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Toggle {
    /// Select or deselect a content category
    Category {
        category: ContentCategory,
        enabled: bool,
    },
    /// Activate or deactivate a destination
    Destination {
        destination: DestinationName,
        active: bool,
    },
}

impl fmt::Display for Toggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Toggle::Category { category, enabled } => {
                write!(f, "category {category} -> {}", on_off(*enabled))
            }
            Toggle::Destination {
                destination,
                active,
            } => write!(f, "destination {destination} -> {}", on_off(*active)),
        }
    }
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

/// Desired export dialog configuration for one plan
///
/// Exactly one destination is active: the target. Every other known
/// destination is explicitly switched off before the target is switched on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    categories: Vec<ContentCategory>,
    inactive: Vec<DestinationName>,
    target: DestinationName,
}

impl ExportRequest {
    /// Build a request from the configured categories and destinations
    ///
    /// `known` may or may not contain `target`; the target is never
    /// switched off. Duplicate entries are collapsed.
    ///
    /// # Errors
    ///
    /// Returns an error if `categories` is empty.
    pub fn new(
        categories: &[ContentCategory],
        known: &[DestinationName],
        target: DestinationName,
    ) -> Result<Self, String> {
        if categories.is_empty() {
            return Err("Export request needs at least one content category".to_string());
        }

        let mut unique_categories = Vec::with_capacity(categories.len());
        for category in categories {
            if !unique_categories.contains(category) {
                unique_categories.push(*category);
            }
        }

        let mut inactive: Vec<DestinationName> = Vec::new();
        for destination in known {
            if destination != &target && !inactive.contains(destination) {
                inactive.push(destination.clone());
            }
        }

        Ok(Self {
            categories: unique_categories,
            inactive,
            target,
        })
    }

    /// Selected content categories
    pub fn categories(&self) -> &[ContentCategory] {
        &self.categories
    }

    /// The one destination that will be active on submission
    pub fn target(&self) -> &DestinationName {
        &self.target
    }

    /// Destinations that are switched off before submission
    pub fn inactive_destinations(&self) -> &[DestinationName] {
        &self.inactive
    }

    /// Ordered list of dialog changes to apply
    ///
    /// Categories first, then every non-target destination off, then the
    /// target on.
    pub fn toggles(&self) -> Vec<Toggle> {
        let mut toggles: Vec<Toggle> = self
            .categories
            .iter()
            .map(|category| Toggle::Category {
                category: *category,
                enabled: true,
            })
            .collect();

        toggles.extend(self.inactive.iter().map(|destination| Toggle::Destination {
            destination: destination.clone(),
            active: false,
        }));

        toggles.push(Toggle::Destination {
            destination: self.target.clone(),
            active: true,
        });

        toggles
    }
}
