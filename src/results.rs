//! Result types for thickness optimization

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::elements::Laminate;

/// Laminate strain component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrainComponent {
    /// Axial strain ex
    Longitudinal,
    /// Hoop strain ey
    Transverse,
    /// Shear strain gxy
    Shear,
}

impl StrainComponent {
    /// Component for an index into [ex, ey, gxy]
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => Self::Longitudinal,
            1 => Self::Transverse,
            _ => Self::Shear,
        }
    }
}

/// Why an optimization run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureMechanism {
    /// A ply that had already failed in the fibers failed again, or fiber
    /// failure was reached with progressive failure disabled
    FiberFailure { inter_fiber: bool },
    /// The strain allowable was reached before any strength limit
    MaxDeformation {
        component: StrainComponent,
        fiber: bool,
        inter_fiber: bool,
    },
    /// The iteration cap was hit; the best thickness so far is reported
    RecursionLimitReached,
    /// Nothing is loaded, so the thickness was left unchanged
    Unloaded,
}

impl FailureMechanism {
    /// Short tag such as `FF+IFF` or `max_deform+FF`
    pub fn tag(&self) -> String {
        let suffix = |fiber: bool, inter_fiber: bool| {
            let mut s = String::new();
            if fiber {
                s.push_str("+FF");
            }
            if inter_fiber {
                s.push_str("+IFF");
            }
            s
        };
        match *self {
            Self::FiberFailure { inter_fiber } => format!("FF{}", suffix(false, inter_fiber)),
            Self::MaxDeformation {
                fiber, inter_fiber, ..
            } => format!("max_deform{}", suffix(fiber, inter_fiber)),
            Self::RecursionLimitReached => "max_recursion_depth".to_string(),
            Self::Unloaded => "unloaded".to_string(),
        }
    }

    /// Every tag a run can produce
    ///
    /// Besides the strength, strain and iteration-cap tags this includes
    /// `unloaded`, returned when a zero load leaves nothing to size.
    pub fn all_tags() -> Vec<String> {
        let mut tags = vec!["FF".to_string(), "FF+IFF".to_string()];
        for (fiber, inter_fiber) in [(false, false), (true, false), (false, true), (true, true)] {
            tags.push(
                Self::MaxDeformation {
                    component: StrainComponent::Longitudinal,
                    fiber,
                    inter_fiber,
                }
                .tag(),
            );
        }
        tags.push(Self::RecursionLimitReached.tag());
        tags.push(Self::Unloaded.tag());
        tags
    }
}

impl fmt::Display for FailureMechanism {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Outcome of one optimization run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationResult {
    /// Governing wall thickness
    ///
    /// For `MaxDeformation` this is the wall the last step put on the strain
    /// allowable. Otherwise it is the smallest thickness recorded.
    pub optimized_thickness: f64,
    /// Thickness when the run stopped
    pub final_thickness: f64,
    /// Why the run stopped
    pub failure_mechanism: FailureMechanism,
    /// Every thickness the run moved to, oldest first
    pub thickness_history: Vec<f64>,
    /// Number of iterations performed
    pub iterations: usize,
    /// Pipe mass per unit length at the optimized thickness
    pub mass_per_length: f64,
    /// Laminate at the end of the run, with its ply damage, solved at
    /// `final_thickness`
    pub laminate: Laminate,
}

impl OptimizationResult {
    /// Tag of the failure mechanism
    pub fn mechanism_tag(&self) -> String {
        self.failure_mechanism.tag()
    }
}
