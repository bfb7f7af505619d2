//! Carbon isotopes and the nucleons that make up their nucleus

use crate::constants::{NEUTRON_COLOR, NUCLEUS_RADIUS, PROTON_COLOR, PROTON_COUNT};
use crate::error::ModelError;
use crate::sphere::sphere_point;
use glam::Vec3;
use std::fmt;

/// Supported carbon isotopes, identified by mass number
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Isotope {
    #[default]
    C12 = 12,
    C13 = 13,
    C14 = 14,
}

impl Isotope {
    pub const ALL: [Isotope; 3] = [Isotope::C12, Isotope::C13, Isotope::C14];

    pub fn mass_number(self) -> u32 {
        self as u32
    }

    pub fn proton_count(self) -> u32 {
        PROTON_COUNT
    }

    pub fn neutron_count(self) -> u32 {
        match self {
            Isotope::C12 => 6,
            Isotope::C13 => 7,
            Isotope::C14 => 8,
        }
    }

    pub fn nucleon_count(self) -> u32 {
        self.proton_count() + self.neutron_count()
    }
}

impl TryFrom<u32> for Isotope {
    type Error = ModelError;

    fn try_from(mass_number: u32) -> Result<Self, Self::Error> {
        match mass_number {
            12 => Ok(Isotope::C12),
            13 => Ok(Isotope::C13),
            14 => Ok(Isotope::C14),
            other => Err(ModelError::InvalidIsotope(other)),
        }
    }
}

impl fmt::Display for Isotope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Carbon-{}", self.mass_number())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NucleonKind {
    Proton,
    Neutron,
}

impl NucleonKind {
    pub fn color(self) -> [f32; 3] {
        match self {
            NucleonKind::Proton => PROTON_COLOR,
            NucleonKind::Neutron => NEUTRON_COLOR,
        }
    }
}

/// A proton or neutron placed on the nucleus shell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nucleon {
    pub kind: NucleonKind,
    pub position: Vec3,
}

impl Nucleon {
    pub fn color(&self) -> [f32; 3] {
        self.kind.color()
    }
}

/// Builds the nucleon layout for an isotope.
///
/// Protons take the first spiral indices and neutrons the rest, so the output
/// is always grouped protons-then-neutrons.
#[derive(Debug, Clone, Copy)]
pub struct NucleusModel {
    pub radius: f32,
}

impl Default for NucleusModel {
    fn default() -> Self {
        Self {
            radius: NUCLEUS_RADIUS,
        }
    }
}

impl NucleusModel {
    pub fn new(radius: f32) -> Self {
        Self { radius }
    }

    pub fn build(&self, isotope: Isotope) -> Result<Vec<Nucleon>, ModelError> {
        let protons = isotope.proton_count() as usize;
        let total = isotope.nucleon_count() as usize;

        (0..total)
            .map(|i| -> Result<Nucleon, ModelError> {
                let kind = if i < protons {
                    NucleonKind::Proton
                } else {
                    NucleonKind::Neutron
                };
                Ok(Nucleon {
                    kind,
                    position: sphere_point(i, total, self.radius)?,
                })
            })
            .collect()
    }

    /// Same as [`NucleusModel::build`] for a raw mass number, rejecting
    /// anything that is not a supported carbon isotope.
    pub fn build_mass_number(&self, mass_number: u32) -> Result<Vec<Nucleon>, ModelError> {
        self.build(Isotope::try_from(mass_number)?)
    }
}
