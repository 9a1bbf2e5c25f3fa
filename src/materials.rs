//! Material tags and their presentation records.
//!
//! Builders only attach a [`MaterialTag`] to the parts they create. Colors,
//! densities and elastic constants are looked up here when a part is shown
//! or reported, and never influence geometry.

use serde::{Deserialize, Serialize};

use crate::scene::Color;

/// Identifies the material a part is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaterialTag {
    Titanium,
    #[serde(alias = "CARBON")]
    CarbonFiber,
    Lead,
    Tungsten,
    Boron,
    Water,
    Steel,
    Ablative,
    #[serde(alias = "AL")]
    Aluminum,
    Copper,
    Silicon,
    Insulation,
    Battery,
    Superconductor,
    Cfrp,
    #[serde(alias = "CC")]
    CarbonCarbon,
    Kevlar,
}

/// Elastic constants of a material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Elastic {
    Isotropic { youngs_modulus: f64, poisson: f64 },
    Orthotropic { ex: f64, ey: f64, ez: f64, nu_xy: f64 },
}

/// Descriptive record for a material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialRecord {
    pub name: &'static str,
    /// Density in kg/m³.
    pub density: f64,
    pub color: Color,
    pub elastic: Option<Elastic>,
}

const fn isotropic(youngs_modulus: f64, poisson: f64) -> Option<Elastic> {
    Some(Elastic::Isotropic {
        youngs_modulus,
        poisson,
    })
}

const fn orthotropic(ex: f64, ey: f64, ez: f64, nu_xy: f64) -> Option<Elastic> {
    Some(Elastic::Orthotropic { ex, ey, ez, nu_xy })
}

impl MaterialTag {
    /// Every tag, in declaration order.
    pub const ALL: [Self; 17] = [
        Self::Titanium,
        Self::CarbonFiber,
        Self::Lead,
        Self::Tungsten,
        Self::Boron,
        Self::Water,
        Self::Steel,
        Self::Ablative,
        Self::Aluminum,
        Self::Copper,
        Self::Silicon,
        Self::Insulation,
        Self::Battery,
        Self::Superconductor,
        Self::Cfrp,
        Self::CarbonCarbon,
        Self::Kevlar,
    ];

    /// Looks up the record for this tag.
    #[must_use]
    pub const fn record(self) -> MaterialRecord {
        let (name, density, color, elastic) = match self {
            Self::Titanium => ("Ti-6Al-4V", 4430.0, Color::rgb(0.7, 0.7, 0.8), isotropic(114e9, 0.32)),
            Self::CarbonFiber => (
                "Carbon Fiber Composite",
                1600.0,
                Color::rgb(0.2, 0.2, 0.2),
                orthotropic(200e9, 10e9, 10e9, 0.25),
            ),
            Self::Lead => ("Lead Shield", 11340.0, Color::rgb(0.3, 0.3, 0.3), isotropic(16e9, 0.44)),
            Self::Tungsten => ("Tungsten Alloy", 19300.0, Color::rgb(0.4, 0.4, 0.4), None),
            Self::Boron => ("Boron Carbide", 2500.0, Color::rgb(0.1, 0.1, 0.1), None),
            Self::Water => ("Water/Anti-Radiation Tank", 1000.0, Color::rgb(0.0, 0.5, 1.0), None),
            Self::Steel => ("Stainless Steel 316L", 8000.0, Color::rgb(0.6, 0.6, 0.6), isotropic(200e9, 0.30)),
            Self::Ablative => (
                "Ablative TPS",
                1200.0,
                Color::rgb(0.8, 0.4, 0.0),
                orthotropic(50e9, 50e9, 5e9, 0.2),
            ),
            Self::Aluminum => ("Aluminum 6061", 2700.0, Color::rgb(0.9, 0.9, 0.9), isotropic(72e9, 0.33)),
            Self::Copper => ("Copper", 8960.0, Color::rgb(0.8, 0.5, 0.2), isotropic(110e9, 0.34)),
            Self::Silicon => ("Silicon Solar Cells", 2330.0, Color::rgb(0.6, 0.6, 0.7), None),
            Self::Insulation => ("Thermal Insulation Foam", 50.0, Color::rgb(0.8, 0.8, 0.8), None),
            Self::Battery => ("Lithium-Ion Battery", 2500.0, Color::rgb(0.1, 0.1, 0.5), None),
            Self::Superconductor => ("Superconducting Wire", 8000.0, Color::rgb(0.0, 0.8, 0.8), None),
            Self::Cfrp => ("CFRP", 1550.0, Color::rgb(0.25, 0.25, 0.28), orthotropic(130e9, 10e9, 10e9, 0.25)),
            Self::CarbonCarbon => ("C/C TPS", 1600.0, Color::rgb(0.35, 0.33, 0.32), orthotropic(70e9, 70e9, 10e9, 0.2)),
            Self::Kevlar => ("Kevlar", 1440.0, Color::rgb(0.85, 0.75, 0.3), orthotropic(70e9, 5e9, 5e9, 0.27)),
        };
        MaterialRecord {
            name,
            density,
            color,
            elastic,
        }
    }
}
