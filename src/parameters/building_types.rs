//! Building program and construction era tags.

use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Reference building program of a typology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuildingProgram {
    FullServiceRestaurant,
    Hospital,
    LargeHotel,
    LargeOffice,
    MediumOffice,
    MidRiseApartment,
    OutPatient,
    PrimarySchool,
    QuickServiceRestaurant,
    SecondarySchool,
    SmallHotel,
    SmallOffice,
    StandAloneRetail,
    StripMall,
    SuperMarket,
    Warehouse,
}

impl BuildingProgram {
    /// Every program, in alphabetical order of the canonical tag.
    pub const ALL: [Self; 16] = [
        Self::FullServiceRestaurant,
        Self::Hospital,
        Self::LargeHotel,
        Self::LargeOffice,
        Self::MediumOffice,
        Self::MidRiseApartment,
        Self::OutPatient,
        Self::PrimarySchool,
        Self::QuickServiceRestaurant,
        Self::SecondarySchool,
        Self::SmallHotel,
        Self::SmallOffice,
        Self::StandAloneRetail,
        Self::StripMall,
        Self::SuperMarket,
        Self::Warehouse,
    ];

    /// Programs addressed by the numeric aliases `"0"` through `"12"`.
    const NUMBERED: [Self; 13] = [
        Self::LargeOffice,
        Self::StandAloneRetail,
        Self::MidRiseApartment,
        Self::PrimarySchool,
        Self::SecondarySchool,
        Self::SmallHotel,
        Self::LargeHotel,
        Self::Hospital,
        Self::OutPatient,
        Self::Warehouse,
        Self::SuperMarket,
        Self::FullServiceRestaurant,
        Self::QuickServiceRestaurant,
    ];

    /// Canonical tag, e.g. `"MidRiseApartment"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FullServiceRestaurant => "FullServiceRestaurant",
            Self::Hospital => "Hospital",
            Self::LargeHotel => "LargeHotel",
            Self::LargeOffice => "LargeOffice",
            Self::MediumOffice => "MediumOffice",
            Self::MidRiseApartment => "MidRiseApartment",
            Self::OutPatient => "OutPatient",
            Self::PrimarySchool => "PrimarySchool",
            Self::QuickServiceRestaurant => "QuickServiceRestaurant",
            Self::SecondarySchool => "SecondarySchool",
            Self::SmallHotel => "SmallHotel",
            Self::SmallOffice => "SmallOffice",
            Self::StandAloneRetail => "StandAloneRetail",
            Self::StripMall => "StripMall",
            Self::SuperMarket => "SuperMarket",
            Self::Warehouse => "Warehouse",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        if let Some(found) = Self::ALL
            .iter()
            .copied()
            .find(|p| normalize(p.as_str()) == key)
        {
            return Some(found);
        }
        match key {
            "OFFICE" => Some(Self::LargeOffice),
            "RETAIL" => Some(Self::StandAloneRetail),
            _ => key
                .parse::<usize>()
                .ok()
                .and_then(|i| Self::NUMBERED.get(i).copied()),
        }
    }
}

impl fmt::Display for BuildingProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildingProgram {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        check_program(s)
    }
}

/// Construction era of a typology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuildingAge {
    Pre1980s,
    #[cfg_attr(feature = "serde", serde(rename = "1980sPresent"))]
    From1980sToPresent,
    NewConstruction,
}

impl BuildingAge {
    pub const ALL: [Self; 3] = [Self::Pre1980s, Self::From1980sToPresent, Self::NewConstruction];

    /// Canonical tag, e.g. `"1980sPresent"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pre1980s => "Pre1980s",
            Self::From1980sToPresent => "1980sPresent",
            Self::NewConstruction => "NewConstruction",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|a| normalize(a.as_str()) == key)
            .or_else(|| {
                key.parse::<usize>()
                    .ok()
                    .and_then(|i| Self::ALL.get(i).copied())
            })
    }
}

impl fmt::Display for BuildingAge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildingAge {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        check_age(s)
    }
}

/// Upper-cases and drops whitespace, hyphens, underscores and apostrophes.
fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '_' | '\'' | '\u{2019}'))
        .flat_map(char::to_uppercase)
        .collect()
}

/// Resolves a free-form program name to its canonical tag.
///
/// Accepts the canonical tags, spaced spellings such as `"Midrise Apartment"`,
/// the numeric aliases `"0"`..`"12"` and the shorthands `"Office"` and `"Retail"`.
///
/// # Errors
///
/// Returns [`ValidationError::UnknownProgram`] carrying the input text.
pub fn check_program(name: &str) -> Result<BuildingProgram, ValidationError> {
    BuildingProgram::from_key(&normalize(name))
        .ok_or_else(|| ValidationError::UnknownProgram(name.to_owned()))
}

/// Resolves a free-form construction era to its canonical tag.
///
/// Accepts `"Pre-1980's"`, `"1980's-Present"`, `"New Construction"`, their
/// canonical forms and the numeric aliases `"0"`..`"2"`.
///
/// # Errors
///
/// Returns [`ValidationError::UnknownAge`] carrying the input text.
pub fn check_age(name: &str) -> Result<BuildingAge, ValidationError> {
    BuildingAge::from_key(&normalize(name)).ok_or_else(|| ValidationError::UnknownAge(name.to_owned()))
}
