use std::fmt;

use super::pavement::PavementParameters;
use super::traffic::TrafficParameters;
use super::typology::Typology;
use super::vegetation::VegetationParameters;

/// Kind tag of a [`UwgRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RecordKind {
    Typology,
    Traffic,
    Vegetation,
    Pavement,
}

/// Any record handed to the canyon model adapter.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", content = "record")
)]
pub enum UwgRecord {
    Typology(Typology),
    Traffic(TrafficParameters),
    Vegetation(VegetationParameters),
    Pavement(PavementParameters),
}

impl UwgRecord {
    #[must_use]
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Typology(_) => RecordKind::Typology,
            Self::Traffic(_) => RecordKind::Traffic,
            Self::Vegetation(_) => RecordKind::Vegetation,
            Self::Pavement(_) => RecordKind::Pavement,
        }
    }

    #[must_use]
    pub fn as_typology(&self) -> Option<&Typology> {
        match self {
            Self::Typology(t) => Some(t),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_traffic(&self) -> Option<&TrafficParameters> {
        match self {
            Self::Traffic(t) => Some(t),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_vegetation(&self) -> Option<&VegetationParameters> {
        match self {
            Self::Vegetation(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_pavement(&self) -> Option<&PavementParameters> {
        match self {
            Self::Pavement(p) => Some(p),
            _ => None,
        }
    }
}

impl From<Typology> for UwgRecord {
    fn from(value: Typology) -> Self {
        Self::Typology(value)
    }
}

impl From<TrafficParameters> for UwgRecord {
    fn from(value: TrafficParameters) -> Self {
        Self::Traffic(value)
    }
}

impl From<VegetationParameters> for UwgRecord {
    fn from(value: VegetationParameters) -> Self {
        Self::Vegetation(value)
    }
}

impl From<PavementParameters> for UwgRecord {
    fn from(value: PavementParameters) -> Self {
        Self::Pavement(value)
    }
}

impl fmt::Display for UwgRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Typology(t) => fmt::Display::fmt(t, f),
            Self::Traffic(t) => fmt::Display::fmt(t, f),
            Self::Vegetation(v) => fmt::Display::fmt(v, f),
            Self::Pavement(p) => fmt::Display::fmt(p, f),
        }
    }
}
