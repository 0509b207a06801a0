//! Validated parameter records consumed by an Urban Weather Generator adapter.

mod building_types;
mod pavement;
mod record;
mod traffic;
mod typology;
pub mod validate;
mod vegetation;

pub use building_types::{check_age, check_program, BuildingAge, BuildingProgram};
pub use pavement::{PavementOptions, PavementParameters};
pub use record::{RecordKind, UwgRecord};
pub use traffic::{
    check_schedule, TrafficOptions, TrafficParameters, DEFAULT_SATURDAY_SCHEDULE,
    DEFAULT_SUNDAY_SCHEDULE, DEFAULT_WEEKDAY_SCHEDULE,
};
pub use typology::{GlazingRatio, Typology, TypologyOptions};
pub use vegetation::{month_label, VegetationOptions, VegetationParameters};

/// Separator line closing every record's text form.
const RECORD_RULE: &str = "-------------------------------------";
