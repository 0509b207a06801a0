use std::fmt;

use crate::error::ValidationError;

use super::validate::non_negative;
use super::RECORD_RULE;

/// Hourly traffic fraction on weekdays.
pub const DEFAULT_WEEKDAY_SCHEDULE: [f64; 24] = [
    0.2, 0.2, 0.2, 0.2, 0.2, 0.4, 0.7, 0.9, 0.9, 0.6, 0.6, 0.6, 0.6, 0.6, 0.7, 0.8, 0.9, 0.9, 0.8,
    0.8, 0.7, 0.3, 0.2, 0.2,
];

/// Hourly traffic fraction on Saturdays.
pub const DEFAULT_SATURDAY_SCHEDULE: [f64; 24] = [
    0.2, 0.2, 0.2, 0.2, 0.2, 0.3, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.5, 0.6, 0.7, 0.7, 0.7, 0.7,
    0.5, 0.4, 0.3, 0.2, 0.2,
];

/// Hourly traffic fraction on Sundays.
pub const DEFAULT_SUNDAY_SCHEDULE: [f64; 24] = [
    0.2, 0.2, 0.2, 0.2, 0.2, 0.3, 0.4, 0.4, 0.4, 0.4, 0.4, 0.4, 0.4, 0.4, 0.4, 0.4, 0.4, 0.4, 0.4,
    0.4, 0.3, 0.3, 0.2, 0.2,
];

/// Checks an hourly schedule and clamps every value into `[0, 1]`.
///
/// # Errors
///
/// Returns [`ValidationError::ScheduleLength`] unless there are exactly 24
/// values, and [`ValidationError::OutOfRange`] for a NaN entry.
pub fn check_schedule(schedule: &[f64]) -> Result<[f64; 24], ValidationError> {
    let mut hours: [f64; 24] = schedule
        .try_into()
        .map_err(|_| ValidationError::ScheduleLength { len: schedule.len() })?;
    for (hour, value) in hours.iter_mut().enumerate() {
        if value.is_nan() {
            return Err(ValidationError::OutOfRange {
                parameter: format!("schedule[{hour}]"),
                value: *value,
                min: 0.0,
                max: 1.0,
            });
        }
        *value = value.clamp(0.0, 1.0);
    }
    Ok(hours)
}

/// Optional inputs of [`TrafficParameters::new`]; `None` selects the default.
#[derive(Debug, Clone, Default)]
pub struct TrafficOptions {
    /// Latent anthropogenic heat in W/m², default 0.
    pub latent_heat: Option<f64>,
    pub weekday_schedule: Option<Vec<f64>>,
    pub saturday_schedule: Option<Vec<f64>>,
    pub sunday_schedule: Option<Vec<f64>>,
}

/// Anthropogenic heat from street traffic and its weekly profile.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "TrafficRecord")
)]
pub struct TrafficParameters {
    sensible_heat: f64,
    latent_heat: f64,
    weekday_schedule: [f64; 24],
    saturday_schedule: [f64; 24],
    sunday_schedule: [f64; 24],
}

impl TrafficParameters {
    /// Validates and stores traffic heat inputs.
    ///
    /// Heat fluxes are in W/m² of urban area and must be finite and not
    /// negative. Schedules are clamped into `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for a bad heat value or a schedule that
    /// is not 24 hourly values.
    pub fn new(sensible_heat: f64, options: TrafficOptions) -> Result<Self, ValidationError> {
        let schedule = |given: Option<Vec<f64>>, default: [f64; 24]| {
            given.map_or(Ok(default), |values| check_schedule(&values))
        };
        Ok(Self {
            sensible_heat: non_negative(sensible_heat, "sensible_heat")?,
            latent_heat: non_negative(options.latent_heat.unwrap_or(0.0), "latent_heat")?,
            weekday_schedule: schedule(options.weekday_schedule, DEFAULT_WEEKDAY_SCHEDULE)?,
            saturday_schedule: schedule(options.saturday_schedule, DEFAULT_SATURDAY_SCHEDULE)?,
            sunday_schedule: schedule(options.sunday_schedule, DEFAULT_SUNDAY_SCHEDULE)?,
        })
    }

    #[must_use]
    pub fn sensible_heat(&self) -> f64 {
        self.sensible_heat
    }

    #[must_use]
    pub fn latent_heat(&self) -> f64 {
        self.latent_heat
    }

    #[must_use]
    pub fn weekday_schedule(&self) -> &[f64; 24] {
        &self.weekday_schedule
    }

    #[must_use]
    pub fn saturday_schedule(&self) -> &[f64; 24] {
        &self.saturday_schedule
    }

    #[must_use]
    pub fn sunday_schedule(&self) -> &[f64; 24] {
        &self.sunday_schedule
    }
}

/// Serialized form of [`TrafficParameters`], checked again on the way in.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct TrafficRecord {
    sensible_heat: f64,
    latent_heat: Option<f64>,
    weekday_schedule: Option<Vec<f64>>,
    saturday_schedule: Option<Vec<f64>>,
    sunday_schedule: Option<Vec<f64>>,
}

#[cfg(feature = "serde")]
impl TryFrom<TrafficRecord> for TrafficParameters {
    type Error = ValidationError;

    fn try_from(record: TrafficRecord) -> Result<Self, Self::Error> {
        Self::new(
            record.sensible_heat,
            TrafficOptions {
                latent_heat: record.latent_heat,
                weekday_schedule: record.weekday_schedule,
                saturday_schedule: record.saturday_schedule,
                sunday_schedule: record.sunday_schedule,
            },
        )
    }
}

impl fmt::Display for TrafficParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Traffic Parameters: \nSensible Heat: {}\nLatent Heat: {}\n{RECORD_RULE}",
            self.sensible_heat, self.latent_heat
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_fill_missing_inputs() {
        let traffic = TrafficParameters::new(8.0, TrafficOptions::default()).unwrap();
        assert!((traffic.latent_heat()).abs() < f64::EPSILON);
        assert_eq!(traffic.weekday_schedule(), &DEFAULT_WEEKDAY_SCHEDULE);
        assert_eq!(traffic.saturday_schedule(), &DEFAULT_SATURDAY_SCHEDULE);
        assert_eq!(traffic.sunday_schedule(), &DEFAULT_SUNDAY_SCHEDULE);
    }

    #[test]
    fn schedule_values_are_clamped() {
        let mut raw = vec![0.5; 24];
        raw[3] = 1.5;
        raw[7] = -0.2;
        let hours = check_schedule(&raw).unwrap();
        assert!((hours[3] - 1.0).abs() < f64::EPSILON);
        assert!(hours[7].abs() < f64::EPSILON);
        assert!((hours[0] - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn schedule_length_is_enforced() {
        assert_eq!(
            check_schedule(&[0.5; 23]).unwrap_err(),
            ValidationError::ScheduleLength { len: 23 }
        );
        let options = TrafficOptions {
            sunday_schedule: Some(vec![0.1; 25]),
            ..TrafficOptions::default()
        };
        assert!(TrafficParameters::new(8.0, options).is_err());
    }

    #[test]
    fn nan_schedule_entry_is_rejected() {
        let mut raw = [0.3; 24];
        raw[10] = f64::NAN;
        assert!(matches!(
            check_schedule(&raw),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn negative_heat_is_rejected() {
        assert!(TrafficParameters::new(-1.0, TrafficOptions::default()).is_err());
        let options = TrafficOptions {
            latent_heat: Some(f64::NAN),
            ..TrafficOptions::default()
        };
        assert!(TrafficParameters::new(4.0, options).is_err());
    }

    #[test]
    fn text_form() {
        let options = TrafficOptions {
            latent_heat: Some(2.5),
            ..TrafficOptions::default()
        };
        let traffic = TrafficParameters::new(8.0, options).unwrap();
        assert_eq!(
            traffic.to_string(),
            "Traffic Parameters: \nSensible Heat: 8\nLatent Heat: 2.5\n-------------------------------------"
        );
    }
}
