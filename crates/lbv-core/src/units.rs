// lbv-core/src/units.rs

use core::fmt;
use core::str::FromStr;

use uom::si::f64::{
    Pressure as UomPressure, ThermodynamicTemperature as UomThermodynamicTemperature,
    Velocity as UomVelocity,
};

use crate::LbvError;

// Public canonical unit types (SI, f64)
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;
pub type Velocity = UomVelocity;

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn bar(v: f64) -> Pressure {
    use uom::si::pressure::bar;
    Pressure::new::<bar>(v)
}

#[inline]
pub fn atm(v: f64) -> Pressure {
    use uom::si::pressure::atmosphere;
    Pressure::new::<atmosphere>(v)
}

#[inline]
pub fn cm_per_s(v: f64) -> Velocity {
    use uom::si::velocity::centimeter_per_second;
    Velocity::new::<centimeter_per_second>(v)
}

/// Kelvin value of a temperature.
#[inline]
pub fn to_kelvin(t: Temperature) -> f64 {
    use uom::si::thermodynamic_temperature::kelvin;
    t.get::<kelvin>()
}

/// Bar (absolute) value of a pressure. Bar is the pressure convention of
/// every fuel descriptor and of the model's feature vector.
#[inline]
pub fn to_bar(p: Pressure) -> f64 {
    use uom::si::pressure::bar;
    p.get::<bar>()
}

/// Display unit for a predicted burning velocity.
///
/// The regressor's native output is centimeters per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpeedUnit {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "cm/s", alias = "cm_s"))]
    CentimetersPerSecond,
    #[cfg_attr(feature = "serde", serde(rename = "m/s", alias = "m_s"))]
    MetersPerSecond,
}

impl SpeedUnit {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::CentimetersPerSecond => "cm/s",
            Self::MetersPerSecond => "m/s",
        }
    }

    /// Convert a native cm/s value into this unit.
    pub fn from_cm_per_s(self, raw: f64) -> f64 {
        match self {
            Self::CentimetersPerSecond => raw,
            Self::MetersPerSecond => raw / 100.0,
        }
    }

    /// Convert a value expressed in this unit back to cm/s.
    pub fn to_cm_per_s(self, value: f64) -> f64 {
        match self {
            Self::CentimetersPerSecond => value,
            Self::MetersPerSecond => value * 100.0,
        }
    }

    /// Decimal places used when formatting a value in this unit.
    pub fn precision(self) -> usize {
        match self {
            Self::CentimetersPerSecond => 2,
            Self::MetersPerSecond => 4,
        }
    }

    pub fn format(self, value: f64) -> String {
        format!("{:.*} {}", self.precision(), value, self.symbol())
    }
}

impl fmt::Display for SpeedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for SpeedUnit {
    type Err = LbvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cm/s" | "cm_s" | "cms" => Ok(Self::CentimetersPerSecond),
            "m/s" | "m_s" | "ms" => Ok(Self::MetersPerSecond),
            _ => Err(LbvError::InvalidArg {
                what: "speed unit must be 'cm/s' or 'm/s'",
            }),
        }
    }
}
