use serde::{Deserialize, Serialize};

/// Measurement unit for a line item, matching the backend's unit enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnitType {
    Unit,
    Piece,
    Meter,
    Kilo,
    Liter,
    Hour,
    Kwh,
}

impl Default for UnitType {
    fn default() -> Self {
        UnitType::Unit
    }
}

impl std::fmt::Display for UnitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnitType::Unit => write!(f, "UNIT"),
            UnitType::Piece => write!(f, "PIECE"),
            UnitType::Meter => write!(f, "METER"),
            UnitType::Kilo => write!(f, "KILO"),
            UnitType::Liter => write!(f, "LITER"),
            UnitType::Hour => write!(f, "HOUR"),
            UnitType::Kwh => write!(f, "KWH"),
        }
    }
}

impl std::str::FromStr for UnitType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "UNIT" => Ok(UnitType::Unit),
            "PIECE" => Ok(UnitType::Piece),
            "METER" => Ok(UnitType::Meter),
            "KILO" => Ok(UnitType::Kilo),
            "LITER" => Ok(UnitType::Liter),
            "HOUR" => Ok(UnitType::Hour),
            "KWH" => Ok(UnitType::Kwh),
            _ => Err(format!("Invalid unit type: {}", s)),
        }
    }
}
