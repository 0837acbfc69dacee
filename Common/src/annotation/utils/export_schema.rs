use std::str::FromStr;
use std::fmt::Display;
use serde::{Serialize, Deserialize};

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ExportSchema {
    Corner,
    FourCorner,
}

impl ExportSchema {
    //The corner variant exports labeled regions only, the four-corner variant exports everything.
    pub fn default_filter(&self) -> bool {
        match self {
            ExportSchema::Corner => true,
            ExportSchema::FourCorner => false,
        }
    }

    pub fn default_file_name(&self) -> &'static str {
        match self {
            ExportSchema::Corner => "ROI-coordinates.xlsx",
            ExportSchema::FourCorner => "coordinates.xlsx",
        }
    }
}

impl FromStr for ExportSchema {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "corner" => Ok(ExportSchema::Corner),
            "four-corner" => Ok(ExportSchema::FourCorner),
            _ => Err(()),
        }
    }
}

impl Display for ExportSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", match self {
            ExportSchema::Corner => "corner",
            ExportSchema::FourCorner => "four-corner",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trip() {
        for schema in [ExportSchema::Corner, ExportSchema::FourCorner] {
            assert_eq!(ExportSchema::from_str(&schema.to_string()), Ok(schema));
        }
    }

    #[test]
    fn unknown_schema_rejected() {
        assert!(ExportSchema::from_str("csv").is_err());
    }

    #[test]
    fn default_filters_per_variant() {
        assert!(ExportSchema::Corner.default_filter());
        assert!(!ExportSchema::FourCorner.default_filter());
    }

    #[test]
    fn default_file_names_per_variant() {
        assert_eq!(ExportSchema::Corner.default_file_name(), "ROI-coordinates.xlsx");
        assert_eq!(ExportSchema::FourCorner.default_file_name(), "coordinates.xlsx");
    }
}
