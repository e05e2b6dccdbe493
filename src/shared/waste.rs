use serde::{Deserialize, Serialize};
use sqlx::Type;
use utoipa::ToSchema;

/// Waste category shared by pickups and litter reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "waste_type")]
pub enum WasteType {
    #[serde(rename = "E-Waste")]
    #[sqlx(rename = "E-Waste")]
    EWaste,
    Plastic,
    Paper,
    Metal,
    Glass,
    Organic,
    Other,
}

impl WasteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WasteType::EWaste => "E-Waste",
            WasteType::Plastic => "Plastic",
            WasteType::Paper => "Paper",
            WasteType::Metal => "Metal",
            WasteType::Glass => "Glass",
            WasteType::Organic => "Organic",
            WasteType::Other => "Other",
        }
    }
}

impl std::fmt::Display for WasteType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waste_type_wire_names() {
        assert_eq!(
            serde_json::to_string(&WasteType::EWaste).unwrap(),
            "\"E-Waste\""
        );
        let parsed: WasteType = serde_json::from_str("\"Organic\"").unwrap();
        assert_eq!(parsed, WasteType::Organic);
        assert!(serde_json::from_str::<WasteType>("\"ewaste\"").is_err());
    }
}
