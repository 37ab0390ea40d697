//! Pose-error metric identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Pose-error function evaluated by the external error stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorType {
    /// Maximum Symmetry-aware Surface Distance
    Mssd,
    /// Maximum Symmetry-aware Projection Distance
    Mspd,
    /// Visible Surface Discrepancy
    Vsd,
    /// Average Distance of model points (symmetric or not, by model)
    Ad,
    /// Average Distance of model points
    Add,
    /// Average Distance of model points, indistinguishable views
    Adi,
    /// Complement over Union of projected masks
    Cus,
    /// Rotation and translation error pair
    Rete,
    /// Rotation error
    Re,
    /// Translation error
    Te,
    /// Projection distance
    Proj,
}

impl ErrorType {
    /// Error types averaged into the combined BOP24 mAP.
    pub const COMBINED: [ErrorType; 2] = [ErrorType::Mssd, ErrorType::Mspd];

    /// Lowercase identifier used in signatures, CLI flags and score keys.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorType::Mssd => "mssd",
            ErrorType::Mspd => "mspd",
            ErrorType::Vsd => "vsd",
            ErrorType::Ad => "ad",
            ErrorType::Add => "add",
            ErrorType::Adi => "adi",
            ErrorType::Cus => "cus",
            ErrorType::Rete => "rete",
            ErrorType::Re => "re",
            ErrorType::Te => "te",
            ErrorType::Proj => "proj",
        }
    }

    /// Whether a GPU error script exists for this metric.
    pub fn has_gpu_implementation(self) -> bool {
        matches!(self, ErrorType::Mssd | ErrorType::Mspd)
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mssd" => Ok(ErrorType::Mssd),
            "mspd" => Ok(ErrorType::Mspd),
            "vsd" => Ok(ErrorType::Vsd),
            "ad" => Ok(ErrorType::Ad),
            "add" => Ok(ErrorType::Add),
            "adi" => Ok(ErrorType::Adi),
            "cus" => Ok(ErrorType::Cus),
            "rete" => Ok(ErrorType::Rete),
            "re" => Ok(ErrorType::Re),
            "te" => Ok(ErrorType::Te),
            "proj" => Ok(ErrorType::Proj),
            other => Err(format!("unknown error type '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display_agree() {
        for name in ["mssd", "mspd", "vsd", "adi", "proj"] {
            let parsed: ErrorType = name.parse().unwrap();
            assert_eq!(parsed.to_string(), name);
        }
        assert!("iou".parse::<ErrorType>().is_err());
    }

    #[test]
    fn test_gpu_support() {
        assert!(ErrorType::Mssd.has_gpu_implementation());
        assert!(ErrorType::Mspd.has_gpu_implementation());
        assert!(!ErrorType::Vsd.has_gpu_implementation());
    }
}
