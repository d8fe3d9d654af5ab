//! Declarative transform configuration.
//!
//! A [`TransformConfig`] describes any transform, including chains and
//! dynamic quantities, and can be read from JSON:
//!
//! ```
//! use xo_bijectors::config::TransformConfig;
//! use xo_bijectors::transforms::Transform;
//!
//! let cfg = TransformConfig::from_json(
//!     r#"{"kind": "radius_impact", "min_radius": 0.0, "max_radius": 0.2}"#,
//! ).unwrap();
//! assert_eq!(cfg.build().unwrap().name(), "radiusimpact");
//! ```

use serde::{Deserialize, Serialize};
use xo_core::{Quantity, Result};

use crate::transforms::{
    AbsoluteValue, Angle, AnyTransform, Chain, DEFAULT_REGULARIZATION, ImpactParameter, Interval,
    LogOdds, Periodic, QuadLimbDark, RadiusImpact, UnitDisk, UnitVector,
};

fn default_regularization() -> Option<f64> {
    Some(DEFAULT_REGULARIZATION)
}

/// Serializable description of a transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransformConfig {
    /// [`AbsoluteValue`]
    AbsoluteValue,
    /// [`UnitVector`]
    UnitVector,
    /// The bare [`UnitDisk`] stage (expects `(-1, 1)^2` input).
    UnitDisk,
    /// The unit-disk chain `[UnitDisk, Interval(-1, 1)]`.
    UnitDiskChain,
    /// [`Interval`]
    Interval {
        /// Lower bound.
        lower: f64,
        /// Upper bound.
        upper: f64,
    },
    /// [`LogOdds`]
    LogOdds,
    /// [`Angle`]
    Angle {
        /// Regularization amplitude; `null` disables it.
        #[serde(default = "default_regularization")]
        regularization: Option<f64>,
    },
    /// [`Periodic`]
    Periodic {
        /// Lower bound of the range.
        lower: f64,
        /// Upper bound of the range.
        upper: f64,
        /// Regularization amplitude; `null` disables it.
        #[serde(default = "default_regularization")]
        regularization: Option<f64>,
    },
    /// [`QuadLimbDark`]
    QuadLimbDark,
    /// [`RadiusImpact`]
    RadiusImpact {
        /// Lower radius bound (number or variable name).
        min_radius: Quantity,
        /// Upper radius bound (number or variable name).
        max_radius: Quantity,
    },
    /// [`ImpactParameter`]
    ImpactParameter {
        /// Radius ratio (number or variable name).
        ror: Quantity,
    },
    /// [`Chain`], head first.
    Chain {
        /// Member transforms.
        transforms: Vec<TransformConfig>,
    },
}

impl TransformConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Validate and construct the transform.
    pub fn build(&self) -> Result<AnyTransform> {
        let t = match self {
            Self::AbsoluteValue => AbsoluteValue.into(),
            Self::UnitVector => UnitVector.into(),
            Self::UnitDisk => UnitDisk.into(),
            Self::UnitDiskChain => crate::transforms::unit_disk()?,
            Self::Interval { lower, upper } => Interval::new(*lower, *upper)?.into(),
            Self::LogOdds => LogOdds.into(),
            Self::Angle { regularization } => Angle::with_regularization(*regularization)?.into(),
            Self::Periodic { lower, upper, regularization } => {
                Periodic::new(*lower, *upper)?.with_regularization(*regularization)?.into()
            }
            Self::QuadLimbDark => QuadLimbDark.into(),
            Self::RadiusImpact { min_radius, max_radius } => {
                RadiusImpact::new(min_radius.clone(), max_radius.clone())?.into()
            }
            Self::ImpactParameter { ror } => ImpactParameter::new(ror.clone()).into(),
            Self::Chain { transforms } => {
                let members = transforms.iter().map(|c| c.build()).collect::<Result<Vec<_>>>()?;
                Chain::new(members)?.into()
            }
        };
        Ok(t)
    }
}
