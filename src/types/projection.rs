use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Map projection family a view is shown in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Projection {
    World,
    Arctic,
    Antarctic,
    SouthGeorgia,
}

impl Projection {
    pub const ALL: [Projection; 4] = [
        Projection::World,
        Projection::Arctic,
        Projection::Antarctic,
        Projection::SouthGeorgia,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Projection::World => "world",
            Projection::Arctic => "arctic",
            Projection::Antarctic => "antarctic",
            Projection::SouthGeorgia => "south_georgia",
        }
    }

    /// Whether this is one of the pole-centered azimuthal projections
    pub fn is_polar(&self) -> bool {
        matches!(self, Projection::Arctic | Projection::Antarctic)
    }
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Projection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Projection::ALL
            .into_iter()
            .find(|projection| projection.as_str() == s)
            .ok_or_else(|| Error::UnknownProjection(s.to_string()))
    }
}
