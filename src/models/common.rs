//! Types shared by every virtual WAN resource model.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Resource tags, kept ordered so output is stable.
pub type Tags = BTreeMap<String, String>;

/// Unmodelled JSON members of an ARM object.
pub type Extra = serde_json::Map<String, serde_json::Value>;

/// Provisioning states after which a long-running operation stops changing.
pub const TERMINAL_STATES: [&str; 3] = ["Succeeded", "Failed", "Canceled"];

/// Reference to another ARM resource by id.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct SubResource {
    pub id: String,
}

impl SubResource {
    pub fn new(id: impl Into<String>) -> SubResource {
        SubResource { id: id.into() }
    }

    /// `Some` reference only for a non-empty id.
    pub fn from_id(id: Option<&str>) -> Option<SubResource> {
        id.filter(|id| !id.is_empty()).map(SubResource::new)
    }
}

/// Anything carrying an ARM `name`.
pub trait Named {
    fn name(&self) -> Option<&str>;
}

/// Anything reporting an ARM `provisioningState`.
pub trait Provisioned {
    fn provisioning_state(&self) -> Option<&str>;

    fn is_terminal(&self) -> bool {
        match self.provisioning_state() {
            None => true,
            Some(state) => TERMINAL_STATES
                .iter()
                .any(|t| t.eq_ignore_ascii_case(state)),
        }
    }
}

/// Implements [`Named`] and [`Provisioned`] for an ARM envelope whose
/// `properties` carry a `provisioning_state`.
macro_rules! arm_resource {
    ($ty:ty) => {
        impl $crate::models::Named for $ty {
            fn name(&self) -> Option<&str> {
                self.name.as_deref()
            }
        }

        impl $crate::models::Provisioned for $ty {
            fn provisioning_state(&self) -> Option<&str> {
                self.properties
                    .as_ref()
                    .and_then(|p| p.provisioning_state.as_deref())
            }
        }
    };
}
pub(crate) use arm_resource;

/// One page of an ARM list call.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_link: Option<String>,
}
