//! Account domain model.
//!
//! # Responsibility
//! - Define the identity/privilege record that owns content.
//! - Expose the privilege predicate used for moderation decisions.
//!
//! # Invariants
//! - `uuid` is assigned at creation and never nil.
//! - `display_name` never equals the reserved name once persisted.

use crate::model::validation::{validate_display_name, ValidationErrors, IDENTIFIER_FIELD};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of an account.
pub type AccountId = Uuid;

/// Identity and privilege flags for one user of the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AccountWire")]
pub struct Account {
    pub uuid: AccountId,
    pub display_name: String,
    pub is_privileged: bool,
    pub is_enabled: bool,
}

#[derive(Deserialize)]
struct AccountWire {
    uuid: AccountId,
    display_name: String,
    #[serde(default)]
    is_privileged: bool,
    #[serde(default = "default_enabled")]
    is_enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl TryFrom<AccountWire> for Account {
    type Error = ValidationErrors;

    fn try_from(value: AccountWire) -> Result<Self, Self::Error> {
        let account = Self {
            uuid: value.uuid,
            display_name: value.display_name,
            is_privileged: value.is_privileged,
            is_enabled: value.is_enabled,
        };
        account.validate()?;
        Ok(account)
    }
}

impl Account {
    /// Creates an unprivileged, enabled account with a fresh ID.
    ///
    /// Does not validate; call [`Account::validate`] before persisting.
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            display_name: display_name.into(),
            is_privileged: false,
            is_enabled: true,
        }
    }

    /// Whether this account may remove content owned by other accounts.
    pub fn can_delete_others_content(&self) -> bool {
        self.is_privileged
    }

    /// Runs every account rule and returns all failures at once.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.uuid.is_nil() {
            errors.add(IDENTIFIER_FIELD, "must not be nil");
        }
        errors.merge(validate_display_name(&self.display_name));
        errors.into_result()
    }
}
