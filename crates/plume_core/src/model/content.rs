//! Content domain model.
//!
//! # Responsibility
//! - Define the publishable item owned by exactly one account.
//! - Derive visibility from the owner's state and the publish flag.
//!
//! # Invariants
//! - `owner_uuid` is set at creation and never reassigned by core APIs.
//! - New content starts unpublished and unimportant.

use crate::model::account::{Account, AccountId};
use crate::model::validation::{ValidationErrors, IDENTIFIER_FIELD, OWNER_FIELD};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a content item.
pub type ContentId = Uuid;

/// Publishable item with visibility and importance flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ContentWire")]
pub struct Content {
    pub uuid: ContentId,
    pub owner_uuid: AccountId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_published: bool,
    pub is_important: bool,
}

#[derive(Deserialize)]
struct ContentWire {
    uuid: ContentId,
    owner_uuid: AccountId,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    is_published: bool,
    #[serde(default)]
    is_important: bool,
}

impl TryFrom<ContentWire> for Content {
    type Error = ValidationErrors;

    fn try_from(value: ContentWire) -> Result<Self, Self::Error> {
        let content = Self {
            uuid: value.uuid,
            owner_uuid: value.owner_uuid,
            title: value.title,
            description: value.description,
            is_published: value.is_published,
            is_important: value.is_important,
        };
        content.validate()?;
        Ok(content)
    }
}

impl Content {
    /// Creates default-valued content owned by `owner_uuid`.
    pub fn new(owner_uuid: AccountId) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            owner_uuid,
            title: None,
            description: None,
            is_published: false,
            is_important: false,
        }
    }

    /// Whether accounts other than the owner may see this item.
    ///
    /// `owner` must be the account referenced by `owner_uuid`; passing any
    /// other account yields `false`.
    pub fn is_visible_with_owner(&self, owner: &Account) -> bool {
        owner.uuid == self.owner_uuid && owner.is_enabled && self.is_published
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.uuid.is_nil() {
            errors.add(IDENTIFIER_FIELD, "must not be nil");
        }
        if self.owner_uuid.is_nil() {
            errors.add(OWNER_FIELD, "must reference an account");
        }
        errors.into_result()
    }
}
