//! Recipe entity and draft validation.
//!
//! Recipes are created through [`RecipeDraft`], which collects every violated
//! rule in a stable order so handlers can surface the full list in one
//! response instead of failing on the first rule.

use std::fmt;

use uuid::Uuid;

use super::user::UserId;

/// Minimum number of characters required in recipe instructions.
pub const INSTRUCTIONS_MIN_CHARS: usize = 50;

/// A single violated validation rule on a recipe draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeValidationError {
    /// Title was missing or empty.
    TitleMissing,
    /// Instructions were missing or empty.
    InstructionsMissing,
    /// Instructions were present but shorter than the minimum.
    InstructionsTooShort,
}

impl fmt::Display for RecipeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TitleMissing => write!(f, "The title must be present"),
            Self::InstructionsMissing => write!(f, "Instructions must be present!"),
            Self::InstructionsTooShort => {
                write!(f, "Instructions should be atleast 50 characters long.")
            }
        }
    }
}

impl std::error::Error for RecipeValidationError {}

/// Stable recipe identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RecipeId(Uuid);

impl RecipeId {
    /// Generate a new random [`RecipeId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap a UUID read back from persistence.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unvalidated recipe fields as read from an inbound request.
///
/// Absent fields stay `None` so presence and length rules report separately.
#[derive(Debug, Clone, Default)]
pub struct RecipeDraft {
    /// Recipe title, required.
    pub title: Option<String>,
    /// Preparation instructions, required with a minimum length.
    pub instructions: Option<String>,
    /// Optional preparation time in minutes.
    pub minutes_to_complete: Option<i32>,
}

impl RecipeDraft {
    /// Check every rule and return the violations in declaration order.
    ///
    /// An empty list means the draft is valid. Instructions shorter than the
    /// minimum report the length rule; empty instructions report presence
    /// and length, matching per-rule evaluation.
    #[must_use]
    pub fn violations(&self) -> Vec<RecipeValidationError> {
        let mut violations = Vec::new();

        if self.title.as_deref().is_none_or(str::is_empty) {
            violations.push(RecipeValidationError::TitleMissing);
        }

        let instructions = self.instructions.as_deref().unwrap_or("");
        if instructions.is_empty() {
            violations.push(RecipeValidationError::InstructionsMissing);
        }
        // Length counts Unicode scalar values, not bytes.
        if instructions.chars().count() < INSTRUCTIONS_MIN_CHARS {
            violations.push(RecipeValidationError::InstructionsTooShort);
        }

        violations
    }
}

/// A validated recipe owned by a user.
///
/// ## Invariants
/// - `title` is non-empty.
/// - `instructions` holds at least [`INSTRUCTIONS_MIN_CHARS`] characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    id: RecipeId,
    title: String,
    instructions: String,
    minutes_to_complete: Option<i32>,
    owner: UserId,
}

impl Recipe {
    /// Validate a draft and bind it to its owner.
    ///
    /// Returns every violated rule when validation fails; nothing is
    /// persisted by this constructor.
    pub fn from_draft(
        id: RecipeId,
        draft: RecipeDraft,
        owner: UserId,
    ) -> Result<Self, Vec<RecipeValidationError>> {
        let violations = draft.violations();
        if !violations.is_empty() {
            return Err(violations);
        }

        let RecipeDraft {
            title,
            instructions,
            minutes_to_complete,
        } = draft;

        Ok(Self {
            id,
            title: title.unwrap_or_default(),
            instructions: instructions.unwrap_or_default(),
            minutes_to_complete,
            owner,
        })
    }

    /// Rehydrate a recipe previously validated and persisted.
    #[must_use]
    pub fn from_parts(
        id: RecipeId,
        title: String,
        instructions: String,
        minutes_to_complete: Option<i32>,
        owner: UserId,
    ) -> Self {
        Self {
            id,
            title,
            instructions,
            minutes_to_complete,
            owner,
        }
    }

    /// Stable recipe identifier.
    #[must_use]
    pub fn id(&self) -> RecipeId {
        self.id
    }

    /// Recipe title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Preparation instructions.
    #[must_use]
    pub fn instructions(&self) -> &str {
        self.instructions.as_str()
    }

    /// Optional preparation time in minutes.
    #[must_use]
    pub fn minutes_to_complete(&self) -> Option<i32> {
        self.minutes_to_complete
    }

    /// Owning user identifier.
    #[must_use]
    pub fn owner(&self) -> &UserId {
        &self.owner
    }
}
