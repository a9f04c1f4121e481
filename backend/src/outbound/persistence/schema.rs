//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations exactly; Diesel uses them for
//! compile-time query validation. Regenerate with `diesel print-schema` when
//! the migrations change.

diesel::table! {
    /// Registered user accounts.
    ///
    /// `username` carries a unique index; uniqueness violations surface as
    /// duplicate-username errors in the user repository.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique login name.
        username -> Varchar,
        /// PHC-formatted password digest.
        password_digest -> Varchar,
        /// Optional profile image URL.
        image_url -> Nullable<Varchar>,
        /// Optional short biography.
        bio -> Nullable<Text>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Recipes owned by users.
    recipes (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Foreign key to the owning user.
        user_id -> Uuid,
        /// Recipe title.
        title -> Varchar,
        /// Preparation instructions.
        instructions -> Text,
        /// Optional preparation time in minutes.
        minutes_to_complete -> Nullable<Int4>,
        /// Record creation timestamp; listing order follows it ascending.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(recipes -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(recipes, users);
