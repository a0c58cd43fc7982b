//! Diesel table definitions for the board schema.
//!
//! Must match `sql/schema.sql`; there is no migration runner.

diesel::table! {
    /// Registered accounts. `username` and `email` carry unique indexes.
    users (id) {
        /// Primary key (`BIGSERIAL`).
        id -> Int8,
        /// Unique handle, copied onto posts as their author.
        username -> Varchar,
        /// Unique login address.
        email -> Varchar,
        /// bcrypt hash of the password.
        password -> Varchar,
        /// Registration timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Board posts. `author` is a plain username string, not a foreign key.
    posts (id) {
        /// Primary key (`BIGSERIAL`).
        id -> Int8,
        /// Post title.
        title -> Varchar,
        /// Post body.
        content -> Text,
        /// Creator's username at creation time.
        author -> Varchar,
        /// Creation timestamp, defaulted by the database.
        created_at -> Timestamptz,
    }
}
