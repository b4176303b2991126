//! Diesel table definitions mirroring `migrations/`.

diesel::table! {
    /// Registered accounts.
    ///
    /// `username` and `email` carry unique constraints named
    /// `users_username_key` and `users_email_key`.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Trimmed login handle.
        username -> Varchar,
        /// Lower-cased email address.
        email -> Varchar,
        /// Argon2 PHC string.
        password_hash -> Text,
        /// Account creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Tasks, each owned by exactly one user.
    tasks (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning user; cascades on account deletion.
        user_id -> Uuid,
        /// Task title (max 200 characters).
        title -> Varchar,
        /// Task description (max 1000 characters).
        description -> Varchar,
        /// Completion flag.
        completed -> Bool,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(tasks -> users (user_id));
diesel::allow_tables_to_appear_in_same_query!(tasks, users);
