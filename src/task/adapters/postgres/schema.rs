//! Diesel schema for task persistence.

diesel::table! {
    /// Task categories with unique names.
    categories (id) {
        /// Category identifier.
        id -> Uuid,
        /// Unique category name.
        #[max_length = 100]
        name -> Varchar,
    }
}

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Free-text description.
        description -> Text,
        /// Optional due date.
        due_date -> Nullable<Date>,
        /// Priority storage string.
        #[max_length = 20]
        priority -> Varchar,
        /// Status storage string.
        #[max_length = 20]
        status -> Varchar,
        /// Optional category reference (SET NULL on category delete).
        category_id -> Nullable<Uuid>,
        /// Optional creator reference (SET NULL on account delete).
        created_by -> Nullable<Uuid>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Assignment rows linking tasks to users.
    task_assignments (task_id, user_id) {
        /// Assigned task.
        task_id -> Uuid,
        /// Assigned user.
        user_id -> Uuid,
    }
}

diesel::table! {
    /// File attachments owned by tasks.
    attachments (id) {
        /// Attachment identifier.
        id -> Uuid,
        /// Owning task.
        task_id -> Uuid,
        /// Blob store URL.
        url -> Varchar,
        /// Upload timestamp.
        uploaded_at -> Timestamptz,
    }
}

diesel::joinable!(tasks -> categories (category_id));
diesel::joinable!(task_assignments -> tasks (task_id));
diesel::joinable!(attachments -> tasks (task_id));
diesel::allow_tables_to_appear_in_same_query!(categories, tasks, task_assignments, attachments);
