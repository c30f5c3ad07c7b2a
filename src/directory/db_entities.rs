//! SeaORM entity models used by the database directory backend.
//!
//! These structs map to the SQLite table created by `database_directory`:
//! - `users` — one row per locally authenticated user

/// Users table entity model.
pub mod users {
    use sea_orm::entity::prelude::*;
    use sea_orm::FromQueryResult;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "users")]
    pub struct Model {
        /// Auto-increment row id
        #[sea_orm(primary_key)]
        pub id: i32,
        /// Login name, unique
        #[sea_orm(unique)]
        pub username: String,
        /// Display name
        pub nickname: String,
        pub email: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}

    /// Projection read back by directory lookups.
    #[derive(Clone, Debug, PartialEq, Eq, FromQueryResult)]
    pub struct ExtraInfoRow {
        pub username: String,
        pub nickname: String,
        pub email: String,
    }
}
