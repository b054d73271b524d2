// Mirrors raw_sql::CREATE_RECIPES_TABLE.

diesel::table! {
    recipes (id) {
        id -> Int4,
        #[max_length = 100]
        category -> Varchar,
        #[max_length = 500]
        ingredient -> Varchar,
        #[max_length = 100]
        action -> Varchar,
        steps -> Text,
        created_at -> Timestamptz,
    }
}
