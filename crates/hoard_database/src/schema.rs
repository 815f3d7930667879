//! Diesel schema definitions.

diesel::table! {
    items (hash_full) {
        hash_full -> Text,
        code -> Text,
        kind -> Text,
        size_b -> BigInt,
        uid -> BigInt,
        perm -> Text,
        upload_at -> BigInt,
        origin_at -> Nullable<BigInt>,
    }
}

diesel::table! {
    text_items (hash_full) {
        hash_full -> Text,
        format -> Text,
    }
}

diesel::table! {
    pic_items (hash_full) {
        hash_full -> Text,
        format -> Text,
        width -> BigInt,
        height -> BigInt,
    }
}

diesel::table! {
    link_items (hash_full) {
        hash_full -> Text,
        url -> Text,
    }
}

diesel::joinable!(text_items -> items (hash_full));
diesel::joinable!(pic_items -> items (hash_full));
diesel::joinable!(link_items -> items (hash_full));

diesel::allow_tables_to_appear_in_same_query!(items, text_items, pic_items, link_items);
