//! Macros for reducing boilerplate when defining entities

/// Implement [`Entity`](crate::core::entity::Entity) for a record struct
///
/// The struct must have an `id: u64` field and a `DateTime<Utc>` creation
/// field, named in the `created_at:` argument. Unique fields are listed as
/// `"field" => expression` pairs evaluated against the record.
///
/// # Example
/// ```rust,ignore
/// impl_entity!(Book, "book", created_at: created_at, unique(book) {
///     "isbn13" => book.isbn13.clone(),
/// });
/// ```
#[macro_export]
macro_rules! impl_entity {
    ($type:ident, $singular:literal, created_at: $created:ident) => {
        $crate::impl_entity!($type, $singular, created_at: $created, unique(_record) {});
    };
    (
        $type:ident, $singular:literal, created_at: $created:ident,
        unique($record:ident) { $($field:literal => $value:expr),* $(,)? }
    ) => {
        impl $crate::core::entity::Entity for $type {
            fn resource_name_singular() -> &'static str {
                $singular
            }

            fn id(&self) -> u64 {
                self.id
            }

            fn assign_id(&mut self, id: u64) {
                self.id = id;
            }

            fn created_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.$created
            }

            #[allow(unused_variables)]
            fn unique_keys(&self) -> Vec<(&'static str, Option<String>)> {
                let $record = self;
                vec![$(($field, $value)),*]
            }
        }
    };
}
