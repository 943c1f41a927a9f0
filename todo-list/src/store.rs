use crate::clock::{Clock, SystemClock, format_timestamp};
use crate::error::{StorageError, StoreError, ValidationError};
use crate::item::{Item, ItemId};
use crate::storage::Storage;
use tracing::{debug, info};

/// Storage key holding the JSON-encoded list.
pub const TODOS_KEY: &str = "todos";

/// Ordered to-do list persisted through a [`Storage`].
///
/// Every operation reads the whole list, changes it in memory and writes the
/// whole list back before returning. Nothing is cached between calls, so the
/// storage is always the source of truth.
pub struct ListStore<S: Storage, C: Clock = SystemClock> {
    storage: S,
    clock: C,
}

impl<S: Storage> ListStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_clock(storage, SystemClock)
    }
}

impl<S: Storage, C: Clock> ListStore<S, C> {
    pub fn with_clock(storage: S, clock: C) -> Self {
        Self { storage, clock }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Appends a new item with the trimmed `text`.
    ///
    /// # Errors
    ///
    /// [`ValidationError::EmptyText`] if `text` is empty after trimming, in
    /// which case storage is not touched.
    #[tracing::instrument(skip(self))]
    pub fn add(&mut self, text: &str) -> Result<Item, StoreError> {
        let text = trim_text(text);
        if text.is_empty() {
            return Err(ValidationError::EmptyText.into());
        }

        let mut items = self.load()?;
        let now = self.clock.now();
        let id = next_id(&items, now.timestamp_millis())?;
        let item = Item::new(id, text, format_timestamp(&now));
        items.push(item.clone());
        self.persist(&items)?;
        info!("Added item {}", item.id());
        Ok(item)
    }

    /// Flips completion of the item with `id`. Unknown ids are ignored.
    #[tracing::instrument(skip(self))]
    pub fn toggle_complete(&mut self, id: ItemId) -> Result<Option<Item>, StoreError> {
        let mut items = self.load()?;
        let Some(item) = items.iter_mut().find(|item| item.id() == id) else {
            debug!("No item with id {}, nothing to toggle", id);
            return Ok(None);
        };
        item.toggle();
        let toggled = item.clone();
        self.persist(&items)?;
        Ok(Some(toggled))
    }

    /// Removes the item with `id`. Returns whether anything was removed.
    #[tracing::instrument(skip(self))]
    pub fn delete(&mut self, id: ItemId) -> Result<bool, StoreError> {
        let mut items = self.load()?;
        let before = items.len();
        items.retain(|item| item.id() != id);
        if items.len() == before {
            debug!("No item with id {}, nothing to delete", id);
            return Ok(false);
        }
        self.persist(&items)?;
        info!("Deleted item {}", id);
        Ok(true)
    }

    /// All items in insertion order.
    #[tracing::instrument(skip(self))]
    pub fn list_all(&self) -> Result<Vec<Item>, StoreError> {
        self.load()
    }

    fn load(&self) -> Result<Vec<Item>, StoreError> {
        match self.storage.get(TODOS_KEY)? {
            Some(json) => serde_json::from_str(&json).map_err(StoreError::Corrupt),
            None => Ok(Vec::new()),
        }
    }

    fn persist(&mut self, items: &[Item]) -> Result<(), StoreError> {
        let json = serde_json::to_string(items).map_err(StorageError::from)?;
        self.storage.set(TODOS_KEY, &json)?;
        debug!("Persisted {} items", items.len());
        Ok(())
    }
}

/// Trims whitespace and byte order marks, like the page's `String.trim`.
fn trim_text(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

/// Clock-derived id that is still strictly greater than every id in `items`.
fn next_id(items: &[Item], now_millis: i64) -> Result<ItemId, StoreError> {
    let from_clock = ItemId::try_from(now_millis).unwrap_or_default();
    match items.iter().map(Item::id).max() {
        Some(last) => {
            let after_last = last.checked_add(1).ok_or(StoreError::IdsExhausted)?;
            Ok(from_clock.max(after_last))
        }
        None => Ok(from_clock),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::MockClock;
    use crate::storage::{MemoryStorage, MockStorage};
    use chrono::{FixedOffset, TimeZone};

    const NOW_MILLIS: i64 = 1_760_000_000_000;

    fn fixed_clock() -> MockClock {
        let mut clock = MockClock::new();
        clock.expect_now().returning(|| {
            FixedOffset::east_opt(0)
                .unwrap()
                .timestamp_millis_opt(NOW_MILLIS)
                .unwrap()
        });
        clock
    }

    fn store() -> ListStore<MemoryStorage, MockClock> {
        ListStore::with_clock(MemoryStorage::new(), fixed_clock())
    }

    fn texts_and_flags(items: &[Item]) -> Vec<(&str, bool)> {
        items
            .iter()
            .map(|item| (item.text(), item.is_completed()))
            .collect()
    }

    #[test]
    fn empty_store_lists_nothing() {
        assert!(store().list_all().unwrap().is_empty());
    }

    #[test]
    fn add_appends_trimmed_text_at_the_end() {
        // Arrange
        let mut store = store();
        store.add("first").unwrap();

        // Act
        store.add("  second \n").unwrap();

        // Assert
        let items = store.list_all().unwrap();
        let last = items.last().unwrap();
        assert_eq!(last.text(), "second");
        assert!(!last.is_completed());
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn add_records_clock_time() {
        let mut store = store();

        let item = store.add("buy milk").unwrap();

        assert_eq!(item.id(), NOW_MILLIS as u64);
        assert_eq!(item.created_at(), "10/9/2025, 8:53:20 AM");
    }

    #[test]
    fn add_rejects_empty_and_whitespace_text() {
        let mut store = store();
        store.add("keep me").unwrap();
        let before = store.list_all().unwrap();

        for text in ["", "   ", "\t\n"] {
            let result = store.add(text);
            assert!(
                matches!(result, Err(StoreError::Validation(ValidationError::EmptyText))),
                "expected validation failure for {:?}",
                text
            );
        }

        assert_eq!(store.list_all().unwrap(), before);
    }

    #[test]
    fn add_rejection_never_touches_storage() {
        let mut storage = MockStorage::new();
        storage.expect_get().never();
        storage.expect_set().never();
        let mut store = ListStore::with_clock(storage, fixed_clock());

        let result = store.add("   ");

        assert!(result.is_err());
    }

    #[test]
    fn ids_stay_unique_within_one_clock_tick() {
        // Arrange
        let mut store = store();

        // Act
        let first = store.add("one").unwrap();
        let second = store.add("two").unwrap();
        let third = store.add("three").unwrap();

        // Assert
        assert_eq!(first.id(), NOW_MILLIS as u64);
        assert_eq!(second.id(), first.id() + 1);
        assert_eq!(third.id(), second.id() + 1);
    }

    #[test]
    fn ids_do_not_go_backwards_when_clock_does() {
        let mut storage = MemoryStorage::new();
        let existing = Item::new(NOW_MILLIS as u64 + 5_000, "from the future", "");
        storage
            .set(TODOS_KEY, &serde_json::to_string(&[existing]).unwrap())
            .unwrap();
        let mut store = ListStore::with_clock(storage, fixed_clock());

        let item = store.add("now").unwrap();

        assert_eq!(item.id(), NOW_MILLIS as u64 + 5_001);
    }

    #[test]
    fn toggle_flips_only_the_matching_item() {
        // Arrange
        let mut store = store();
        let a = store.add("a").unwrap();
        let b = store.add("b").unwrap();
        let c = store.add("c").unwrap();

        // Act
        let toggled = store.toggle_complete(b.id()).unwrap();

        // Assert
        assert!(toggled.unwrap().is_completed());
        let items = store.list_all().unwrap();
        assert_eq!(
            texts_and_flags(&items),
            vec![("a", false), ("b", true), ("c", false)]
        );
        assert_eq!(items[0].id(), a.id());
        assert_eq!(items[2].id(), c.id());
    }

    #[test]
    fn toggle_twice_restores_original_state() {
        let mut store = store();
        let item = store.add("a").unwrap();
        let before = store.list_all().unwrap();

        store.toggle_complete(item.id()).unwrap();
        store.toggle_complete(item.id()).unwrap();

        assert_eq!(store.list_all().unwrap(), before);
    }

    #[test]
    fn toggle_unknown_id_does_not_write() {
        let mut storage = MockStorage::new();
        storage
            .expect_get()
            .withf(|key| key == TODOS_KEY)
            .times(1)
            .returning(|_| Ok(Some("[]".to_string())));
        storage.expect_set().never();
        let mut store = ListStore::with_clock(storage, fixed_clock());

        let result = store.toggle_complete(42).unwrap();

        assert_eq!(result, None);
    }

    #[test]
    fn delete_removes_item_and_keeps_order() {
        // Arrange
        let mut store = store();
        store.add("a").unwrap();
        let b = store.add("b").unwrap();
        store.add("c").unwrap();

        // Act
        let removed = store.delete(b.id()).unwrap();

        // Assert
        assert!(removed);
        let items = store.list_all().unwrap();
        assert_eq!(texts_and_flags(&items), vec![("a", false), ("c", false)]);
    }

    #[test]
    fn delete_unknown_id_is_a_no_op() {
        let mut store = store();
        store.add("a").unwrap();
        let before = store.list_all().unwrap();

        let removed = store.delete(7).unwrap();

        assert!(!removed);
        assert_eq!(store.list_all().unwrap(), before);
    }

    #[test]
    fn persists_whole_list_as_json_array() {
        // Arrange
        let mut storage = MockStorage::new();
        storage.expect_get().returning(|_| Ok(None));
        storage
            .expect_set()
            .withf(|key, value| {
                let items: Vec<Item> = serde_json::from_str(value).unwrap();
                key == TODOS_KEY && items.len() == 1 && items[0].text() == "buy milk"
            })
            .times(1)
            .returning(|_, _| Ok(()));
        let mut store = ListStore::with_clock(storage, fixed_clock());

        // Act
        let result = store.add("buy milk");

        // Assert
        assert!(result.is_ok());
    }

    #[test]
    fn corrupt_list_is_reported() {
        let mut storage = MockStorage::new();
        storage
            .expect_get()
            .returning(|_| Ok(Some("{not a list".to_string())));
        let store = ListStore::with_clock(storage, fixed_clock());

        let result = store.list_all();

        assert!(matches!(result, Err(StoreError::Corrupt(_))));
    }

    #[test]
    fn storage_failure_is_propagated() {
        let mut storage = MockStorage::new();
        storage.expect_get().returning(|_| Ok(None));
        storage.expect_set().returning(|_, _| {
            Err(StorageError::Io(std::io::Error::other("quota exceeded")))
        });
        let mut store = ListStore::with_clock(storage, fixed_clock());

        let result = store.add("buy milk");

        assert!(matches!(result, Err(StoreError::Storage(StorageError::Io(_)))));
    }

    #[test]
    fn reload_yields_identical_list() {
        // Arrange
        let mut store = store();
        let first = store.add("buy milk").unwrap();
        store.add("walk dog").unwrap();
        store.toggle_complete(first.id()).unwrap();
        let before = store.list_all().unwrap();

        // Act
        let reloaded = ListStore::with_clock(store.into_storage(), fixed_clock());

        // Assert
        assert_eq!(reloaded.list_all().unwrap(), before);
    }

    #[test]
    fn next_id_clamps_pre_epoch_clock_to_zero() {
        assert_eq!(next_id(&[], -1).unwrap(), 0);
    }

    #[test]
    fn next_id_reports_exhausted_ids_instead_of_overflowing() {
        let last = Item::new(ItemId::MAX, "last", "");

        let result = next_id(&[last], NOW_MILLIS);

        assert!(matches!(result, Err(StoreError::IdsExhausted)));
    }

    #[test]
    fn add_after_maximum_id_fails_without_writing() {
        // Arrange
        let mut storage = MockStorage::new();
        storage.expect_get().returning(|_| {
            Ok(Some(
                r#"[{"id":18446744073709551615,"text":"x","timestamp":"","completed":false}]"#
                    .to_string(),
            ))
        });
        storage.expect_set().never();
        let mut store = ListStore::with_clock(storage, fixed_clock());

        // Act
        let result = store.add("y");

        // Assert
        assert!(matches!(result, Err(StoreError::IdsExhausted)));
    }

    #[test]
    fn add_strips_byte_order_marks_like_whitespace() {
        let mut store = store();

        let rejected = store.add("\u{FEFF} \u{FEFF}");
        let item = store.add("\u{FEFF}buy milk\u{FEFF}\n").unwrap();

        assert!(matches!(
            rejected,
            Err(StoreError::Validation(ValidationError::EmptyText))
        ));
        assert_eq!(item.text(), "buy milk");
        assert_eq!(store.list_all().unwrap().len(), 1);
    }
}
