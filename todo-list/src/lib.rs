//! A to-do list persisted through a pluggable key-value storage.
//!
//! [`ListStore`] owns the read-modify-write cycle of the list; the storage it
//! writes to is anything implementing [`Storage`].

mod clock;
mod error;
mod item;
mod storage;
mod store;
mod theme;

pub use clock::{Clock, SystemClock, TIMESTAMP_FORMAT};
pub use error::{StorageError, StoreError, ValidationError};
pub use item::{Item, ItemId};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::{ListStore, TODOS_KEY};
pub use theme::{THEME_KEY, Theme, UnknownTheme};
