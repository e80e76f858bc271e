//! Translation state model and the reconciliation pipeline.
//!
//! - `entry` / `collection`: key and translation entries, ordered by identity
//! - `builder` / `keyword`: turning extraction observations into key entries
//! - `store`: `keys.json` and `trans-<locale>.json` on disk
//! - `reconcile`: merging keys into every locale's translations
//! - `spec`: filters over translation entries

pub mod builder;
pub mod collection;
pub mod entry;
pub mod keyword;
pub mod reconcile;
pub mod spec;
pub mod store;

pub use builder::{KeyCollector, KeyEntryBuilder};
pub use collection::EntryCollection;
pub use entry::{Entry, KeyEntry, PluralQuantities, Reference, TransEntry, TransMessages};
pub use keyword::Keyword;
pub use reconcile::{UpdateOptions, UpdateReport, ValidationMode, update_trans};
pub use spec::TransEntrySpec;
