//! # Leaf Image Catalog
//!
//! Enumerates a labeled image dataset laid out as `root/<label>/<image>` and
//! caches the result per root for the rest of a session.
//!
//! ```rust,no_run
//! use leaf_catalog::{CatalogCache, find_by_display_name};
//!
//! let cache = CatalogCache::new();
//! let catalog = cache.get_or_build("tea_sickness_dataset")?;
//! for entry in catalog.iter() {
//!     println!("{} ({})", entry.display_name(), entry.label);
//! }
//! let selected = find_by_display_name(&catalog, "IMG_0001.jpg");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cache;
pub mod error;
pub mod scan;

pub use cache::{Catalog, CatalogCache};
pub use error::{CatalogError, Result};
pub use scan::{build_catalog, find_by_display_name, CatalogEntry};
