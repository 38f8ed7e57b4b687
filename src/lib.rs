//! # tierfs
//!
//! A filesystem façade over pluggable backend drivers, plus an ordered
//! directory walker.
//!
//! Drivers implement as many **capability tiers** as their storage supports.
//! A [`FileSystem`] probes the driver once when it is built and then gates
//! every operation: asking a navigation-only driver to write fails with
//! [`FsError::NotSupported`] instead of reaching the driver.
//!
//! ---
//!
//! ## Quick Start
//!
//! ```rust
//! use std::path::Path;
//! use tierfs::{Callbacks, FileSystem, FsError, WalkOptions};
//!
//! let fs = FileSystem::memory();
//! fs.create_directory(Path::new("/docs/drafts"))?;
//! fs.write_string(Path::new("/docs/readme.md"), "# hello")?;
//! fs.write_lines(Path::new("/docs/drafts/todo.txt"), &["one", "two"])?;
//!
//! let mut seen = Vec::new();
//! let mut visitor = Callbacks::<FsError>::new().on_visit(|dir, info, _| {
//!     seen.push(dir.join(&info.name));
//!     Ok(())
//! });
//! fs.walk(Path::new("/"), &WalkOptions::new(), &mut visitor)?;
//! drop(visitor);
//!
//! assert_eq!(seen, [
//!     Path::new("/docs"),
//!     Path::new("/docs/drafts"),
//!     Path::new("/docs/drafts/todo.txt"),
//!     Path::new("/docs/readme.md"),
//! ]);
//! # Ok::<(), FsError>(())
//! ```
//!
//! ---
//!
//! ## Core Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`FileSystem`] | Capability-gated façade over any driver |
//! | [`Driver`] | Advertises which tiers a backend implements |
//! | [`LocalDriver`] | Host filesystem, optionally rooted |
//! | [`MemoryDriver`] | In-memory tree with every tier |
//! | [`Visitor`] / [`Callbacks`] | Walker callbacks |
//! | [`WalkOptions`] / [`VisitOrder`] | Walk configuration |
//! | [`FsError`] | Error type with path and operation context |
//!
//! ---
//!
//! ## Capability Tiers
//!
//! ```text
//! FsNavigate ─▶ FsRead ─▶ FsReadWrite ─▶ FsTemp
//! ```
//!
//! Each tier trait extends the previous one. A backend advertises the tiers
//! it implements through [`Driver`]; a [`Layer`] wraps a driver to hide tiers
//! or trace calls.
//!
//! ---
//!
//! ## Thread Safety
//!
//! Drivers are `Send + Sync` and shared through `Arc`. All operations are
//! synchronous and block the calling thread.
//!
//! ---
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | Serialization for [`FileInfo`], [`OpenFlags`], [`Tier`] and friends, plus `read_json`/`write_json` |

// Private modules
mod error;
mod filesystem;
mod layer;
mod local;
mod memory;
mod traits;
mod types;

#[cfg(feature = "serde")]
mod json;

// Public modules
pub mod interop;
pub mod lines;
pub mod path;
pub mod walk;

// Public re-exports - error types
pub use error::FsError;

// Public re-exports - core types
pub use types::{Access, FileInfo, FileType, OpenFlags, Tier};

// Public re-exports - capability tiers
pub use traits::{Driver, File, FsNavigate, FsRead, FsReadWrite, FsTemp, ReadDirIter};

// Public re-exports - façade and drivers
pub use filesystem::FileSystem;
pub use local::LocalDriver;
pub use memory::MemoryDriver;

// Public re-exports - layers
pub use layer::{DriverExt, Layer, RestrictLayer, Restricted, TraceLayer, Traced};

// Public re-exports - walker
pub use walk::{Callbacks, VisitOrder, Visitor, WalkControl, WalkOptions};
