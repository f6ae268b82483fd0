//! `srclists_core` keeps per-directory CMake fragments in sync with the
//! `.cpp` and `.h` files actually present on disk. Each configured tree is
//! walked top-down and every directory receives a generated
//! `CMakeLists.txt` that descends into its subdirectories and appends its own
//! files to the tree's aggregate source and header variables.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Tree root
//!   → Walker (lazy pre-order sequence of DirectoryEntry values)
//!   → Classifier (file names → ordered sources + headers)
//!   → Emitter (render fragment text, replace the file on disk)
//! ```
//!
//! ## Modules
//!
//! - [`config`] — Configuration loading from `srclists.toml`: trees, their
//!   aggregate variable names, fragment name and exclude patterns.
//! - [`walker`] — The lazy, restartable directory walk.
//! - [`fragment`] — Fragment rendering and the flush-then-rename writer.
//!
//! ## Generated fragment
//!
//! For a directory holding `a.cpp`, `a.h` and a subdirectory `detail` in the
//! library tree:
//!
//! ```text
//! #THIS IS AN AUTOMATICALLY GENERATED FILE - DO NOT OVERWRITE THE CONTENT!
//! #...
//!
//! add_subdirectory(detail)
//! set(SOURCES
//! 	${SOURCES}
//! 	${CMAKE_CURRENT_SOURCE_DIR}/a.cpp
//! 	CACHE STRING "SOURCES" FORCE)
//!
//! set(HEADERS
//! 	${HEADERS}
//! 	${CMAKE_CURRENT_SOURCE_DIR}/a.h
//! 	CACHE STRING "HEADERS" FORCE)
//! ```
//!
//! Because `add_subdirectory` runs before the `set` calls, every descendant
//! appends to `SOURCES` before its parent does. [`collect_manifest`] computes
//! the resulting list directly.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use srclists_core::check_all;
//! use srclists_core::generate_all;
//! use srclists_core::load_project;
//! use std::path::Path;
//!
//! let ctx = load_project(Path::new(".")).unwrap();
//!
//! if !check_all(&ctx).unwrap().is_ok() {
//! 	let summary = generate_all(&ctx).unwrap();
//! 	println!("{} fragment(s) written", summary.written_count());
//! }
//! ```

pub use classify::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use fragment::*;
pub use manifest::*;
pub use project::*;
pub use walker::*;

mod classify;
pub mod config;
mod engine;
#[allow(unused_assignments)]
mod error;
pub mod fragment;
mod manifest;
mod project;
pub mod walker;
