//! Tabia is a bitboard chess position engine: it parses positions,
//! enumerates every strictly legal move for the side to move (castling,
//! en passant and promotions included) and applies chosen moves in place.
//! Sliding-piece attacks are cast with an obstructed fill over the
//! occupancy sets instead of lookup tables.
//!
//! Tabia does not search, evaluate or keep game history: it produces legal
//! moves for exactly one ply and applies exactly one move at a time.

#![warn(missing_docs, variant_size_differences)]
// Rustc lints.
#![warn(
    absolute_paths_not_starting_with_crate,
    keyword_idents,
    macro_use_extern_crate,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_lifetimes,
    unused_qualifications
)]
// Rustdoc lints.
#![warn(
    rustdoc::broken_intra_doc_links,
    rustdoc::invalid_codeblock_attributes,
    rustdoc::invalid_html_tags,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::bare_urls
)]
// Clippy lints.
#![warn(
    clippy::correctness,
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf
)]

pub mod chess;

use shadow_rs::shadow;

shadow!(build);

/// Returns the full version string identifying the exact build.
#[must_use]
pub fn version() -> String {
    format!("{} (commit {})", build::PKG_VERSION, build::SHORT_COMMIT)
}
