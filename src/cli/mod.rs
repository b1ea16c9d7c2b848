//! # CLI Module
//!
//! The one command tracktube has: mirror a Spotify playlist as local YouTube
//! downloads.
//!
//! ## Flow
//!
//! 1. Fetch the playlist with an application token (client-credentials grant)
//! 2. Load the cached YouTube credential, or authorize interactively once
//! 3. Search YouTube for `"{title} {artist}"` per track; failed searches are
//!    reported and skipped
//! 4. Hand each match to the external downloader; the first failure aborts
//!
//! All errors are returned to the binary, which prints them and exits with a
//! non-zero status.

mod run;

pub use run::run;
