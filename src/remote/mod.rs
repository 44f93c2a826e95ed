//! Remote collaborators: the spreadsheet that holds the run-list and the file host that serves
//! the slide deck.
//!
//! Both sit behind small traits so the pipeline can run against in-memory fakes. The Google
//! implementations use blocking HTTP through a shared [`ureq::Agent`], one request at a time.

/// File-hosting downloads.
pub mod drive;
pub(crate) mod http;
/// Spreadsheet access.
pub mod sheets;
/// Run-list name to slide link lookup.
pub mod slides;
