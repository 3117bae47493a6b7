//! # rvw-review
//!
//! The review lifecycle on the client side:
//!
//! - [`upload`]: presign, parallel direct transfer, and commit of a document set.
//! - [`poller`]: fixed-interval status polling owned by a cancellable handle.
//! - [`progress`] and [`view`]: what a snapshot looks like on screen.

pub mod error;
pub mod poller;
pub mod progress;
pub mod upload;
pub mod view;

pub use error::{ExportError, UploadError};
pub use poller::{PollState, PollerHandle, ReviewSource, ReviewWatcher};
pub use progress::{ProgressView, ReviewPhase, Stage, StageStatus};
pub use upload::{UploadBackend, UploadFile, UploadSession};
pub use view::{ResultView, ReviewScreen};
