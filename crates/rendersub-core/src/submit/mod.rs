//! Job submission
//!
//! [`Submitter`] runs the submit flow against any [`SubmissionClient`].
//! [`SpoolClient`] is the file-backed client used by the CLI.

pub mod client;
pub mod spool;
pub mod submitter;

pub use client::{Credentials, JobRequest, SubmissionClient, SubmitReceipt, PLUGIN_NAME};
pub use spool::SpoolClient;
pub use submitter::{Submission, Submitter};
