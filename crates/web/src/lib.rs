//! # Intake Web
//!
//! The browser surface for the upload workflow.
//!
//! Handles:
//! - the HTML form page (`GET /`) rendered with askama
//! - multipart submission (`POST /upload`) collected into an
//!   [`UploadForm`](intake_core::UploadForm)
//! - a JSON health check (`GET /health`) and its OpenAPI description
//!
//! The workflow itself lives in `intake-core`; this crate only collects input and renders
//! the [`WorkflowOutcome`](intake_core::WorkflowOutcome).

#![warn(rust_2018_idioms)]

mod collect;
mod handlers;
mod view;

pub use collect::{collect_form, CollectError, IDENTITY_HEADERS};
pub use handlers::{router, AppState, HealthRes};
pub use view::IndexPage;
