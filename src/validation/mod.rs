//! Validation Boundary
//!
//! Diagnostic types and the trait behind which the external validator sits.

pub mod diagnostic;
pub mod service;

pub use diagnostic::{Diagnostic, PublishedDiagnostics, Severity};
pub use service::{LanguageService, TextDocument, APIDOM_LANGUAGE_ID};
