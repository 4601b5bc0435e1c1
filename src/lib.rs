//! # qrforma
//!
//! Turn typed content into a QR code and export it as PNG or SVG.
//!
//! The crate models a small form: pick a [`ContentType`], enter a value,
//! submit. Submissions are validated (nothing may be empty, and URLs must be
//! `http`/`https`), committed after a short delay, rendered onto a 200×200
//! grayscale surface at error correction level High, and exported as
//! `qrcode-YYYY-MM-DD.png` or `.svg`.
//!
//! ## Example
//!
//! ```rust
//! use qrforma::{ContentType, ExportFormat, Generator};
//!
//! let mut form = Generator::default();
//! form.select_type(ContentType::Url);
//! form.set_input("https://example.com");
//!
//! let pending = form.submit().unwrap();
//! form.commit(pending).unwrap();
//!
//! let png = form
//!     .export(ExportFormat::Png, qrforma::export::today())
//!     .unwrap()
//!     .expect("a code was generated");
//! assert!(png.file_name.ends_with(".png"));
//! ```
//!
//! ## Modules
//!
//! - [`content`]: content types and their presentation data.
//! - [`validate`]: input rules.
//! - [`templates`]: builders for Wi-Fi, e-mail and phone payloads.
//! - [`render`]: symbol encoding and rasterization.
//! - [`export`]: PNG and SVG output.
//! - [`generator`]: the form state machine.
//! - [`config`]: TOML settings.

pub mod config;
pub mod content;
pub mod error;
pub mod export;
pub mod generator;
pub mod render;
pub mod templates;
pub mod validate;

pub use config::Config;
pub use content::ContentType;
pub use error::{GeneratorError, SubmitError, UrlIssue, ValidationError};
pub use export::{ExportArtifact, ExportFormat, SvgMode};
pub use generator::{CommitOutcome, Generator, PendingCommit};
pub use validate::validate;
