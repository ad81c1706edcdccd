//! # rfcmap - Web-to-RFC Interface Mapping Core
//!
//! **rfcmap** maintains declarative *interface definitions*: each one describes how a web
//! request/response contract maps onto the parameters and tables of a remote SAP RFC
//! function. The crate normalizes loosely-shaped stored JSON into a canonical model, offers
//! positional and id-addressed structural edits, projects a definition into a sample
//! invocation payload, validates definitions before they are saved, and maps live request
//! and response data through a definition.
//!
//! ## Core Workflow
//!
//! 1.  **Load**: Fetch a definition through an [`store::InterfaceStore`] (or any JSON
//!     document) and normalize it. Normalization never fails.
//! 2.  **Edit**: Open an [`editor::Editor`] on the definition and apply [`mutation::Mutation`]s.
//!     Every edit yields a new snapshot and can be undone.
//! 3.  **Project**: Turn the working copy into an [`projection::InvocationPayload`] to try
//!     the interface out.
//! 4.  **Save**: Hand the working copy to [`service::InterfaceService::save`], which
//!     validates it, persists it and keeps the snapshot cache coherent.
//!
//! ## Quick Start
//!
//! ```rust
//! use rfcmap::prelude::*;
//! use serde_json::json;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let stored = json!({
//!         "id": "MAT_LOOKUP",
//!         "rfcFunction": "Z_MAT_LOOKUP",
//!         "executable": "Y",
//!         "importMapping": [
//!             { "webField": "plant", "sapField": "WERKS", "required": true, "defaultValue": "1000" }
//!         ]
//!     });
//!
//!     let def = normalize(&stored);
//!     let mut editor = Editor::open(&def, MapperConfig::default());
//!
//!     let row = editor.add_scalar_row(ScalarKind::Import);
//!     editor.edit_field(row, FieldEdit::WebField("material".into()))?;
//!     editor.edit_field(row, FieldEdit::SapName("MATNR".into()))?;
//!     editor.edit_field(row, FieldEdit::Example("M-01".into()))?;
//!
//!     let payload = editor.execute(None)?;
//!     assert_eq!(payload.user_id, "test");
//!     assert_eq!(payload.data["plant"], "1000");
//!     assert_eq!(payload.data["material"], "M-01");
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod catalog;
pub mod config;
pub mod editor;
pub mod engine;
pub mod error;
pub mod model;
pub mod mutation;
pub mod normalize;
pub mod prelude;
pub mod projection;
pub mod service;
pub mod store;
pub mod validation;
