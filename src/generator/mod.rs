//! # Generator Module
//!
//! Turns a Prisma datamodel into Next.js App Router CRUD routes plus their
//! documentation.
//!
//! ## Overview
//!
//! For every model the generator emits:
//! - **Collection route** - `GET` (list) and `POST` (create)
//! - **Item route** - `GET`, `PUT` and `DELETE` by numeric id
//! - **Postman collection** - one request per CRUD operation
//!
//! and once per run a combined `docs.html`, the shared Prisma client and, when
//! any model stores files, the upload helpers.
//!
//! ## Architecture
//!
//! ```text
//! Datamodel → classify → RouteIr / ExamplePayload → Askama templates → Output Writer
//! ```
//!
//! 1. **Classifier** ([`classify`]) - splits a model's fields into relation and upload fields
//! 2. **Lowering** ([`RouteIr`], [`ExamplePayload`]) - everything the templates branch on
//! 3. **Rendering** - route templates, Postman JSON and the HTML docs
//! 4. **Output** ([`generate`]) - writes the tree below the output directory
//!
//! ## Generated Structure
//!
//! ```text
//! app/api/
//! ├── docs.html
//! ├── _lib/
//! │   ├── prisma.ts           # unless `clientModule` is set
//! │   └── uploads.ts          # only when a model has upload fields
//! └── book/
//!     ├── route.ts
//!     ├── postman-collection.json
//!     └── [id]/
//!         └── route.ts
//! ```
//!
//! Uploaded files land in `public/<model><field>s/<uuid>.<ext>`, and the record keeps
//! `/<model><field>s/<uuid>.<ext>`.
//!
//! ## Programmatic Usage
//!
//! ```rust,ignore
//! use nextapi::config::GeneratorSettings;
//! use nextapi::dmmf::load_datamodel;
//! use nextapi::generator::generate;
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let datamodel = load_datamodel(Path::new("dmmf.json"))?;
//! let report = generate(&datamodel, &GeneratorSettings::default(), Path::new("app/api"), false)?;
//! println!("{} files", report.files.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Templates
//!
//! Templates live in `templates/`:
//!
//! - `collection_route.txt` - list and create handlers
//! - `item_route.txt` - read, update and delete handlers
//! - `prisma_client.txt` - client cached on `globalThis`
//! - `uploads.txt` - multipart and file helpers
//! - `docs.html` - combined documentation page

mod docs;
mod fields;
mod payload;
mod postman;
mod project;
mod routes;

pub use docs::*;
pub use fields::*;
pub use payload::*;
pub use postman::*;
pub use project::*;
pub use routes::*;
