//! # nextapi
//!
//! **nextapi** is a Prisma generator that turns a datamodel into Next.js App Router
//! CRUD routes, one Postman collection per model and a combined HTML reference.
//!
//! ## Overview
//!
//! `prisma generate` runs the `nextapi-gen` binary as a child process and hands it
//! the parsed schema (the DMMF). For every model the generator writes:
//!
//! - `GET /api/<model>` and `POST /api/<model>` in `<model>/route.ts`
//! - `GET`, `PUT` and `DELETE /api/<model>/<id>` in `<model>/[id]/route.ts`
//! - `<model>/postman-collection.json`
//!
//! plus `docs.html` at the output root. String fields that hold uploaded files
//! (by name pattern, or declared with `/// @upload`) switch Create and Update to
//! `multipart/form-data` and store the file under `public/`.
//!
//! ## Architecture
//!
//! - **[`dmmf`]** - datamodel types and DMMF loading
//! - **[`config`]** - generator settings from the `generator` block, a TOML file or the CLI
//! - **[`generator`]** - field classification, route/doc rendering and the output writer
//! - **[`placeholder`]** - example values for request bodies
//! - **[`protocol`]** - the Prisma generator JSON-RPC protocol
//! - **[`linter`]** - datamodel checks
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`cli`]** - the `nextapi-gen` command line
//!
//! ```text
//! prisma CLI ──JSON-RPC──▶ protocol ──▶ dmmf ──▶ generator ──▶ app/api/**
//! ```
//!
//! ## Usage
//!
//! ```prisma
//! generator client {
//!   provider = "prisma-client-js"
//! }
//!
//! generator api {
//!   provider  = "nextapi-gen"
//!   output    = "../app/api"
//!   extension = "ts"
//! }
//!
//! model Book {
//!   id         Int      @id @default(autoincrement())
//!   title      String
//!   coverImage String?
//!   category   Category @relation(fields: [categoryId], references: [id])
//!   categoryId Int
//! }
//! ```
//!
//! ```bash
//! npx prisma generate
//! ```
//!
//! The same output can be produced without Prisma from a DMMF file:
//!
//! ```bash
//! nextapi-gen generate --dmmf dmmf.json --output app/api
//! ```

pub mod cli;
pub mod config;
pub mod dmmf;
pub mod generator;
pub mod linter;
pub mod logging;
pub mod placeholder;
pub mod protocol;

pub use config::{ConfigError, GeneratorSettings};
pub use dmmf::{load_datamodel, Datamodel, Field, Model};
pub use generator::{generate, GenerationReport};
