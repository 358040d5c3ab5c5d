//! # CLI Module
//!
//! Command-line interface of the `nextapi-gen` binary.
//!
//! ## Prisma generator mode
//!
//! With no subcommand the binary is a Prisma generator. Reference it from
//! `schema.prisma` and run `prisma generate`:
//!
//! ```prisma
//! generator api {
//!   provider = "nextapi-gen"
//!   output   = "../app/api"
//! }
//! ```
//!
//! ## Commands
//!
//! ### `generate`
//!
//! Generate from a DMMF document saved to disk:
//!
//! ```bash
//! nextapi-gen generate --dmmf dmmf.json --output app/api
//! ```
//!
//! Options:
//! - `--dmmf <FILE>` - DMMF document, JSON or YAML (required)
//! - `--output <DIR>` - Output directory (required)
//! - `--config <FILE>` - `nextapi.toml` with generator config keys
//! - `--set <KEY=VALUE>` - Override one config key, repeatable
//! - `--dry-run` - List the files without writing them
//!
//! ### `lint`
//!
//! ```bash
//! nextapi-gen lint --dmmf dmmf.json --fail-on-error
//! ```
//!
//! ### `inspect`
//!
//! Print the route, relations and upload fields of every model:
//!
//! ```bash
//! nextapi-gen inspect --dmmf dmmf.json
//! ```
//!
//! ## Examples
//!
//! ```bash
//! # JavaScript output with a shared client module
//! nextapi-gen generate \
//!     --dmmf dmmf.json \
//!     --output app/api \
//!     --set extension=js \
//!     --set clientModule=@/lib/prisma
//! ```

mod commands;


pub use commands::{run, run_cli, Cli, Commands};
