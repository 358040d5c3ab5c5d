//! # Prisma Generator Protocol
//!
//! `prisma generate` starts every generator listed in the schema as a child
//! process and talks to it over newline-delimited JSON-RPC 2.0:
//!
//! ```text
//! prisma CLI ──stdin──▶ {"jsonrpc":"2.0","method":"getManifest","params":{...},"id":1}
//! prisma CLI ◀─stderr── {"jsonrpc":"2.0","id":1,"result":{"manifest":{...}}}
//! prisma CLI ──stdin──▶ {"jsonrpc":"2.0","method":"generate","params":{...},"id":2}
//! prisma CLI ◀─stderr── {"jsonrpc":"2.0","id":2,"result":null}
//! ```
//!
//! Replies go to stderr, which leaves stdout free. Log lines share stderr with
//! the replies and are written as plain text, so the CLI never mistakes one for a reply.
//!
//! ```prisma
//! generator api {
//!   provider = "nextapi-gen"
//!   output   = "../app/api"
//! }
//! ```

mod handler;
mod jsonrpc;

#[cfg(test)]
mod tests;

pub use handler::*;
pub use jsonrpc::*;
