//! Functional core for vivah.
//!
//! Pure types and functions shared by the auth crate and the server: the
//! attribute codec, table schemas, the error taxonomy, entity types and the
//! repository traits. Nothing in here performs I/O.

pub mod auth;
pub mod entities;
pub mod storage;
