//! Structural consistency checking of instance data against a schema.
//!
//! Every key found in an object-shaped region of the instance must be declared
//! as a property by the schema node at the same path. Value types, formats,
//! required fields and array items are out of scope. The first undeclared key
//! aborts the check with an [`InconsistentSchema`] error carrying its path.

pub mod breadcrumb;
pub mod config;
pub mod consistency;
pub mod error;
pub mod instance;
pub mod schema;

pub use breadcrumb::{BreadCrumb, Segment};
pub use consistency::{validate, validate_from};
pub use error::InconsistentSchema;
pub use instance::{Instance, Scalar};
pub use schema::{check_documents, check_json, DocumentFormat, SchemaNode, SchemaType, SchemaValidationError};
