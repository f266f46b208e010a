//! Open Packaging Conventions (OPC) writing support.
//!
//! Just enough of the OPC model to emit a package: parts with content types,
//! relationships at package and part level, and the ZIP container.

pub mod constants;
pub mod package;
pub mod part;
pub mod phys_pkg;
pub mod pkgwriter;
pub mod rel;

pub use package::OpcPackage;
pub use part::Part;
pub use pkgwriter::PackageWriter;
pub use rel::{Relationship, Relationships};
