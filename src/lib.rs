//! Validation and editing support for phonological environment expressions such as
//! `/ [C] _ [V] #`.
//!
//! ```
//! use phonenv::{validate, ErrorKind, ValidationContext};
//!
//! let ctx = ValidationContext::with_symbols(["a", "b"], ["C"]);
//! assert!(validate(&ctx, "/ [C] _ a").is_success());
//!
//! let result = validate(&ctx, "/ [V] _ a");
//! assert_eq!(result.error_kind(), Some(ErrorKind::UnknownClass));
//! assert_eq!(result.position(), Some(3));
//! ```

pub use crate::config::InventoryConfig;
pub use crate::editing::{can_insert_boundary_marker, can_insert_optional_group, CaretSpan};
pub use crate::errors::{ConfigError, ErrorKind, ValidationFailure};
pub use crate::messages::{format_message, MessageCatalog, MessageTemplate};
pub use crate::symbols::{SymbolInventory, SymbolTable, ValidationContext};
pub use crate::validation::{validate, ValidationResult};

pub mod config;
pub mod diagnostics;
pub mod editing;
pub mod errors;
pub mod messages;
pub mod symbols;
pub mod syntax;
pub mod validation;
