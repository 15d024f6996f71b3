//! Access widening.
//!
//! Callers register access requests for classes and their members in an
//! [`AccessResolver`]; conflicting requests merge so the most permissive
//! outcome wins. An [`AccessVisitor`] stage takes each class's record as the
//! class is entered, retiring the class in the same step, and applies it
//! during the traversal. A record is applied at most once per run.

mod record;
mod resolver;
mod visitor;

pub use record::{Access, ClassAccess, Visibility};
pub use resolver::AccessResolver;
pub use visitor::AccessVisitor;
