//! Route Identity Resolver.
//!
//! Turns the agency's raw route records into stable numeric IDs, short
//! display codes, cleaned long names and colors. The mapping for
//! non-numeric route IDs is a closed whitelist: an unlisted route is an
//! error, never a guess.

mod error;
mod resolver;
mod whitelist;

pub use error::ResolveError;
pub use resolver::{RouteResolver, family_of};
pub use whitelist::{FamilyKey, RouteWhitelist, Variant, WhitelistEntry, cornwall_whitelist};
