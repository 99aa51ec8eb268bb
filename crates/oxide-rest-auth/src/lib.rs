//! # oxide-rest-auth
//!
//! Role-based access grants for REST models.
//!
//! This crate provides:
//! - `Role`, a numeric role identifier carried by every request
//! - `AccessLevel` and `Permission`, granting a role READ and/or WRITE access
//! - `User`, the authenticated caller (or the anonymous default)
//!
//! ## Permissions
//!
//! ```rust
//! use oxide_rest_auth::{AccessLevel, Permission, Role, User};
//!
//! const ADMIN: Role = Role(1);
//!
//! let grant = Permission::read_only(ADMIN);
//! assert!(grant.allows(AccessLevel::Read));
//! assert!(!grant.allows(AccessLevel::Write));
//!
//! let visitor = User::anonymous();
//! assert_eq!(visitor.role(), Role::DEFAULT);
//! ```

mod permissions;
mod user;

pub use permissions::{AccessLevel, Permission, Role};
pub use user::User;
