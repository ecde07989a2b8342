//! Mealkit Core - Shared domain types library.
//!
//! This crate provides the common types used across all Mealkit components:
//! - `api` - The public REST API service
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types and pure domain logic - no I/O, no
//! database access, no HTTP clients. Everything here is trivially unit
//! testable and usable from any component.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, and emails
//! - [`cart`] - Cart and cart-item types with quantity and total logic
//! - [`customer`] - Checkout customer information and required-field validation
//! - [`payment`] - Payment method selection

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod customer;
pub mod payment;
pub mod types;

pub use cart::{Cart, CartItem};
pub use customer::{CustomerInfo, MissingFieldsError};
pub use payment::PaymentMethod;
pub use types::*;
