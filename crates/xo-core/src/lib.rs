//! # xo-core
//!
//! Core types shared by the xo transform crates:
//! - the error taxonomy ([`Error`], [`Result`])
//! - dynamic construction parameters ([`Quantity`], [`VarId`])
//! - point resolution ([`Point`]) for quantities whose value depends on a posterior draw

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod point;

pub use error::{Error, Result};
pub use point::{NoPoint, Point, Quantity, VarId};
