//! shapewire-compiler
//!
//! This crate implements:
//!  1) The `Reflect` trait connecting concrete types to shapes and values,
//!  2) `Reflect` impls for scalars, text, `Vec<T>` and `[T; N]`,
//!  3) `reflect_record!` / `reflect_enum!` impl generators,
//!  4) Shape validation (`walker`),
//!  5) The plan compiler with its process-lifetime cache (`plan`),
//!  6) The uncached per-call interpreter (`direct`).

pub use shapewire_schema as schema;

pub mod direct;
mod impls;
mod macros;
pub mod plan;
pub mod traits;
pub mod walker;

pub use plan::Plan;
pub use traits::{Reflect, ReprKind};
