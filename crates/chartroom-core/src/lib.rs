//! Chartroom Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Chartroom
//! crates. It includes:
//!
//! - **Identifiers**: Validated diagram identifiers ([`identifier::DiagramId`])
//! - **Diagrams**: The schema diagram aggregate and its summary ([`diagram`] module)
//! - **Routes**: Editor routes addressing a diagram ([`route::DiagramRoute`])

pub mod diagram;
pub mod identifier;
pub mod route;
