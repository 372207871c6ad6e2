//! Integration tests for the validation pipeline
//!
//! These tests build throwaway project trees and mock toolchain binaries,
//! then drive the real check and pipeline code end to end.

pub mod audit_flow;
pub mod helpers;
pub mod profiles;
pub mod toolchain_mocks;
