// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Application efficiency, performance portability and code divergence.
//!
//! Each metric borrows a projected table and returns a new table. Grouped
//! results are ordered by `(problem, application)`.

pub mod divergence;
pub mod efficiency;
pub mod portability;

pub use divergence::{code_divergence, divergence, SetMap, DIVERGENCE};
pub use efficiency::{application_efficiency, Foms, APP_EFF, ARCH_EFF};
pub use portability::{performance_portability, Efficiency, APP_PP, ARCH_PP};
