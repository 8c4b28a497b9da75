// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! In-memory model of source-line coverage traces.
//!
//! A trace records which lines of which source units were needed to build an
//! application for one platform. Units are keyed by file path _and_ build id,
//! so the same path compiled twice under different configurations is treated
//! as two distinct units.

pub mod region;
pub mod source;

pub use region::Region;
pub use source::{SourceCoverage, SourceUnit, UnitCoverage};
