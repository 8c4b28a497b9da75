// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Performance, portability and productivity metrics.
//!
//! Raw performance records are first [projected](projection::project) onto
//! `problem`, `application` and `platform` identities. The
//! [metrics](crate::metrics) then turn projected tables into application
//! efficiency, performance portability and code divergence tables.

#[macro_use]
extern crate log;

pub mod coverage;
pub mod error;
pub mod metrics;
pub mod projection;
pub mod table;
pub mod utils;

pub use error::{Error, ErrorKind, Result};
pub use table::{Table, Value};
