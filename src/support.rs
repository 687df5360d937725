//! Supporting utilities used by the processors.
//!
//! - [`frustum`]: Conical-frustum shell volume used when a can is cut at the
//!   transition-piece/monopile connection.
//! - [`rounding`]: Quantity rounding applied to elevation and summary
//!   columns.

pub mod frustum;
pub mod rounding;
