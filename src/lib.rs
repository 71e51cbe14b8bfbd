//! Multi-key lookup tables for long-format reference data, such as
//! actuarial rate tables.
//!
//! A table is loaded from a comma-delimited file. The last column of every
//! row is the value; the remaining columns form a composite key:
//!
//! ```text
//! table_name,age,sex,rate
//! abc1234,50,m,0.0123
//! abc1234,51,m,0.0130
//! ```
//!
//! Each cell is type-inferred (integer, then float, then text) unless
//! inference is disabled at load time. Lookups are exact-match only, either
//! by named fields with validation or by positional tuple on the fast path.

mod error;
mod scalar;
mod table;

pub use error::TableError;
pub use scalar::Scalar;
pub use table::MultiKeyTable;
