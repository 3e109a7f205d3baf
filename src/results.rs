mod normalize;
mod result_set;
mod row;

pub use normalize::{RawColumn, RawResult, RawRow, normalize};
pub use result_set::{LastInsertRowid, ResultSet};
pub use row::CustomDbRow;
