//! Core calculator types: LineResult, Sheet, expression evaluation, number formatting

mod expr;
mod line;
mod number;
mod sheet;

pub use expr::{ExprError, evaluate};
pub use line::{
    EvalMode, LineError, LineResult, Outcome, ParseModeError, parse_line, parse_line_with_mode,
};
pub use number::{NumberFormat, format_number};
pub use sheet::{Sheet, calculate_total};
