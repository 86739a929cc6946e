pub mod filter;
pub mod form;
pub mod numeric;
pub mod promotion;

pub use filter::QueryFilter;
pub use form::FormState;
pub use numeric::{Numeric, parse_int};
pub use promotion::{PROMOTION_TYPES, Promotion};
