mod filter_op;
mod filter_query;
mod overpass_query;
mod overpass_response;

pub use filter_op::FilterOp;
pub use filter_query::FilterQuery;
pub use overpass_query::{AroundStatement, OverpassQuery};
pub use overpass_response::{OverpassElement, OverpassResponse};
