use std::future::Future;

use super::FetchError;
use crate::model::overpass::{OverpassQuery, OverpassResponse};

/// an external source of raw road graphs answering Overpass queries.
pub trait GeodataService {
    fn query(
        &self,
        query: &OverpassQuery,
    ) -> impl Future<Output = Result<OverpassResponse, FetchError>>;
}
