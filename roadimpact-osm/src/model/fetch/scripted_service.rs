//! in-memory [`GeodataService`] for tests: replays scripted responses and counts calls.
use std::{
    cell::{Cell, RefCell},
    collections::{HashMap, VecDeque},
    time::Duration,
};

use super::{FetchError, GeodataService};
use crate::model::overpass::{OverpassElement, OverpassQuery, OverpassResponse};

pub struct ScriptedService {
    responses: RefCell<VecDeque<Result<OverpassResponse, FetchError>>>,
    calls: Cell<usize>,
    delay: Duration,
}

impl ScriptedService {
    pub fn new(responses: Vec<Result<OverpassResponse, FetchError>>) -> ScriptedService {
        ScriptedService {
            responses: RefCell::new(responses.into()),
            calls: Cell::new(0),
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay_ms: u64) -> ScriptedService {
        self.delay = Duration::from_millis(delay_ms);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl GeodataService for ScriptedService {
    async fn query(&self, _query: &OverpassQuery) -> Result<OverpassResponse, FetchError> {
        self.calls.set(self.calls.get() + 1);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let next = self.responses.borrow_mut().pop_front();
        next.unwrap_or_else(|| {
            Err(FetchError::TransientFetchError(String::from(
                "no scripted response",
            )))
        })
    }
}

fn way(id: i64, nodes: &[i64], highway: &str, name: &str) -> OverpassElement {
    OverpassElement::Way {
        id,
        nodes: nodes.to_vec(),
        tags: HashMap::from([
            (String::from("highway"), String::from(highway)),
            (String::from("name"), String::from(name)),
        ]),
    }
}

fn node(id: i64, lat: f64, lon: f64) -> OverpassElement {
    OverpassElement::Node { id, lat, lon }
}

/// a primary road running north through (14.2, 121.15) and a secondary road
/// leaving east from the same intersection node.
pub fn intersection_response() -> OverpassResponse {
    OverpassResponse {
        elements: vec![
            way(10, &[1, 2, 3], "primary", "Real Road"),
            way(20, &[2, 4], "secondary", "Parian Road"),
            node(1, 14.199, 121.15),
            node(2, 14.2, 121.15),
            node(3, 14.201, 121.15),
            node(4, 14.2, 121.152),
        ],
        remark: None,
    }
}

pub fn transient() -> Result<OverpassResponse, FetchError> {
    Err(FetchError::TransientFetchError(String::from("504 Gateway Timeout")))
}
