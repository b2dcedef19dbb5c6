use crate::domain::food_order::FoodOrder;
use crate::error::Result;
use std::io::Read;

/// Reads a food-order seed from a JSON source.
///
/// The CLI uses this to load a snapshot of the `foodOrder` collection
/// (an array of documents in the store's wire shape) into the in-memory
/// store before running a sweep or a report.
pub struct SeedReader<R: Read> {
    source: R,
}

impl<R: Read> SeedReader<R> {
    /// Creates a new `SeedReader` from any `Read` source (e.g. File, Stdin).
    pub fn new(source: R) -> Self {
        Self { source }
    }

    pub fn food_orders(self) -> Result<Vec<FoodOrder>> {
        Ok(serde_json::from_reader(self.source)?)
    }
}
