//! Order-preserving manifest document (`info.json` in, `manifest.json` out).

use serde_json::{Map, Value};

use crate::terrain::MapSummary;

/// Keys owned by the pipeline; everything else round-trips untouched.
const MAP_KEY: &str = "map";
const MINI_MAP_KEY: &str = "mini_map";

/// A map's metadata document.
///
/// The pipeline treats the document as opaque apart from the `map` and
/// `mini_map` keys it injects after generation. `serde_json` is built
/// with `preserve_order`, so unknown keys keep their values and their
/// position across the read-modify-write cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    doc: Map<String, Value>,
}

impl Manifest {
    /// Parse raw `info.json` bytes. The top level must be a JSON object.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let doc = serde_json::from_slice(bytes)?;
        Ok(Self { doc })
    }

    /// Inject the derived dimensions, overwriting only the owned keys.
    pub fn set_summaries(
        &mut self,
        map: &MapSummary,
        mini_map: &MapSummary,
    ) -> Result<(), serde_json::Error> {
        self.doc
            .insert(MAP_KEY.to_string(), serde_json::to_value(map)?);
        self.doc
            .insert(MINI_MAP_KEY.to_string(), serde_json::to_value(mini_map)?);
        Ok(())
    }

    /// Serialize with stable two-space indentation and a trailing newline.
    pub fn to_pretty_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        let mut bytes = serde_json::to_vec_pretty(&self.doc)?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}
