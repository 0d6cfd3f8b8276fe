pub mod enricher;
pub mod pacer;

pub use enricher::{CoordinateColumns, EnrichSummary, RowEnricher};
pub use pacer::{Pacer, TokioPacer};
