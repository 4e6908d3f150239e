/// Input readers
mod alignment;

pub use alignment::{AlignmentReader, AlignmentRecord, AlignmentSource};
