mod dataset;
mod observation;

pub use dataset::Dataset;
pub use observation::Observation;
