mod geo_type;
mod geo_id;
mod names;

pub use geo_type::GeoType;
pub use geo_id::GeoId;
pub use names::state_name;
