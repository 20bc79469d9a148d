//! Service loads and their conversion to laminate running loads

mod load_case;
mod service_load;

pub use load_case::LoadCase;
pub use service_load::ServiceLoad;
