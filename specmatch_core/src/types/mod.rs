pub mod criterion;
pub mod error;
pub mod specification;
pub mod value;

pub use criterion::{CompositeCriterion, GroupChild, Junction, QueryCriterion};
pub use error::{RegistryError, SpecificationError};
pub use specification::{Declaration, Specification};
pub use value::{values_equal, Mapping, Value};
