pub mod payments;
pub mod resolver;
pub mod revenue;
pub mod sdk;

pub use crate::domain::model::{PeriodicOptions, PeriodicUnit, ServiceMap, ServiceMeta};
pub use crate::domain::ports::{AuthTokenProvider, ServiceMapSource};
pub use crate::utils::error::Result;
