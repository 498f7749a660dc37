pub mod decision;
pub mod host;
pub mod routes;

pub use decision::{decide, Decision};
pub use host::{HostClass, RequestContext, UNKNOWN_HOST};
pub use routes::{classify_route, RouteClass};
