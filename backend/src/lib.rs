//! SwissParcel backend library modules.
//!
//! The crate is laid out hexagonally: [`domain`] holds the parcel entity, the
//! derived-metric formulas and the ports; [`inbound`] adapts HTTP requests to
//! the driving ports; [`outbound`] implements the repository port in memory
//! and on PostgreSQL.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
pub use settings::ServerSettings;
