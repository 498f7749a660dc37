pub mod tenant_gate;

pub use tenant_gate::{
    cookie_value, tenant_gate, GatewayState, TenantContext, HEADER_PATHNAME, HEADER_TENANT_ID,
    HEADER_TENANT_SLUG,
};
