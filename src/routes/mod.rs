//! Navigation gating for the admin views.
//!
//! Which views exist is the front-end's business; this module only knows
//! which paths are public and asks the session guard about everything else.

pub mod gate;

pub use gate::{GateOutcome, GateState, RouteGate};

/// Where `/` lands.
pub const DEFAULT_ROUTE: &str = "/dashboard";
