//! Caller-side sensing built on the octree queries
//!
//! The index itself only answers "which leaves" questions. The helpers here
//! turn those answers into the values a lander controller consumes each
//! frame: a contact state from the box query, altitude above ground from a
//! downward ray, and a picked terrain vertex from a view ray. Thresholds live
//! here, never inside the index.

mod altimeter;
mod contact;
mod picking;

pub use altimeter::{altitude, ground_hit};
pub use contact::{ContactConfig, ContactProbe, ContactReport, ContactState, DEFAULT_PENETRATION_LEAF_COUNT};
pub use picking::{pick_vertex, PickedVertex};
