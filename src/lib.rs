//! In-process primitives: an ordered key set and a synchronous event registry.
//!
//! Two independent building blocks with deliberately small surfaces:
//!
//! * [`OrderedSet`] keeps distinct keys in a binary search tree and answers
//!   membership queries; iteration yields keys in ascending order.
//! * [`EventRegistry`] fans emitted payloads out to subscribers in
//!   registration order.
//!
//! Both are single-threaded, in-memory values with no persistence and no
//! background work. [`TreeDisplay`] renders either one as an ASCII tree for
//! inspection.

pub mod registry;
pub mod render;
pub mod set;
pub mod util;

pub use registry::EventRegistry;
pub use render::TreeDisplay;
pub use set::OrderedSet;
