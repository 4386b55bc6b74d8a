#![forbid(unsafe_code)]

//! Text model for the `DD | HH:MM:SS.mmm` duration field.
//!
//! Everything here is a pure function of the field text: nothing in this
//! crate holds state between calls, and nothing fails. Malformed input
//! degrades to a default or a clamped reinterpretation.
//!
//! # Modules
//!
//! - [`segment`]: the five logical segments and their step sizes.
//! - [`numeric`]: permissive string-to-number coercion.
//! - [`codec`]: milliseconds to canonical string and back.
//! - [`sections`]: the shared marker/offset table used to split the text,
//!   locate a cursor, and compute highlight spans.
//! - [`validate`]: bounds, clamping, and tolerant repair (`sanitize`).
//!
//! # Example
//!
//! ```
//! use durpick_text::{decode, encode, locate, Segment};
//!
//! let text = encode(90_061_001);
//! assert_eq!(text, "01 | 01:01:01.001");
//! assert_eq!(decode(&text), 90_061_001);
//!
//! let hit = locate(&text, 6).unwrap();
//! assert_eq!(hit.segment, Segment::Hours);
//! assert_eq!(hit.span, 5..7);
//! ```

pub mod codec;
pub mod numeric;
pub mod sections;
pub mod segment;
pub mod validate;

pub use codec::{
    DEFAULT_CANONICAL, DurationParts, MAX_REPRESENTABLE, decode, encode, is_canonical,
    is_legacy_clock,
};
pub use numeric::{Numeric, classify, coerce};
pub use sections::{
    DAY_SEPARATOR, Fragments, Located, SegmentTable, locate, sectionize, span_for,
};
pub use segment::Segment;
pub use validate::{Bounds, clamp, sanitize};
