#![doc = include_str!("../README.md")]
#![deny(
    future_incompatible,
    nonstandard_style,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_qualifications
)]
#![doc(test(attr(deny(warnings))))]

mod blank_node;
mod error;
mod index;
mod iter;
mod literal;
mod model;
mod named_node;
mod node;
mod ordering;
mod quad;
mod reader;
mod world;

pub use crate::blank_node::BlankNode;
pub use crate::error::{CoreError, ErrorSink};
pub use crate::iter::{QuadIter, SearchMode};
pub use crate::literal::{Literal, LiteralTag};
pub use crate::model::{Model, NoOrderingsError};
pub use crate::named_node::NamedNode;
pub use crate::node::Node;
pub use crate::quad::{GraphPattern, Pattern, Quad, QuadShapeError};
pub use crate::reader::{ExpandError, PrefixEnvironment, PrefixResolutionError};
pub use crate::world::{NodeError, World};
pub use oxilangtag::LanguageTagParseError;
pub use oxiri::IriParseError;
