/// Incremental automaton builder that merges identical subtrees.
pub mod builder;
/// Automaton states and their outgoing transitions.
pub mod children;
/// Build settings.
pub mod config;
/// The `base`/`check` arrays and their traversal.
pub mod double_array;
/// Breadth-first placement of an automaton into a double array.
pub(crate) mod encoder;
/// Validation and sorting of build input.
pub mod keyset;
/// Public map type, its builder and lookups.
pub mod map;
pub mod mapper;
/// Binary format and value codecs.
pub mod serialize;
/// Storage of the values the automaton refers to.
pub mod values;

pub use builder::{build_automaton, Automaton, Builder, IntoWord};
pub use children::{State, StateId};
pub use config::{BuildConfig, DEFAULT_MAX_UNITS};
pub use double_array::DoubleArray;
pub use keyset::KeySet;
pub use map::{CommonPrefixSearch, CommonPrefixSearchChars, DawgMap, DawgMapBuilder};
pub use mapper::CodeMapper;
pub use serialize::ValueCodec;
pub use values::ValueStore;
