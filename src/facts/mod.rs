//! Fact verification against an RDF knowledge base
//!
//! Turns a raw (subject, predicate, object) fact into SPARQL terms:
//! - Normalization of corpus text (quotes, markers, underscores)
//! - Literal and resource serialization with XSD type tags
//! - Ordered cascade over the object's possible RDF types

pub mod literal;
pub mod models;
pub mod normalize;
pub mod resolver;

pub use literal::{CandidateLiteral, LiteralKind};
pub use models::{parse_triple, InputRecord, Triple, TripleParseError, VerificationRecord};
pub use normalize::{clean, CleanedTriple};
pub use resolver::{CandidatePlan, ExistenceResolver, Resolution};
