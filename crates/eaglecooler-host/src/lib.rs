//! Named-but-external collaborators: the host's in-process object API and
//! its localhost HTTP control plane.
//!
//! spec.md §1 puts both out of scope as *hard* engineering ("a thin
//! request shaper; not the hard part" / "the ambient host object's full
//! surface") — this crate contracts only the operations the core
//! consumes, and ships no production `HostApi` implementation.

pub mod api;
pub mod http;

pub use api::{HostApi, PluginManifest};
pub use http::{clear_token_cache, HttpClient, HttpError, QueryValue, TokenProvider};
