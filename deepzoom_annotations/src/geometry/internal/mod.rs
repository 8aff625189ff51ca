//! Internal hit-testing algorithms shared by the geometry dispatch.
