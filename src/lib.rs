//! Placeholder target for the workspace root package (hosts tooling config only).
