//! Property-based tests for the Kruskal and Prim solvers.
//!
//! Checks both solvers against a brute-force oracle on small graphs,
//! validates the structural invariants of every forest they produce, and
//! asserts that the two solvers agree with each other across graph
//! topologies with varied weight distributions.

mod equivalence;
mod helpers;
mod oracle;
mod strategies;
mod structural;
mod types;
