//! Hamtough core library.
//!
//! Tools for probing the relationship between graph toughness and
//! Hamilton-connectedness: an exhaustive verifier for streams of graphs and a
//! hill-climbing search for tough graphs without a Hamilton path between two
//! fixed vertices.
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod dot;
mod error;
mod evolution;
mod graph;
pub mod graph6;
mod subsets;
mod telemetry;
mod toughness;
mod verifier;
mod vertex_set;

#[cfg(test)]
mod test_utils;

pub use crate::{
    error::{Graph6Error, Graph6ErrorCode, HamtoughError, HamtoughErrorCode, Result},
    evolution::{
        CONVERGED_TOUGHNESS, CONVERGENCE_MAX_ORDER, EvolvingGraph, Fitness, HillClimbBuilder,
        HillClimbOutcome, HillClimber, MAX_CLIMB_ORDER, MIN_ORDER, MUTATIONS_PER_GENERATION,
        Mutation, MutationKind, SEED_EDGE_PROBABILITY, has_converged, is_viable_seed,
    },
    graph::{Graph, HamiltonPath, MAX_ORDER},
    subsets::{CatalogEntry, SubsetCatalog, chosen_sizes, generate_subsets},
    toughness::{Witness, adjusted_components, find_witness, obstruction_ratio, pair_ratio},
    verifier::{
        Counterexample, DEFAULT_CHORDAL_THRESHOLD, DEFAULT_THRESHOLD, ExhaustiveVerifier,
        GraphOutcome, PairCaches, RunSummary, RunTotals, Verification,
    },
    vertex_set::{VertexIter, VertexPair, VertexSet},
};
