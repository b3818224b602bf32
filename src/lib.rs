//! INPMAP: plot the topology of an EPANET INP network on a geographic map

pub mod error;
pub mod geo;
pub mod input;
pub mod model;
pub mod output;
pub mod render;
