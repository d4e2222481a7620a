// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal front end for the Gambit engine

pub mod notation;
pub mod render;
