//! Target geometry for distance measurements: conversion from ROIs into
//! calibrated planar geometry, per-kind unions and the spatial indices used
//! to query them.

mod adapter;
mod error;
mod locator;
mod nearest;
mod targets;
mod union;


pub use adapter::{GeometryScale, TargetGeometry, roi_to_geometry};
pub use error::{GeometryError, Result};
pub use locator::{AreaLocator, Location};
pub use nearest::{CentroidIndex, LineIndex, PointIndex};
pub use targets::TargetIndex;
pub use union::ClassTargets;
